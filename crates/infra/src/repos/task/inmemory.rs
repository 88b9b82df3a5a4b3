use super::ITaskRepo;
use crate::repos::shared::inmemory_repo::*;
use anyhow::anyhow;
use plando_domain::{Task, TaskReminderChannel, ID};

pub struct InMemoryTaskRepo {
    tasks: std::sync::Mutex<Vec<Task>>,
}

impl InMemoryTaskRepo {
    pub fn new() -> Self {
        Self {
            tasks: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ITaskRepo for InMemoryTaskRepo {
    async fn insert(&self, task: &Task) -> anyhow::Result<()> {
        insert(task, &self.tasks);
        Ok(())
    }

    async fn save(&self, task: &Task) -> anyhow::Result<()> {
        save(task, &self.tasks);
        Ok(())
    }

    async fn find(&self, task_id: &ID) -> Option<Task> {
        find(task_id, &self.tasks)
    }

    async fn find_reminder_candidates(&self, channel: TaskReminderChannel) -> Vec<Task> {
        find_by(&self.tasks, |task: &Task| {
            let (trigger_ts, reminder) = task.reminder_channel(channel);
            !task.reminder_channel_sent(channel) && trigger_ts.is_some() && reminder.is_some()
        })
    }

    async fn mark_reminder_sent(
        &self,
        task_id: &ID,
        channel: TaskReminderChannel,
    ) -> anyhow::Result<()> {
        let updated = update_one(task_id, &self.tasks, |task: &mut Task| {
            task.mark_reminder_channel_sent(channel)
        });
        if updated {
            Ok(())
        } else {
            Err(anyhow!("Task not found: {}", task_id))
        }
    }

    async fn delete(&self, task_id: &ID) -> Option<Task> {
        delete(task_id, &self.tasks)
    }
}
