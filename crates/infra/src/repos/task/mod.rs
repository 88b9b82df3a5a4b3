mod inmemory;

pub use inmemory::InMemoryTaskRepo;
use plando_domain::{Task, TaskReminderChannel, ID};

#[async_trait::async_trait]
pub trait ITaskRepo: Send + Sync {
    async fn insert(&self, task: &Task) -> anyhow::Result<()>;
    async fn save(&self, task: &Task) -> anyhow::Result<()>;
    async fn find(&self, task_id: &ID) -> Option<Task>;
    /// Tasks whose given channel has a configured offset, a trigger
    /// timestamp and an unset sent flag. The window test itself happens
    /// in memory against the evaluator.
    async fn find_reminder_candidates(&self, channel: TaskReminderChannel) -> Vec<Task>;
    /// Flips the channel's sent flag to true. This is the write that
    /// guarantees at-most-once firing, so it must happen even when
    /// delivery failed.
    async fn mark_reminder_sent(&self, task_id: &ID, channel: TaskReminderChannel)
        -> anyhow::Result<()>;
    async fn delete(&self, task_id: &ID) -> Option<Task>;
}
