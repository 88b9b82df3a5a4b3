use crate::{
    reminder::{ReminderSetting, TaskReminderChannel},
    shared::entity::{Entity, ID},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

/// A `Task` carries two independent reminder channels: one against its
/// start timestamp and one against its due timestamp. Each channel fires
/// at most once, tracked by its own sent flag. The flags are never reset
/// during the lifetime of a task.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: ID,
    pub workspace_id: ID,
    pub title: String,
    pub priority: TaskPriority,
    pub start_ts: Option<i64>,
    pub due_ts: Option<i64>,
    pub reminder: Option<ReminderSetting>,
    pub reminder_sent: bool,
    pub due_reminder: Option<ReminderSetting>,
    pub due_reminder_sent: bool,
}

impl Task {
    pub fn new(workspace_id: ID, title: &str) -> Self {
        Self {
            id: Default::default(),
            workspace_id,
            title: title.into(),
            priority: TaskPriority::Medium,
            start_ts: None,
            due_ts: None,
            reminder: None,
            reminder_sent: false,
            due_reminder: None,
            due_reminder_sent: false,
        }
    }

    /// The trigger timestamp and offset for one of the two channels
    pub fn reminder_channel(&self, channel: TaskReminderChannel) -> (Option<i64>, Option<&ReminderSetting>) {
        match channel {
            TaskReminderChannel::Start => (self.start_ts, self.reminder.as_ref()),
            TaskReminderChannel::Due => (self.due_ts, self.due_reminder.as_ref()),
        }
    }

    pub fn reminder_channel_sent(&self, channel: TaskReminderChannel) -> bool {
        match channel {
            TaskReminderChannel::Start => self.reminder_sent,
            TaskReminderChannel::Due => self.due_reminder_sent,
        }
    }

    pub fn mark_reminder_channel_sent(&mut self, channel: TaskReminderChannel) {
        match channel {
            TaskReminderChannel::Start => self.reminder_sent = true,
            TaskReminderChannel::Due => self.due_reminder_sent = true,
        }
    }
}

impl Entity for Task {
    fn id(&self) -> &ID {
        &self.id
    }
}
