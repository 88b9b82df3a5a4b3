use crate::{
    reminder::ReminderSetting,
    shared::entity::{Entity, ID},
};

/// A calendar event, either created locally or mirrored from the
/// connected external calendar.
///
/// A mirror is identified by `google_event_id` and flagged with
/// `is_from_google`. There is at most one local mirror per remote event
/// id. Events without a remote id are local-only and are never touched by
/// the sync engine's deletion reconciliation.
#[derive(Debug, Clone)]
pub struct CalendarEvent {
    pub id: ID,
    pub workspace_id: ID,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub start_ts: i64,
    pub end_ts: i64,
    /// All-day events carry date-only precision remotely, stored here as
    /// midnight UTC timestamps
    pub all_day: bool,
    pub reminder: Option<ReminderSetting>,
    pub reminder_sent: bool,
    pub google_event_id: Option<String>,
    pub is_from_google: bool,
}

impl CalendarEvent {
    pub fn new(workspace_id: ID, title: &str, start_ts: i64, end_ts: i64) -> Self {
        Self {
            id: Default::default(),
            workspace_id,
            title: title.into(),
            description: String::new(),
            location: None,
            start_ts,
            end_ts,
            all_day: false,
            reminder: None,
            reminder_sent: false,
            google_event_id: None,
            is_from_google: false,
        }
    }

    pub fn is_mirror(&self) -> bool {
        self.is_from_google && self.google_event_id.is_some()
    }
}

impl Entity for CalendarEvent {
    fn id(&self) -> &ID {
        &self.id
    }
}
