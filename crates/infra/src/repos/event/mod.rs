mod inmemory;

pub use inmemory::InMemoryEventRepo;
use plando_domain::{CalendarEvent, ID};

#[async_trait::async_trait]
pub trait IEventRepo: Send + Sync {
    async fn insert(&self, event: &CalendarEvent) -> anyhow::Result<()>;
    async fn save(&self, event: &CalendarEvent) -> anyhow::Result<()>;
    async fn find(&self, event_id: &ID) -> Option<CalendarEvent>;
    /// Events with a configured reminder, an unset sent flag and a start
    /// still in the future at `now`
    async fn find_reminder_candidates(&self, now: i64) -> Vec<CalendarEvent>;
    /// Flips the sent flag to true; must happen even when delivery failed
    async fn mark_reminder_sent(&self, event_id: &ID) -> anyhow::Result<()>;
    /// The local mirror of a remote event, if one exists. At most one
    /// mirror exists per remote event id.
    async fn find_by_google_event_id(&self, google_event_id: &str) -> Option<CalendarEvent>;
    /// All mirrors (`is_from_google == true`) in a workspace; the
    /// deletion-reconciliation candidate set
    async fn find_synced_by_workspace(&self, workspace_id: &ID) -> Vec<CalendarEvent>;
    async fn delete(&self, event_id: &ID) -> Option<CalendarEvent>;
}
