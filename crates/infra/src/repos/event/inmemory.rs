use super::IEventRepo;
use crate::repos::shared::inmemory_repo::*;
use anyhow::anyhow;
use plando_domain::{CalendarEvent, ID};

pub struct InMemoryEventRepo {
    events: std::sync::Mutex<Vec<CalendarEvent>>,
}

impl InMemoryEventRepo {
    pub fn new() -> Self {
        Self {
            events: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IEventRepo for InMemoryEventRepo {
    async fn insert(&self, event: &CalendarEvent) -> anyhow::Result<()> {
        insert(event, &self.events);
        Ok(())
    }

    async fn save(&self, event: &CalendarEvent) -> anyhow::Result<()> {
        save(event, &self.events);
        Ok(())
    }

    async fn find(&self, event_id: &ID) -> Option<CalendarEvent> {
        find(event_id, &self.events)
    }

    async fn find_reminder_candidates(&self, now: i64) -> Vec<CalendarEvent> {
        find_by(&self.events, |event: &CalendarEvent| {
            !event.reminder_sent && event.reminder.is_some() && event.start_ts > now
        })
    }

    async fn mark_reminder_sent(&self, event_id: &ID) -> anyhow::Result<()> {
        let updated = update_one(event_id, &self.events, |event: &mut CalendarEvent| {
            event.reminder_sent = true
        });
        if updated {
            Ok(())
        } else {
            Err(anyhow!("Calendar event not found: {}", event_id))
        }
    }

    async fn find_by_google_event_id(&self, google_event_id: &str) -> Option<CalendarEvent> {
        find_by(&self.events, |event: &CalendarEvent| {
            event.google_event_id.as_deref() == Some(google_event_id)
        })
        .into_iter()
        .next()
    }

    async fn find_synced_by_workspace(&self, workspace_id: &ID) -> Vec<CalendarEvent> {
        find_by(&self.events, |event: &CalendarEvent| {
            event.is_from_google && &event.workspace_id == workspace_id
        })
    }

    async fn delete(&self, event_id: &ID) -> Option<CalendarEvent> {
        delete(event_id, &self.events)
    }
}
