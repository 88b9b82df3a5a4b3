pub mod auth_provider;
mod calendar_api;

use crate::Context;
use calendar_api::{GoogleCalendarEventAttributes, GoogleCalendarRestApi, GoogleEventDateTime};
pub use calendar_api::{GoogleCalendarEvent, ListEventsResponse};
use plando_domain::{CalendarEvent, GoogleAccountConnection};
use tracing::warn;

// https://developers.google.com/calendar/v3/reference/events

// The integration always targets the account's primary calendar
const PRIMARY_CALENDAR_ID: &str = "primary";
// Upcoming-window fetch size; recurring events arrive pre-expanded into
// single occurrences
const UPCOMING_EVENTS_LIMIT: usize = 50;

/// A remote event mapped onto the local schema, ready to be upserted as a
/// mirror
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteCalendarEvent {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub start_ts: i64,
    pub end_ts: i64,
    pub all_day: bool,
}

impl RemoteCalendarEvent {
    /// Maps the wire representation onto the local schema. Events that no
    /// longer exist (cancelled) or carry unparseable times map to `None`
    /// and are skipped by the caller.
    pub fn from_google_event(event: &GoogleCalendarEvent) -> Option<Self> {
        if event.status.as_deref() == Some("cancelled") {
            return None;
        }
        let (start_ts, all_day) = match event.start.get_timestamp_millis() {
            Some(start) => start,
            None => {
                warn!(
                    "Skipping google event: {} with malformed start: {:?}",
                    event.id, event.start
                );
                return None;
            }
        };
        let (end_ts, _) = event.end.get_timestamp_millis().unwrap_or((start_ts, all_day));

        Some(Self {
            id: event.id.clone(),
            title: event.summary.clone().unwrap_or_default(),
            description: event.description.clone().unwrap_or_default(),
            location: event.location.clone(),
            start_ts,
            end_ts,
            all_day,
        })
    }
}

/// A Google Calendar client bound to one connected account. Construction
/// refreshes the stored credentials when needed.
pub struct GoogleCalendarProvider {
    api: GoogleCalendarRestApi,
}

impl GoogleCalendarProvider {
    pub async fn new(
        connection: &mut GoogleAccountConnection,
        ctx: &Context,
    ) -> anyhow::Result<Self> {
        let access_token = match auth_provider::get_access_token(connection, ctx).await {
            Some(token) => token,
            None => {
                return Err(anyhow::anyhow!(
                    "Unable to obtain google access token for user: {}",
                    connection.user_id
                ))
            }
        };
        Ok(Self {
            api: GoogleCalendarRestApi::new(access_token),
        })
    }

    /// The upcoming remote event set, from `now` forward. This fetch is
    /// authoritative: any local mirror missing from it has been deleted
    /// remotely.
    pub async fn list_upcoming_events(&self, now: i64) -> anyhow::Result<Vec<RemoteCalendarEvent>> {
        let res = self
            .api
            .list_upcoming(
                PRIMARY_CALENDAR_ID,
                GoogleEventDateTime::from_timestamp_millis(now),
                UPCOMING_EVENTS_LIMIT,
            )
            .await?;

        Ok(res
            .items
            .iter()
            .filter_map(RemoteCalendarEvent::from_google_event)
            .collect())
    }

    pub async fn create_event(&self, event: &CalendarEvent) -> anyhow::Result<GoogleCalendarEvent> {
        self.api
            .insert(PRIMARY_CALENDAR_ID, &GoogleCalendarEventAttributes::from(event))
            .await
    }

    pub async fn update_event(
        &self,
        google_event_id: &str,
        event: &CalendarEvent,
    ) -> anyhow::Result<GoogleCalendarEvent> {
        self.api
            .update(
                PRIMARY_CALENDAR_ID,
                google_event_id,
                &GoogleCalendarEventAttributes::from(event),
            )
            .await
    }

    /// Remote deletes treat 404/410 as success: the event being already
    /// gone is the desired end state.
    pub async fn delete_event(&self, google_event_id: &str) -> anyhow::Result<()> {
        self.api.remove(PRIMARY_CALENDAR_ID, google_event_id).await
    }
}
