use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use plando_domain::CalendarEvent;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, warn};

// https://developers.google.com/calendar/v3/reference/events

const GOOGLE_API_BASE_URL: &str = "https://www.googleapis.com/calendar/v3";
const API_TIMEOUT: Duration = Duration::from_secs(30);

/// Either a date-only value (all-day events) or an RFC3339 timestamp,
/// exactly as the events resource represents it on the wire
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleEventDateTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl GoogleEventDateTime {
    pub fn from_timestamp_millis(timestamp: i64) -> Self {
        Self {
            date: None,
            date_time: Some(Utc.timestamp_millis(timestamp).to_rfc3339()),
            time_zone: Some("UTC".into()),
        }
    }

    /// Resolves to unix millis; all-day dates resolve to midnight UTC.
    /// Returns the timestamp together with whether it was date-only.
    pub fn get_timestamp_millis(&self) -> Option<(i64, bool)> {
        if let Some(date_time) = &self.date_time {
            return DateTime::parse_from_rfc3339(date_time)
                .ok()
                .map(|t| (t.timestamp_millis(), false));
        }
        if let Some(date) = &self.date {
            return NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .ok()
                .map(|d| (d.and_hms(0, 0, 0).timestamp_millis(), true));
        }
        None
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleCalendarEvent {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start: GoogleEventDateTime,
    #[serde(default)]
    pub end: GoogleEventDateTime,
}

/// The writable subset of the events resource, used for insert and patch
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleCalendarEventAttributes {
    pub summary: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start: GoogleEventDateTime,
    pub end: GoogleEventDateTime,
}

impl From<&CalendarEvent> for GoogleCalendarEventAttributes {
    fn from(event: &CalendarEvent) -> Self {
        Self {
            summary: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            start: GoogleEventDateTime::from_timestamp_millis(event.start_ts),
            end: GoogleEventDateTime::from_timestamp_millis(event.end_ts),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsResponse {
    #[serde(default)]
    pub items: Vec<GoogleCalendarEvent>,
}

pub struct GoogleCalendarRestApi {
    client: Client,
    access_token: String,
}

impl GoogleCalendarRestApi {
    pub fn new(access_token: String) -> Self {
        let client = Client::builder()
            .timeout(API_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            access_token,
        }
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, path: String) -> anyhow::Result<T> {
        match self
            .client
            .get(&format!("{}/{}", GOOGLE_API_BASE_URL, path))
            .header("authorization", format!("Bearer {}", self.access_token))
            .send()
            .await
        {
            Ok(res) => res.json::<T>().await.map_err(|e| {
                error!(
                    "[Unexpected Response] Google Calendar API GET error. Error message: {:?}",
                    e
                );
                anyhow::Error::new(e)
            }),
            Err(e) => {
                error!(
                    "[Network Error] Google Calendar API GET error. Error message: {:?}",
                    e
                );
                Err(anyhow::Error::new(e))
            }
        }
    }

    async fn post<T: for<'de> Deserialize<'de>>(
        &self,
        body: &impl Serialize,
        path: String,
    ) -> anyhow::Result<T> {
        match self
            .client
            .post(&format!("{}/{}", GOOGLE_API_BASE_URL, path))
            .header("authorization", format!("Bearer {}", self.access_token))
            .json(body)
            .send()
            .await
        {
            Ok(res) => res.json::<T>().await.map_err(|e| {
                error!(
                    "[Unexpected Response] Google Calendar API POST error. Error message: {:?}",
                    e
                );
                anyhow::Error::new(e)
            }),
            Err(e) => {
                error!(
                    "[Network Error] Google Calendar API POST error. Error message: {:?}",
                    e
                );
                Err(anyhow::Error::new(e))
            }
        }
    }

    async fn patch<T: for<'de> Deserialize<'de>>(
        &self,
        body: &impl Serialize,
        path: String,
    ) -> anyhow::Result<T> {
        match self
            .client
            .patch(&format!("{}/{}", GOOGLE_API_BASE_URL, path))
            .header("authorization", format!("Bearer {}", self.access_token))
            .json(body)
            .send()
            .await
        {
            Ok(res) => res.json::<T>().await.map_err(|e| {
                error!(
                    "[Unexpected Response] Google Calendar API PATCH error. Error message: {:?}",
                    e
                );
                anyhow::Error::new(e)
            }),
            Err(e) => {
                error!(
                    "[Network Error] Google Calendar API PATCH error. Error message: {:?}",
                    e
                );
                Err(anyhow::Error::new(e))
            }
        }
    }

    /// Deletes return an empty body; 404 and 410 mean the event is
    /// already gone remotely, which callers treat as success.
    async fn delete(&self, path: String) -> anyhow::Result<()> {
        let res = self
            .client
            .delete(&format!("{}/{}", GOOGLE_API_BASE_URL, path))
            .header("authorization", format!("Bearer {}", self.access_token))
            .send()
            .await
            .map_err(|e| {
                error!(
                    "[Network Error] Google Calendar API DELETE error. Error message: {:?}",
                    e
                );
                anyhow::Error::new(e)
            })?;

        match res.status() {
            StatusCode::NOT_FOUND | StatusCode::GONE => {
                warn!("Google Calendar API DELETE on already deleted resource. Treating as success.");
                Ok(())
            }
            status if status.is_success() => Ok(()),
            status => Err(anyhow::anyhow!(
                "Google Calendar API DELETE failed with status: {}",
                status
            )),
        }
    }

    pub async fn list_upcoming(
        &self,
        calendar_id: &str,
        time_min: GoogleEventDateTime,
        max_results: usize,
    ) -> anyhow::Result<ListEventsResponse> {
        let time_min = time_min.date_time.unwrap_or_default();
        self.get(format!(
            "calendars/{}/events?timeMin={}&maxResults={}&singleEvents=true&orderBy=startTime",
            calendar_id,
            urlencode(&time_min),
            max_results
        ))
        .await
    }

    pub async fn insert(
        &self,
        calendar_id: &str,
        body: &GoogleCalendarEventAttributes,
    ) -> anyhow::Result<GoogleCalendarEvent> {
        self.post(body, format!("calendars/{}/events", calendar_id))
            .await
    }

    pub async fn update(
        &self,
        calendar_id: &str,
        event_id: &str,
        body: &GoogleCalendarEventAttributes,
    ) -> anyhow::Result<GoogleCalendarEvent> {
        self.patch(body, format!("calendars/{}/events/{}", calendar_id, event_id))
            .await
    }

    pub async fn remove(&self, calendar_id: &str, event_id: &str) -> anyhow::Result<()> {
        self.delete(format!("calendars/{}/events/{}", calendar_id, event_id))
            .await
    }
}

// The only reserved characters appearing in RFC3339 timestamps are '+' and ':'
fn urlencode(value: &str) -> String {
    value.replace('+', "%2B").replace(':', "%3A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_rfc3339_datetimes() {
        let wire = GoogleEventDateTime {
            date: None,
            date_time: Some("2021-06-01T10:30:00+00:00".into()),
            time_zone: Some("UTC".into()),
        };
        let (ts, all_day) = wire.get_timestamp_millis().expect("Valid datetime");
        assert_eq!(ts, 1622543400000);
        assert!(!all_day);
    }

    #[test]
    fn resolves_date_only_values_to_midnight_utc() {
        let wire = GoogleEventDateTime {
            date: Some("2021-06-01".into()),
            date_time: None,
            time_zone: None,
        };
        let (ts, all_day) = wire.get_timestamp_millis().expect("Valid date");
        assert_eq!(ts, 1622505600000);
        assert!(all_day);
    }

    #[test]
    fn malformed_values_resolve_to_none() {
        let wire = GoogleEventDateTime {
            date: Some("June 1st".into()),
            date_time: None,
            time_zone: None,
        };
        assert!(wire.get_timestamp_millis().is_none());
        assert!(GoogleEventDateTime::default().get_timestamp_millis().is_none());
    }

    #[test]
    fn roundtrips_timestamps_through_the_wire_format() {
        let wire = GoogleEventDateTime::from_timestamp_millis(1622543400000);
        let (ts, all_day) = wire.get_timestamp_millis().expect("Valid datetime");
        assert_eq!(ts, 1622543400000);
        assert!(!all_day);
    }
}
