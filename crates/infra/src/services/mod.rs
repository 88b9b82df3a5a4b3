mod google_calendar;
mod push;

pub use google_calendar::{
    auth_provider, GoogleCalendarEvent, GoogleCalendarProvider, ListEventsResponse,
    RemoteCalendarEvent,
};
pub use push::{HttpPushGateway, IPushTransport, PushNotification};
