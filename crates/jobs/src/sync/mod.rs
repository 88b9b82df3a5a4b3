mod delete_event;
mod sync_google_events;

pub use delete_event::DeleteEventUseCase;
pub use sync_google_events::SyncGoogleEventsUseCase;
