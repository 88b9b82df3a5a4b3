mod job_schedulers;
mod reminders;
mod shared;
mod sync;

pub use job_schedulers::start_job_schedulers;
pub use reminders::{dispatch_to_user, DispatchReport, SendRemindersUseCase};
pub use shared::usecase::{execute, UseCase};
pub use sync::{DeleteEventUseCase, SyncGoogleEventsUseCase};

#[cfg(test)]
pub(crate) mod test_support;
