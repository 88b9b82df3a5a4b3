mod dispatcher;
mod send_reminders;

pub use dispatcher::{dispatch_to_user, DispatchReport};
pub use send_reminders::SendRemindersUseCase;
