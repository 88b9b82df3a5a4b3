mod account;
mod device;
mod event;
mod reminder;
mod shared;
mod task;
mod workspace;

pub use account::GoogleAccountConnection;
pub use device::{PushDevice, PushKeys};
pub use event::CalendarEvent;
pub use reminder::{reminder_is_due, ReminderSetting, TaskReminderChannel};
pub use shared::entity::{Entity, ID};
pub use task::{Task, TaskPriority};
pub use workspace::Workspace;
