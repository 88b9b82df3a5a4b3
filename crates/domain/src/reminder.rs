use serde::{Deserialize, Serialize};

/// A reminder slot configured on a `Task` or `CalendarEvent`, expressed
/// as a number of minutes before the trigger timestamp at which the
/// owner should be notified.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSetting {
    pub minutes_before: i64,
}

impl ReminderSetting {
    // This isnt ideal at all, shouldnt be possible to construct
    // this type if it is not valid, but for now it is good enough
    pub fn is_valid(&self) -> bool {
        self.minutes_before >= 0 && self.minutes_before <= 60 * 24 * 7
    }
}

/// Identifies which of the two independent reminder slots on a `Task`
/// is being queried or marked. A `CalendarEvent` only has the start slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskReminderChannel {
    /// Fires some minutes before the task `start_ts`
    Start,
    /// Fires some minutes before the task `due_ts`
    Due,
}

const MILLIS_PER_MINUTE: i64 = 1000 * 60;

/// Decides whether a reminder channel is due at `now`.
///
/// The channel is due iff the trigger is strictly in the future and falls
/// inside the look-ahead window opened by the configured offset:
/// `now < trigger_ts <= now + minutes_before`. Triggers already in the
/// past never fire retroactively. A channel without a trigger or without
/// a configured offset is never due.
///
/// Callers poll this once per tick (one minute in the default
/// configuration). A window narrower than the tick gap can be skipped
/// entirely, which is an accepted precision trade-off of polling.
pub fn reminder_is_due(now: i64, trigger_ts: Option<i64>, reminder: Option<&ReminderSetting>) -> bool {
    let (trigger_ts, reminder) = match (trigger_ts, reminder) {
        (Some(trigger_ts), Some(reminder)) => (trigger_ts, reminder),
        _ => return false,
    };

    trigger_ts > now && trigger_ts <= now + reminder.minutes_before * MILLIS_PER_MINUTE
}
