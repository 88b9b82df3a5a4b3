use crate::{
    reminders::SendRemindersUseCase, shared::usecase::execute, sync::SyncGoogleEventsUseCase,
};
use plando_infra::Context;
use std::time::Duration;
use tokio::time::{interval, sleep_until, Instant};

/// Starts the two periodic background jobs. They run for the process
/// lifetime; there is no overlap guard and no cancellation of an
/// in-flight tick, the next timer firing is what drives forward progress.
pub fn start_job_schedulers(ctx: Context) {
    start_send_reminders_job(ctx.clone());
    start_calendar_sync_job(ctx);
}

/// Seconds to wait so that the first tick lands `secs_before_min` seconds
/// before the next whole minute
pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

fn start_send_reminders_job(ctx: Context) {
    tokio::spawn(async move {
        // Align the tick to minute boundaries so that minute-granular
        // reminder offsets are evaluated at consistent instants
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);
        sleep_until(start).await;

        let mut minutely_interval =
            interval(Duration::from_secs(ctx.config.reminder_interval_secs));
        loop {
            minutely_interval.tick().await;
            let context = ctx.clone();
            tokio::spawn(async move {
                let _ = execute(SendRemindersUseCase, &context).await;
            });
        }
    });
}

fn start_calendar_sync_job(ctx: Context) {
    tokio::spawn(async move {
        let mut sync_interval =
            interval(Duration::from_secs(ctx.config.calendar_sync_interval_secs));
        loop {
            sync_interval.tick().await;
            // Runs inline: accounts sync sequentially within a tick and
            // a slow tick simply delays the next one
            let _ = execute(SyncGoogleEventsUseCase, &ctx).await;
        }
    });
}
