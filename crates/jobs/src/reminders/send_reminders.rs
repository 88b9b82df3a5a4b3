use crate::reminders::dispatcher::dispatch_to_user;
use crate::shared::usecase::UseCase;
use anyhow::{anyhow, Context as AnyhowContext};
use plando_domain::{
    reminder_is_due, CalendarEvent, Task, TaskPriority, TaskReminderChannel,
};
use plando_infra::{Context, PushNotification};
use tracing::{error, info};

/// One tick of the reminder scan: fetch candidates, evaluate their
/// windows, dispatch what is due and flip the sent flags.
#[derive(Debug)]
pub struct SendRemindersUseCase;

#[derive(Debug)]
pub enum UseCaseErrors {}

#[derive(Debug, Default, PartialEq)]
pub struct RemindersSummary {
    pub events_notified: usize,
    pub tasks_notified: usize,
    pub entities_failed: usize,
}

const MILLIS_PER_MINUTE: i64 = 1000 * 60;

fn minutes_until(now: i64, trigger_ts: i64) -> i64 {
    // Round up so "59 seconds left" reads as one minute, not zero
    (trigger_ts - now + MILLIS_PER_MINUTE - 1) / MILLIS_PER_MINUTE
}

fn event_notification(event: &CalendarEvent, minutes_left: i64) -> PushNotification {
    PushNotification::new(
        format!("📅 {}", event.title),
        format!("Starts in {} min", minutes_left),
        "/calendar".into(),
    )
}

fn task_notification(task: &Task, channel: TaskReminderChannel, minutes_left: i64) -> PushNotification {
    // Higher priority gets more urgent copy; a presentation choice only
    let prefix = match task.priority {
        TaskPriority::Urgent => "🔥",
        TaskPriority::High => "⚠️",
        TaskPriority::Medium | TaskPriority::Low => "⏰",
    };
    let body = match channel {
        TaskReminderChannel::Start => format!("Starts in {} min", minutes_left),
        TaskReminderChannel::Due => format!("Only {} min left", minutes_left),
    };
    PushNotification::new(
        format!("{} {}", prefix, task.title),
        body,
        format!("/tasks/{}", task.id),
    )
}

async fn notify_event(event: &CalendarEvent, now: i64, ctx: &Context) -> anyhow::Result<()> {
    let workspace = ctx
        .repos
        .workspaces
        .find(&event.workspace_id)
        .await
        .ok_or_else(|| {
            anyhow!(
                "Workspace: {} not found for event: {}",
                event.workspace_id,
                event.id
            )
        })?;

    let notification = event_notification(event, minutes_until(now, event.start_ts));
    // Delivery is attempted, not guaranteed: the sent flag is written
    // below no matter what happened per device
    dispatch_to_user(ctx, &workspace.owner_user_id, &notification).await;

    ctx.repos
        .events
        .mark_reminder_sent(&event.id)
        .await
        .context("Marking event reminder as sent")
}

async fn notify_task(
    task: &Task,
    channel: TaskReminderChannel,
    now: i64,
    ctx: &Context,
) -> anyhow::Result<()> {
    let workspace = ctx
        .repos
        .workspaces
        .find(&task.workspace_id)
        .await
        .ok_or_else(|| {
            anyhow!(
                "Workspace: {} not found for task: {}",
                task.workspace_id,
                task.id
            )
        })?;

    let (trigger_ts, _) = task.reminder_channel(channel);
    let trigger_ts = trigger_ts.ok_or_else(|| anyhow!("Candidate task without trigger"))?;
    let notification = task_notification(task, channel, minutes_until(now, trigger_ts));
    dispatch_to_user(ctx, &workspace.owner_user_id, &notification).await;

    ctx.repos
        .tasks
        .mark_reminder_sent(&task.id, channel)
        .await
        .context("Marking task reminder as sent")
}

#[async_trait::async_trait]
impl UseCase for SendRemindersUseCase {
    type Response = RemindersSummary;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "SendReminders";

    /// This will run every minute
    async fn execute(&mut self, ctx: &Context) -> Result<Self::Response, Self::Errors> {
        let now = ctx.sys.get_timestamp_millis();
        let mut summary = RemindersSummary::default();

        // A failure on one entity must never abort the rest of the batch,
        // the next candidate is always processed.

        for event in ctx.repos.events.find_reminder_candidates(now).await {
            if !reminder_is_due(now, Some(event.start_ts), event.reminder.as_ref()) {
                continue;
            }
            match notify_event(&event, now, ctx).await {
                Ok(()) => summary.events_notified += 1,
                Err(e) => {
                    summary.entities_failed += 1;
                    error!("Unable to process reminder for event: {}. Error: {:?}", event.id, e);
                }
            }
        }

        for &channel in &[TaskReminderChannel::Start, TaskReminderChannel::Due] {
            for task in ctx.repos.tasks.find_reminder_candidates(channel).await {
                let (trigger_ts, reminder) = task.reminder_channel(channel);
                if !reminder_is_due(now, trigger_ts, reminder) {
                    continue;
                }
                match notify_task(&task, channel, now, ctx).await {
                    Ok(()) => summary.tasks_notified += 1,
                    Err(e) => {
                        summary.entities_failed += 1;
                        error!(
                            "Unable to process reminder for task: {}. Error: {:?}",
                            task.id, e
                        );
                    }
                }
            }
        }

        if summary.events_notified > 0 || summary.tasks_notified > 0 {
            info!(
                "Reminder scan notified {} events and {} tasks",
                summary.events_notified, summary.tasks_notified
            );
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::usecase::execute;
    use crate::test_support::{test_context, RecordingPushTransport};
    use plando_domain::{PushDevice, PushKeys, ReminderSetting, Workspace, ID};
    use std::sync::Arc;

    const NOW: i64 = 1613862000000; // Sun Feb 21 2021 00:00:00 GMT+0100

    async fn insert_owner(ctx: &Context) -> (ID, ID) {
        let user_id = ID::new();
        let workspace = Workspace::new(user_id.clone(), "Personal");
        let workspace_id = workspace.id.clone();
        ctx.repos.workspaces.insert(&workspace).await.unwrap();
        ctx.repos
            .devices
            .insert(&PushDevice::new(
                user_id.clone(),
                "device-endpoint",
                PushKeys {
                    p256dh: "p256dh-key".into(),
                    auth: "auth-key".into(),
                },
            ))
            .await
            .unwrap();
        (user_id, workspace_id)
    }

    fn task_with_start_reminder(workspace_id: &ID, start_in_min: i64, offset_min: i64) -> Task {
        let mut task = Task::new(workspace_id.clone(), "Write report");
        task.start_ts = Some(NOW + start_in_min * MILLIS_PER_MINUTE);
        task.reminder = Some(ReminderSetting {
            minutes_before: offset_min,
        });
        task
    }

    #[tokio::test]
    async fn task_inside_window_is_notified_exactly_once() {
        let transport = Arc::new(RecordingPushTransport::default());
        let ctx = test_context(NOW, transport.clone());
        let (_, workspace_id) = insert_owner(&ctx).await;
        let task = task_with_start_reminder(&workspace_id, 10, 15);
        let task_id = task.id.clone();
        ctx.repos.tasks.insert(&task).await.unwrap();

        let summary = execute(SendRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(summary.tasks_notified, 1);
        assert_eq!(summary.entities_failed, 0);
        assert_eq!(transport.sent().len(), 1);
        assert!(ctx.repos.tasks.find(&task_id).await.unwrap().reminder_sent);

        // Re-running the same tick immediately must not re-dispatch
        let summary = execute(SendRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(summary.tasks_notified, 0);
        assert_eq!(transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn task_outside_window_stays_a_candidate() {
        let transport = Arc::new(RecordingPushTransport::default());
        let ctx = test_context(NOW, transport.clone());
        let (_, workspace_id) = insert_owner(&ctx).await;
        // Starts in 30 minutes with a 15 minute offset: not yet due
        let task = task_with_start_reminder(&workspace_id, 30, 15);
        let task_id = task.id.clone();
        ctx.repos.tasks.insert(&task).await.unwrap();

        let summary = execute(SendRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(summary.tasks_notified, 0);
        assert!(transport.sent().is_empty());
        assert!(!ctx.repos.tasks.find(&task_id).await.unwrap().reminder_sent);
    }

    #[tokio::test]
    async fn both_task_channels_fire_independently() {
        let transport = Arc::new(RecordingPushTransport::default());
        let ctx = test_context(NOW, transport.clone());
        let (_, workspace_id) = insert_owner(&ctx).await;
        let mut task = task_with_start_reminder(&workspace_id, 10, 15);
        task.due_ts = Some(NOW + 20 * MILLIS_PER_MINUTE);
        task.due_reminder = Some(ReminderSetting { minutes_before: 30 });
        let task_id = task.id.clone();
        ctx.repos.tasks.insert(&task).await.unwrap();

        let summary = execute(SendRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(summary.tasks_notified, 2);
        let stored = ctx.repos.tasks.find(&task_id).await.unwrap();
        assert!(stored.reminder_sent);
        assert!(stored.due_reminder_sent);

        let sent = transport.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].1.body, "Starts in 10 min");
        assert_eq!(sent[1].1.body, "Only 20 min left");
    }

    #[tokio::test]
    async fn event_reminder_marks_sent_even_when_every_delivery_fails() {
        let transport = Arc::new(RecordingPushTransport::failing_for(&["device-endpoint"]));
        let ctx = test_context(NOW, transport.clone());
        let (_, workspace_id) = insert_owner(&ctx).await;
        let mut event = CalendarEvent::new(
            workspace_id.clone(),
            "Dentist",
            NOW + 5 * MILLIS_PER_MINUTE,
            NOW + 35 * MILLIS_PER_MINUTE,
        );
        event.reminder = Some(ReminderSetting { minutes_before: 10 });
        let event_id = event.id.clone();
        ctx.repos.events.insert(&event).await.unwrap();

        let summary = execute(SendRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(summary.events_notified, 1);
        assert_eq!(transport.attempts().len(), 1);
        assert!(transport.sent().is_empty());
        // At-most-once: the flag is set regardless of delivery outcome
        assert!(ctx.repos.events.find(&event_id).await.unwrap().reminder_sent);
    }

    #[tokio::test]
    async fn broken_entity_does_not_abort_the_batch() {
        let transport = Arc::new(RecordingPushTransport::default());
        let ctx = test_context(NOW, transport.clone());
        let (_, workspace_id) = insert_owner(&ctx).await;

        // This task points at a workspace that does not exist
        let orphan = task_with_start_reminder(&ID::new(), 5, 15);
        ctx.repos.tasks.insert(&orphan).await.unwrap();
        let healthy = task_with_start_reminder(&workspace_id, 5, 15);
        ctx.repos.tasks.insert(&healthy).await.unwrap();

        let summary = execute(SendRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(summary.entities_failed, 1);
        assert_eq!(summary.tasks_notified, 1);
        assert_eq!(transport.sent().len(), 1);
    }

    #[test]
    fn urgent_tasks_get_more_urgent_copy() {
        let mut task = Task::new(ID::new(), "Pay rent");
        task.priority = TaskPriority::Urgent;
        let notification = task_notification(&task, TaskReminderChannel::Due, 15);
        assert_eq!(notification.title, "🔥 Pay rent");
        assert_eq!(notification.body, "Only 15 min left");

        task.priority = TaskPriority::Low;
        let notification = task_notification(&task, TaskReminderChannel::Start, 15);
        assert_eq!(notification.title, "⏰ Pay rent");
        assert_eq!(notification.body, "Starts in 15 min");
    }

    #[test]
    fn minutes_left_rounds_up() {
        assert_eq!(minutes_until(0, MILLIS_PER_MINUTE), 1);
        assert_eq!(minutes_until(0, MILLIS_PER_MINUTE - 1), 1);
        assert_eq!(minutes_until(0, MILLIS_PER_MINUTE + 1), 2);
    }
}
