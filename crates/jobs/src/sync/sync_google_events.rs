use crate::shared::usecase::UseCase;
use plando_domain::{CalendarEvent, GoogleAccountConnection, ID};
use plando_infra::{Context, GoogleCalendarProvider, RemoteCalendarEvent};
use std::collections::HashSet;
use tracing::{error, info, warn};

/// One tick of the calendar reconciliation: for every connected account,
/// pull the upcoming remote event set, upsert mirrors and delete the
/// mirrors whose remote counterpart has vanished.
///
/// The remote provider is authoritative for mirrored events. This engine
/// only pulls; local edits are pushed inline by the write path.
#[derive(Debug)]
pub struct SyncGoogleEventsUseCase;

#[derive(Debug)]
pub enum UseCaseErrors {}

#[derive(Debug, Default, PartialEq)]
pub struct SyncSummary {
    pub accounts_synced: usize,
    pub accounts_failed: usize,
}

#[async_trait::async_trait]
impl UseCase for SyncGoogleEventsUseCase {
    type Response = SyncSummary;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "SyncGoogleEvents";

    async fn execute(&mut self, ctx: &Context) -> Result<Self::Response, Self::Errors> {
        let mut summary = SyncSummary::default();

        // One account with expired or revoked credentials must not stop
        // the remaining accounts from syncing
        for mut connection in ctx.repos.connections.find_all().await {
            match sync_account(&mut connection, ctx).await {
                Ok(()) => summary.accounts_synced += 1,
                Err(e) => {
                    summary.accounts_failed += 1;
                    warn!(
                        "Calendar sync failed for user: {} workspace: {}. Error: {:?}",
                        connection.user_id, connection.workspace_id, e
                    );
                }
            }
        }

        Ok(summary)
    }
}

async fn sync_account(
    connection: &mut GoogleAccountConnection,
    ctx: &Context,
) -> anyhow::Result<()> {
    let provider = GoogleCalendarProvider::new(connection, ctx).await?;
    let now = ctx.sys.get_timestamp_millis();
    let remote_events = provider.list_upcoming_events(now).await?;
    reconcile_remote_events(&connection.workspace_id, &remote_events, ctx).await
}

/// Makes the workspace's mirrors match a freshly fetched remote event
/// set, including deletions. Only runs against a complete fetch: a failed
/// fetch never reaches this point, so mirrors are never deleted on the
/// basis of a partial remote view.
pub(crate) async fn reconcile_remote_events(
    workspace_id: &ID,
    remote_events: &[RemoteCalendarEvent],
    ctx: &Context,
) -> anyhow::Result<()> {
    let mut remote_ids = HashSet::with_capacity(remote_events.len());
    for remote in remote_events {
        remote_ids.insert(remote.id.as_str());
        if let Err(e) = upsert_mirror(workspace_id, remote, ctx).await {
            error!(
                "Unable to upsert mirror for google event: {}. Error: {:?}",
                remote.id, e
            );
        }
    }

    // Deletion reconciliation: a mirror must never outlive its remote
    // counterpart. Local-only events are not candidates here.
    for mirror in ctx.repos.events.find_synced_by_workspace(workspace_id).await {
        let google_event_id = match &mirror.google_event_id {
            Some(id) => id,
            None => {
                error!(
                    "Event: {} is flagged as synced but has no google event id. Skipping.",
                    mirror.id
                );
                continue;
            }
        };
        if !remote_ids.contains(google_event_id.as_str()) {
            ctx.repos.events.delete(&mirror.id).await;
            info!(
                "Deleted local mirror: {} of remotely removed google event: {}",
                mirror.id, google_event_id
            );
        }
    }

    Ok(())
}

fn apply_remote(event: &mut CalendarEvent, remote: &RemoteCalendarEvent) -> bool {
    let changed = event.title != remote.title
        || event.description != remote.description
        || event.location != remote.location
        || event.start_ts != remote.start_ts
        || event.end_ts != remote.end_ts
        || event.all_day != remote.all_day;

    event.title = remote.title.clone();
    event.description = remote.description.clone();
    event.location = remote.location.clone();
    event.start_ts = remote.start_ts;
    event.end_ts = remote.end_ts;
    event.all_day = remote.all_day;

    changed
}

async fn upsert_mirror(
    workspace_id: &ID,
    remote: &RemoteCalendarEvent,
    ctx: &Context,
) -> anyhow::Result<()> {
    match ctx.repos.events.find_by_google_event_id(&remote.id).await {
        Some(mut existing) => {
            // Save only when something actually changed so that an
            // unchanged remote set syncs without local writes
            if apply_remote(&mut existing, remote) {
                ctx.repos.events.save(&existing).await?;
            }
            Ok(())
        }
        None => {
            let mut event =
                CalendarEvent::new(workspace_id.clone(), &remote.title, remote.start_ts, remote.end_ts);
            apply_remote(&mut event, remote);
            event.google_event_id = Some(remote.id.clone());
            event.is_from_google = true;
            ctx.repos.events.insert(&event).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_context, RecordingPushTransport};
    use plando_domain::Entity;
    use std::sync::Arc;

    fn remote(id: &str, title: &str) -> RemoteCalendarEvent {
        RemoteCalendarEvent {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            location: None,
            start_ts: 1000 * 60 * 60,
            end_ts: 1000 * 60 * 120,
            all_day: false,
        }
    }

    fn ctx() -> Context {
        test_context(0, Arc::new(RecordingPushTransport::default()))
    }

    #[tokio::test]
    async fn inserts_new_mirrors_for_unknown_remote_events() {
        let ctx = ctx();
        let workspace_id = ID::new();

        reconcile_remote_events(&workspace_id, &[remote("g1", "Standup")], &ctx)
            .await
            .unwrap();

        let mirror = ctx
            .repos
            .events
            .find_by_google_event_id("g1")
            .await
            .expect("Mirror inserted");
        assert!(mirror.is_from_google);
        assert_eq!(mirror.workspace_id, workspace_id);
        assert_eq!(mirror.title, "Standup");
        assert!(!mirror.reminder_sent);
    }

    #[tokio::test]
    async fn updates_existing_mirrors_in_place() {
        let ctx = ctx();
        let workspace_id = ID::new();
        reconcile_remote_events(&workspace_id, &[remote("g1", "Standup")], &ctx)
            .await
            .unwrap();
        let first = ctx.repos.events.find_by_google_event_id("g1").await.unwrap();

        reconcile_remote_events(&workspace_id, &[remote("g1", "Renamed standup")], &ctx)
            .await
            .unwrap();

        let second = ctx.repos.events.find_by_google_event_id("g1").await.unwrap();
        // Same local record, updated fields; no duplicate mirror
        assert_eq!(second.id, first.id);
        assert_eq!(second.title, "Renamed standup");
        assert_eq!(
            ctx.repos.events.find_synced_by_workspace(&workspace_id).await.len(),
            1
        );
    }

    #[tokio::test]
    async fn sync_is_idempotent_for_an_unchanged_remote_set() {
        let ctx = ctx();
        let workspace_id = ID::new();
        let remote_events = vec![remote("g1", "Standup"), remote("g2", "Retro")];

        reconcile_remote_events(&workspace_id, &remote_events, &ctx)
            .await
            .unwrap();
        let after_first: Vec<_> = ctx
            .repos
            .events
            .find_synced_by_workspace(&workspace_id)
            .await
            .iter()
            .map(|e| (e.id().clone(), e.title.clone(), e.start_ts))
            .collect();

        reconcile_remote_events(&workspace_id, &remote_events, &ctx)
            .await
            .unwrap();
        let after_second: Vec<_> = ctx
            .repos
            .events
            .find_synced_by_workspace(&workspace_id)
            .await
            .iter()
            .map(|e| (e.id().clone(), e.title.clone(), e.start_ts))
            .collect();

        assert_eq!(after_first, after_second);
    }

    #[tokio::test]
    async fn deletes_the_mirror_of_a_remotely_removed_event() {
        let ctx = ctx();
        let workspace_id = ID::new();

        // A local-only event in the same workspace must never be touched
        let local_only = CalendarEvent::new(workspace_id.clone(), "My own plans", 0, 1000);
        let local_only_id = local_only.id.clone();
        ctx.repos.events.insert(&local_only).await.unwrap();

        reconcile_remote_events(
            &workspace_id,
            &[remote("g123", "Doomed"), remote("g2", "Kept")],
            &ctx,
        )
        .await
        .unwrap();

        // Second fetch no longer contains g123
        reconcile_remote_events(&workspace_id, &[remote("g2", "Kept")], &ctx)
            .await
            .unwrap();

        assert!(ctx.repos.events.find_by_google_event_id("g123").await.is_none());
        assert!(ctx.repos.events.find_by_google_event_id("g2").await.is_some());
        assert!(ctx.repos.events.find(&local_only_id).await.is_some());
    }

    #[tokio::test]
    async fn does_not_delete_mirrors_of_other_workspaces() {
        let ctx = ctx();
        let workspace_a = ID::new();
        let workspace_b = ID::new();
        reconcile_remote_events(&workspace_a, &[remote("a1", "A's event")], &ctx)
            .await
            .unwrap();

        // Workspace B's fetch is empty; A's mirror must survive
        reconcile_remote_events(&workspace_b, &[], &ctx).await.unwrap();

        assert!(ctx.repos.events.find_by_google_event_id("a1").await.is_some());
    }
}
