use crate::shared::usecase::UseCase;
use plando_domain::{CalendarEvent, ID};
use plando_infra::{Context, GoogleCalendarProvider};
use tracing::warn;

/// Deletes an event on the user's behalf. Mirrors are also removed
/// remotely on a best-effort basis: a provider 404/410 means the remote
/// side is already gone, and a failed remote delete never blocks the
/// local one.
#[derive(Debug)]
pub struct DeleteEventUseCase {
    pub event_id: ID,
    pub user_id: ID,
}

#[derive(Debug, thiserror::Error)]
pub enum UseCaseErrors {
    #[error("Event not found: {0}")]
    NotFound(ID),
}

#[async_trait::async_trait]
impl UseCase for DeleteEventUseCase {
    type Response = CalendarEvent;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "DeleteEvent";

    async fn execute(&mut self, ctx: &Context) -> Result<Self::Response, Self::Errors> {
        let event = ctx
            .repos
            .events
            .find(&self.event_id)
            .await
            .ok_or_else(|| UseCaseErrors::NotFound(self.event_id.clone()))?;

        let owned = match ctx.repos.workspaces.find(&event.workspace_id).await {
            Some(workspace) => workspace.owner_user_id == self.user_id,
            None => false,
        };
        if !owned {
            return Err(UseCaseErrors::NotFound(self.event_id.clone()));
        }

        if let Some(google_event_id) = event.google_event_id.as_deref() {
            delete_remote_event(&event, google_event_id, &self.user_id, ctx).await;
        }

        ctx.repos
            .events
            .delete(&self.event_id)
            .await
            .ok_or_else(|| UseCaseErrors::NotFound(self.event_id.clone()))
    }
}

async fn delete_remote_event(
    event: &CalendarEvent,
    google_event_id: &str,
    owner_user_id: &ID,
    ctx: &Context,
) {
    let mut connection = match ctx
        .repos
        .connections
        .find(owner_user_id, &event.workspace_id)
        .await
    {
        Some(connection) => connection,
        // Disconnected in the meantime; nothing left to clean up remotely
        None => return,
    };

    match GoogleCalendarProvider::new(&mut connection, ctx).await {
        Ok(provider) => {
            if let Err(e) = provider.delete_event(google_event_id).await {
                warn!(
                    "Unable to delete google event: {} remotely, proceeding with local delete. Error: {:?}",
                    google_event_id, e
                );
            }
        }
        Err(e) => {
            warn!(
                "No google calendar access for workspace: {}, proceeding with local delete. Error: {:?}",
                event.workspace_id, e
            );
        }
    }
}
