mod inmemory;

pub use inmemory::InMemoryAccountConnectionRepo;
use plando_domain::{GoogleAccountConnection, ID};

/// Stored OAuth credentials, keyed by (user, workspace). Created on
/// consent, saved back on every token refresh, deleted when the user
/// disconnects the integration.
#[async_trait::async_trait]
pub trait IAccountConnectionRepo: Send + Sync {
    async fn insert(&self, connection: &GoogleAccountConnection) -> anyhow::Result<()>;
    async fn save(&self, connection: &GoogleAccountConnection) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID, workspace_id: &ID) -> Option<GoogleAccountConnection>;
    /// Every connected account; the sync job iterates this list each tick
    async fn find_all(&self) -> Vec<GoogleAccountConnection>;
    async fn delete(&self, user_id: &ID, workspace_id: &ID) -> Option<GoogleAccountConnection>;
}
