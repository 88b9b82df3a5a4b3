mod inmemory;

pub use inmemory::InMemoryWorkspaceRepo;
use plando_domain::{Workspace, ID};

#[async_trait::async_trait]
pub trait IWorkspaceRepo: Send + Sync {
    async fn insert(&self, workspace: &Workspace) -> anyhow::Result<()>;
    async fn find(&self, workspace_id: &ID) -> Option<Workspace>;
    async fn delete(&self, workspace_id: &ID) -> Option<Workspace>;
}
