use super::IWorkspaceRepo;
use crate::repos::shared::inmemory_repo::*;
use plando_domain::{Workspace, ID};

pub struct InMemoryWorkspaceRepo {
    workspaces: std::sync::Mutex<Vec<Workspace>>,
}

impl InMemoryWorkspaceRepo {
    pub fn new() -> Self {
        Self {
            workspaces: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IWorkspaceRepo for InMemoryWorkspaceRepo {
    async fn insert(&self, workspace: &Workspace) -> anyhow::Result<()> {
        insert(workspace, &self.workspaces);
        Ok(())
    }

    async fn find(&self, workspace_id: &ID) -> Option<Workspace> {
        find(workspace_id, &self.workspaces)
    }

    async fn delete(&self, workspace_id: &ID) -> Option<Workspace> {
        delete(workspace_id, &self.workspaces)
    }
}
