use super::IAccountConnectionRepo;
use plando_domain::{GoogleAccountConnection, ID};
use std::sync::Mutex;

pub struct InMemoryAccountConnectionRepo {
    connections: Mutex<Vec<GoogleAccountConnection>>,
}

impl InMemoryAccountConnectionRepo {
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(Vec::new()),
        }
    }
}

// Connections are keyed by the (user, workspace) pair rather than an id
// of their own, so the shared inmemory helpers do not apply here.
#[async_trait::async_trait]
impl IAccountConnectionRepo for InMemoryAccountConnectionRepo {
    async fn insert(&self, connection: &GoogleAccountConnection) -> anyhow::Result<()> {
        let mut connections = self.connections.lock().unwrap();
        connections.push(connection.clone());
        Ok(())
    }

    async fn save(&self, connection: &GoogleAccountConnection) -> anyhow::Result<()> {
        let mut connections = self.connections.lock().unwrap();
        for stored in connections.iter_mut() {
            if stored.user_id == connection.user_id && stored.workspace_id == connection.workspace_id
            {
                *stored = connection.clone();
            }
        }
        Ok(())
    }

    async fn find(&self, user_id: &ID, workspace_id: &ID) -> Option<GoogleAccountConnection> {
        let connections = self.connections.lock().unwrap();
        connections
            .iter()
            .find(|c| &c.user_id == user_id && &c.workspace_id == workspace_id)
            .cloned()
    }

    async fn find_all(&self) -> Vec<GoogleAccountConnection> {
        let connections = self.connections.lock().unwrap();
        connections.clone()
    }

    async fn delete(&self, user_id: &ID, workspace_id: &ID) -> Option<GoogleAccountConnection> {
        let mut connections = self.connections.lock().unwrap();
        let pos = connections
            .iter()
            .position(|c| &c.user_id == user_id && &c.workspace_id == workspace_id)?;
        Some(connections.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection(user_id: &ID, workspace_id: &ID) -> GoogleAccountConnection {
        GoogleAccountConnection {
            user_id: user_id.clone(),
            workspace_id: workspace_id.clone(),
            access_token: "access".into(),
            access_token_expires_ts: 0,
            refresh_token: "refresh".into(),
        }
    }

    #[tokio::test]
    async fn save_replaces_the_connection_for_the_same_account_key() {
        let repo = InMemoryAccountConnectionRepo::new();
        let user_id = ID::new();
        let workspace_id = ID::new();
        let mut stored = connection(&user_id, &workspace_id);
        repo.insert(&stored).await.unwrap();

        stored.access_token = "rotated".into();
        repo.save(&stored).await.unwrap();

        let found = repo.find(&user_id, &workspace_id).await.unwrap();
        assert_eq!(found.access_token, "rotated");
        assert_eq!(repo.find_all().await.len(), 1);
    }

    #[tokio::test]
    async fn disconnect_removes_only_that_account() {
        let repo = InMemoryAccountConnectionRepo::new();
        let user_id = ID::new();
        let workspace_a = ID::new();
        let workspace_b = ID::new();
        repo.insert(&connection(&user_id, &workspace_a)).await.unwrap();
        repo.insert(&connection(&user_id, &workspace_b)).await.unwrap();

        assert!(repo.delete(&user_id, &workspace_a).await.is_some());
        assert!(repo.find(&user_id, &workspace_a).await.is_none());
        assert!(repo.find(&user_id, &workspace_b).await.is_some());
    }
}
