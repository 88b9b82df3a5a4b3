use crate::shared::entity::{Entity, ID};

/// Tasks and events belong to a workspace; the workspace resolves to the
/// user that owns it and should receive its notifications.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub id: ID,
    pub owner_user_id: ID,
    pub name: String,
}

impl Workspace {
    pub fn new(owner_user_id: ID, name: &str) -> Self {
        Self {
            id: Default::default(),
            owner_user_id,
            name: name.into(),
        }
    }
}

impl Entity for Workspace {
    fn id(&self) -> &ID {
        &self.id
    }
}
