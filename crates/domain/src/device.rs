use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// Web push delivery keys negotiated when the browser registered the
/// subscription
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushKeys {
    pub p256dh: String,
    pub auth: String,
}

/// One registered push endpoint for a user. A user can have any number of
/// devices and there is no ordering or priority among them: a reminder
/// fans out to all of them.
#[derive(Debug, Clone)]
pub struct PushDevice {
    pub id: ID,
    pub user_id: ID,
    pub endpoint: String,
    pub keys: PushKeys,
}

impl PushDevice {
    pub fn new(user_id: ID, endpoint: &str, keys: PushKeys) -> Self {
        Self {
            id: Default::default(),
            user_id,
            endpoint: endpoint.into(),
            keys,
        }
    }
}

impl Entity for PushDevice {
    fn id(&self) -> &ID {
        &self.id
    }
}
