mod inmemory;

pub use inmemory::InMemoryDeviceRepo;
use plando_domain::{PushDevice, ID};

#[async_trait::async_trait]
pub trait IDeviceRepo: Send + Sync {
    async fn insert(&self, device: &PushDevice) -> anyhow::Result<()>;
    /// Every registered endpoint for the user. An empty list is a normal
    /// state, not an error: dispatch becomes a no-op.
    async fn find_by_user(&self, user_id: &ID) -> Vec<PushDevice>;
    async fn delete(&self, device_id: &ID) -> Option<PushDevice>;
}
