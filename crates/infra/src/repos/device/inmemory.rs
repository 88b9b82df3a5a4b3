use super::IDeviceRepo;
use crate::repos::shared::inmemory_repo::*;
use plando_domain::{PushDevice, ID};

pub struct InMemoryDeviceRepo {
    devices: std::sync::Mutex<Vec<PushDevice>>,
}

impl InMemoryDeviceRepo {
    pub fn new() -> Self {
        Self {
            devices: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IDeviceRepo for InMemoryDeviceRepo {
    async fn insert(&self, device: &PushDevice) -> anyhow::Result<()> {
        insert(device, &self.devices);
        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<PushDevice> {
        find_by(&self.devices, |device: &PushDevice| {
            &device.user_id == user_id
        })
    }

    async fn delete(&self, device_id: &ID) -> Option<PushDevice> {
        delete(device_id, &self.devices)
    }
}
