use plando_domain::PushDevice;
use plando_infra::{
    Config, Context, FixedTimeSys, IPushTransport, PushNotification, Repos,
};
use std::sync::{Arc, Mutex};

/// An in-memory context frozen at `now_millis`
pub fn test_context(now_millis: i64, push: Arc<dyn IPushTransport>) -> Context {
    Context {
        repos: Repos::create_inmemory(),
        config: Config::new(),
        sys: Arc::new(FixedTimeSys(now_millis)),
        push,
    }
}

/// Push transport that records every attempted delivery and can be told
/// to fail for specific endpoints
#[derive(Default)]
pub struct RecordingPushTransport {
    attempts: Mutex<Vec<String>>,
    sent: Mutex<Vec<(String, PushNotification)>>,
    failing_endpoints: Vec<String>,
}

impl RecordingPushTransport {
    pub fn failing_for(endpoints: &[&str]) -> Self {
        Self {
            failing_endpoints: endpoints.iter().map(|e| e.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<(String, PushNotification)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl IPushTransport for RecordingPushTransport {
    async fn send(
        &self,
        device: &PushDevice,
        notification: &PushNotification,
    ) -> anyhow::Result<()> {
        self.attempts.lock().unwrap().push(device.endpoint.clone());
        if self.failing_endpoints.contains(&device.endpoint) {
            return Err(anyhow::anyhow!("Simulated delivery failure"));
        }
        self.sent
            .lock()
            .unwrap()
            .push((device.endpoint.clone(), notification.clone()));
        Ok(())
    }
}
