use plando_domain::{PushDevice, PushKeys};
use serde::Serialize;
use std::time::Duration;
use tracing::error;

const DEFAULT_ICON: &str = "/icons/icon-192.png";
const GATEWAY_TIMEOUT: Duration = Duration::from_secs(10);

/// What ends up on the user's screen
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PushNotification {
    pub title: String,
    pub body: String,
    pub link: String,
    pub icon: String,
}

impl PushNotification {
    pub fn new(title: String, body: String, link: String) -> Self {
        Self {
            title,
            body,
            link,
            icon: DEFAULT_ICON.into(),
        }
    }
}

/// Delivery capability for a single device endpoint. Implementations
/// report success or failure per call and never retry: the scan job
/// deliberately treats delivery as attempted, not guaranteed.
#[async_trait::async_trait]
pub trait IPushTransport: Send + Sync {
    async fn send(&self, device: &PushDevice, notification: &PushNotification)
        -> anyhow::Result<()>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WebPushSubscription<'a> {
    endpoint: &'a str,
    keys: &'a PushKeys,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PushGatewayRequest<'a> {
    subscription: WebPushSubscription<'a>,
    notification: &'a PushNotification,
}

/// Hands the encrypted-delivery work off to the push gateway service,
/// which holds the VAPID keys and talks to the browser push services.
pub struct HttpPushGateway {
    client: reqwest::Client,
    url: String,
}

impl HttpPushGateway {
    pub fn new(url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(GATEWAY_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait::async_trait]
impl IPushTransport for HttpPushGateway {
    async fn send(
        &self,
        device: &PushDevice,
        notification: &PushNotification,
    ) -> anyhow::Result<()> {
        let body = PushGatewayRequest {
            subscription: WebPushSubscription {
                endpoint: &device.endpoint,
                keys: &device.keys,
            },
            notification,
        };
        let res = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(
                    "[Network Error] Push gateway request failed for endpoint: {}. Error message: {:?}",
                    device.endpoint, e
                );
                anyhow::Error::new(e)
            })?;

        res.error_for_status()
            .map(|_| ())
            .map_err(|e| {
                error!(
                    "[Unexpected Response] Push gateway rejected delivery for endpoint: {}. Error message: {:?}",
                    device.endpoint, e
                );
                anyhow::Error::new(e)
            })
    }
}
