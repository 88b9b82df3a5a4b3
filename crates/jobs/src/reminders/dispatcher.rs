use futures::future::join_all;
use plando_domain::ID;
use plando_infra::{Context, PushNotification};
use tracing::warn;

/// Per-device outcome of one fan-out. Failed deliveries are lost on
/// purpose: duplicate delivery is considered worse than occasional
/// silent loss, so nothing here is retried.
#[derive(Debug, Default, PartialEq)]
pub struct DispatchReport {
    pub attempted: usize,
    pub delivered: usize,
    pub failed: usize,
}

/// Fans a notification out to every device the user has registered.
///
/// A user without devices is a no-op, not an error. Every device is
/// attempted independently: one endpoint failing must not block delivery
/// to the others, so deliveries run concurrently and results are
/// collected afterwards.
pub async fn dispatch_to_user(
    ctx: &Context,
    user_id: &ID,
    notification: &PushNotification,
) -> DispatchReport {
    let devices = ctx.repos.devices.find_by_user(user_id).await;
    if devices.is_empty() {
        return DispatchReport::default();
    }

    let deliveries = devices
        .iter()
        .map(|device| ctx.push.send(device, notification));
    let results = join_all(deliveries).await;

    let mut report = DispatchReport {
        attempted: devices.len(),
        ..Default::default()
    };
    for (device, result) in devices.iter().zip(results) {
        match result {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                report.failed += 1;
                warn!(
                    "Failed to deliver notification to endpoint: {} for user: {}. Error: {:?}",
                    device.endpoint, user_id, e
                );
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_context, RecordingPushTransport};
    use plando_domain::{PushDevice, PushKeys};
    use std::sync::Arc;

    fn device(user_id: &ID, endpoint: &str) -> PushDevice {
        PushDevice::new(
            user_id.clone(),
            endpoint,
            PushKeys {
                p256dh: "p256dh-key".into(),
                auth: "auth-key".into(),
            },
        )
    }

    #[tokio::test]
    async fn zero_devices_is_a_noop() {
        let transport = Arc::new(RecordingPushTransport::default());
        let ctx = test_context(0, transport.clone());

        let report = dispatch_to_user(
            &ctx,
            &ID::new(),
            &PushNotification::new("t".into(), "b".into(), "/".into()),
        )
        .await;

        assert_eq!(report, DispatchReport::default());
        assert!(transport.attempts().is_empty());
    }

    #[tokio::test]
    async fn one_failing_device_does_not_block_the_others() {
        let transport = Arc::new(RecordingPushTransport::failing_for(&["endpoint-2"]));
        let ctx = test_context(0, transport.clone());
        let user_id = ID::new();
        for endpoint in &["endpoint-1", "endpoint-2", "endpoint-3"] {
            ctx.repos
                .devices
                .insert(&device(&user_id, endpoint))
                .await
                .unwrap();
        }

        let report = dispatch_to_user(
            &ctx,
            &user_id,
            &PushNotification::new("t".into(), "b".into(), "/".into()),
        )
        .await;

        assert_eq!(report.attempted, 3);
        assert_eq!(report.delivered, 2);
        assert_eq!(report.failed, 1);
        // Every endpoint was attempted, including the failing one
        assert_eq!(transport.attempts().len(), 3);
    }

    #[tokio::test]
    async fn does_not_deliver_to_other_users_devices() {
        let transport = Arc::new(RecordingPushTransport::default());
        let ctx = test_context(0, transport.clone());
        let user_id = ID::new();
        let other_user_id = ID::new();
        ctx.repos
            .devices
            .insert(&device(&user_id, "mine"))
            .await
            .unwrap();
        ctx.repos
            .devices
            .insert(&device(&other_user_id, "theirs"))
            .await
            .unwrap();

        let report = dispatch_to_user(
            &ctx,
            &user_id,
            &PushNotification::new("t".into(), "b".into(), "/".into()),
        )
        .await;

        assert_eq!(report.attempted, 1);
        assert_eq!(transport.attempts(), vec!["mine".to_string()]);
    }
}
