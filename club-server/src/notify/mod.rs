//! Notification dispatcher
//!
//! Best-effort SMS-shaped confirmations. Delivery is never part of an
//! order's fate: the dispatcher returns whether an attempt was made, and
//! callers fire it on a detached task so a slow or dead gateway cannot
//! delay or fail a confirmed order.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

/// Outbound confirmation channel. Implementations must never error: a
/// failed delivery is reported as `false` and logged, nothing more.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Attempt to deliver `message` to `phone`. Returns whether a delivery
    /// attempt was actually made.
    async fn send_confirmation(&self, phone: &str, message: &str) -> bool;
}

/// POSTs confirmations to an HTTP SMS gateway as JSON `{to, message}`.
pub struct HttpNotifier {
    client: reqwest::Client,
    gateway_url: String,
}

impl HttpNotifier {
    pub fn new(gateway_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            client,
            gateway_url,
        }
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn send_confirmation(&self, phone: &str, message: &str) -> bool {
        let payload = serde_json::json!({
            "to": phone,
            "message": message,
        });

        match self.client.post(&self.gateway_url).json(&payload).send().await {
            Ok(resp) if resp.status().is_success() => {
                tracing::info!(phone = %phone, "Confirmation sent");
                true
            }
            Ok(resp) => {
                tracing::warn!(
                    phone = %phone,
                    status = %resp.status(),
                    "SMS gateway rejected confirmation"
                );
                true
            }
            Err(e) => {
                tracing::warn!(phone = %phone, error = %e, "Confirmation delivery failed");
                false
            }
        }
    }
}

/// Stand-in when no gateway is configured; logs the message and moves on.
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send_confirmation(&self, phone: &str, message: &str) -> bool {
        tracing::info!(phone = %phone, message = %message, "No SMS gateway configured, confirmation logged only");
        false
    }
}

/// Build the notifier from configuration.
pub fn from_gateway_url(gateway_url: Option<&str>) -> Arc<dyn Notifier> {
    match gateway_url {
        Some(url) if !url.is_empty() => Arc::new(HttpNotifier::new(url.to_string())),
        _ => Arc::new(NoopNotifier),
    }
}

/// Fire-and-forget dispatch on a detached task. The caller's response
/// never waits on the delivery outcome and never observes it.
pub fn dispatch(notifier: Arc<dyn Notifier>, phone: String, message: String) {
    tokio::spawn(async move {
        let attempted = notifier.send_confirmation(&phone, &message).await;
        tracing::debug!(phone = %phone, attempted, "Confirmation dispatch finished");
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub(crate) struct RecordingNotifier {
        pub sent: AtomicUsize,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send_confirmation(&self, _phone: &str, _message: &str) -> bool {
            self.sent.fetch_add(1, Ordering::SeqCst);
            true
        }
    }

    #[tokio::test]
    async fn test_noop_never_errors() {
        assert!(!NoopNotifier.send_confirmation("5551234", "hi").await);
    }

    #[tokio::test]
    async fn test_dispatch_is_detached() {
        let notifier = Arc::new(RecordingNotifier {
            sent: AtomicUsize::new(0),
        });
        dispatch(notifier.clone(), "5551234".into(), "hi".into());
        // Give the spawned task a moment to run
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(notifier.sent.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_from_gateway_url_fallback() {
        // No URL configured → noop; presence of a URL → HTTP notifier.
        // Both are valid `Arc<dyn Notifier>`s; nothing to assert beyond
        // construction not panicking.
        let _ = from_gateway_url(None);
        let _ = from_gateway_url(Some("http://localhost:9999/sms"));
    }
}
