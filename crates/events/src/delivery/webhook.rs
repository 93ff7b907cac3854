//! Webhook notification channels with exponential-backoff retry.
//!
//! [`WebhookRegistry`] maps channel names under one provider to URLs and
//! delivers a [`Notification`] as a JSON `{title, message}` POST. Failed
//! attempts are retried three times with backoff (1 s, 2 s, 4 s).

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use super::{DeliveryError, Notification, NotifyRegistry};

/// Retry delays in seconds (exponential backoff: 1s, 2s, 4s).
const RETRY_DELAYS_SECS: [u64; 3] = [1, 2, 4];

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Notification channels backed by webhook URLs.
pub struct WebhookRegistry {
    client: reqwest::Client,
    provider: String,
    channels: HashMap<String, String>,
}

impl WebhookRegistry {
    /// Create an empty registry for `provider` with a pre-configured client.
    pub fn new(provider: impl Into<String>) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            provider: provider.into(),
            channels: HashMap::new(),
        })
    }

    /// Register (or replace) a named channel.
    pub fn with_channel(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.channels.insert(name.into(), url.into());
        self
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Execute a single POST request and check the response status.
    async fn try_send(&self, url: &str, payload: &serde_json::Value) -> Result<(), DeliveryError> {
        let response = self.client.post(url).json(payload).send().await?;
        if !response.status().is_success() {
            return Err(DeliveryError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl NotifyRegistry for WebhookRegistry {
    fn has_channel(&self, provider: &str, name: &str) -> bool {
        provider == self.provider && self.channels.contains_key(name)
    }

    async fn send(
        &self,
        provider: &str,
        name: &str,
        notification: &Notification,
    ) -> Result<(), DeliveryError> {
        let url = match self.channels.get(name) {
            Some(url) if provider == self.provider => url,
            _ => return Err(DeliveryError::UnknownChannel(format!("{provider}.{name}"))),
        };
        let payload = serde_json::json!({
            "title": notification.title,
            "message": notification.message,
        });

        let mut last_err: Option<DeliveryError> = None;

        for (attempt, delay_secs) in RETRY_DELAYS_SECS.iter().enumerate() {
            match self.try_send(url, &payload).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        channel = name,
                        error = %e,
                        "Webhook delivery attempt failed, retrying"
                    );
                    last_err = Some(e);
                    tokio::time::sleep(Duration::from_secs(*delay_secs)).await;
                }
            }
        }

        // Final attempt after the last backoff.
        match self.try_send(url, &payload).await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::error!(channel = name, error = %e, "Webhook delivery failed after all retries");
                Err(last_err.unwrap_or(e))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> WebhookRegistry {
        WebhookRegistry::new("notify")
            .unwrap()
            .with_channel("phone", "http://127.0.0.1:9/phone")
    }

    #[test]
    fn has_channel_checks_provider_and_name() {
        let registry = registry();
        assert!(registry.has_channel("notify", "phone"));
        assert!(!registry.has_channel("notify", "tablet"));
        assert!(!registry.has_channel("persistent", "phone"));
        assert_eq!(registry.channel_count(), 1);
    }

    #[test]
    fn with_channel_replaces_existing_url() {
        let registry = registry().with_channel("phone", "http://127.0.0.1:9/other");
        assert_eq!(registry.channel_count(), 1);
        assert_eq!(registry.channels["phone"], "http://127.0.0.1:9/other");
    }

    #[tokio::test]
    async fn send_to_unknown_channel_fails_without_request() {
        let notification = Notification {
            title: "Microgreens".into(),
            message: "No phase changes today.".into(),
        };
        let err = registry()
            .send("notify", "tablet", &notification)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Notification channel notify.tablet is not registered");
    }

    #[test]
    fn http_status_error_display() {
        assert_eq!(DeliveryError::HttpStatus(502).to_string(), "Channel returned HTTP 502");
    }
}
