//! Notification channels.
//!
//! Jobs address a channel by a `provider.name` target (for example
//! `notify.family_phone`). A [`NotifyRegistry`] knows which channels exist
//! and how to deliver to them; [`Notifier`] binds a registry to the
//! configured target and never lets a delivery problem escape.

pub mod webhook;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A message handed to a notification channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

/// A parsed `provider.name` channel identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyTarget {
    pub provider: String,
    pub name: String,
}

impl NotifyTarget {
    /// Split a `provider.name` identifier. Both halves must be non-empty.
    pub fn parse(target: &str) -> Option<Self> {
        let (provider, name) = target.trim().split_once('.')?;
        if provider.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self {
            provider: provider.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for NotifyTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.provider, self.name)
    }
}

/// Failure to hand a notification to its channel.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("Notification channel {0} is not registered")]
    UnknownChannel(String),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Channel returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// NotifyRegistry
// ---------------------------------------------------------------------------

/// The set of notification channels available to jobs.
#[async_trait]
pub trait NotifyRegistry: Send + Sync {
    fn has_channel(&self, provider: &str, name: &str) -> bool;

    async fn send(
        &self,
        provider: &str,
        name: &str,
        notification: &Notification,
    ) -> Result<(), DeliveryError>;
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

/// Sends job notifications to one configured target.
#[derive(Clone)]
pub struct Notifier {
    registry: Arc<dyn NotifyRegistry>,
    target: String,
}

impl Notifier {
    pub fn new(registry: Arc<dyn NotifyRegistry>, target: impl Into<String>) -> Self {
        Self {
            registry,
            target: target.into(),
        }
    }

    /// Deliver a notification, returning whether it was handed off.
    ///
    /// A malformed target, an unknown channel, or a delivery error is logged
    /// and reported as `false`.
    pub async fn notify(&self, title: &str, message: &str) -> bool {
        let Some(target) = NotifyTarget::parse(&self.target) else {
            tracing::warn!(target = %self.target, "Invalid notify service, expected provider.name");
            return false;
        };

        if !self.registry.has_channel(&target.provider, &target.name) {
            tracing::warn!(target = %target, "Notify service not found, skipping notification");
            return false;
        }

        let notification = Notification {
            title: title.to_string(),
            message: message.to_string(),
        };

        match self
            .registry
            .send(&target.provider, &target.name, &notification)
            .await
        {
            Ok(()) => {
                tracing::info!(target = %target, "Notification sent");
                true
            }
            Err(e) => {
                tracing::error!(target = %target, error = %e, "Notification delivery failed");
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        fail: bool,
        sent: Mutex<Vec<(String, Notification)>>,
    }

    #[async_trait]
    impl NotifyRegistry for Recorder {
        fn has_channel(&self, provider: &str, name: &str) -> bool {
            provider == "notify" && name == "phone"
        }

        async fn send(
            &self,
            provider: &str,
            name: &str,
            notification: &Notification,
        ) -> Result<(), DeliveryError> {
            if self.fail {
                return Err(DeliveryError::HttpStatus(503));
            }
            self.sent
                .lock()
                .unwrap()
                .push((format!("{provider}.{name}"), notification.clone()));
            Ok(())
        }
    }

    #[test]
    fn parse_splits_on_first_dot() {
        let target = NotifyTarget::parse("notify.mobile_app.phone").unwrap();
        assert_eq!(target.provider, "notify");
        assert_eq!(target.name, "mobile_app.phone");
        assert_eq!(target.to_string(), "notify.mobile_app.phone");
    }

    #[test]
    fn parse_rejects_malformed_targets() {
        assert_eq!(NotifyTarget::parse("notify"), None);
        assert_eq!(NotifyTarget::parse(".phone"), None);
        assert_eq!(NotifyTarget::parse("notify."), None);
        assert_eq!(NotifyTarget::parse(""), None);
    }

    #[tokio::test]
    async fn notify_sends_to_known_channel() {
        let registry = Arc::new(Recorder::default());
        let notifier = Notifier::new(registry.clone(), "notify.phone");

        assert!(notifier.notify("Microgreens", "Water today: A1 (Rukola)").await);

        let sent = registry.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "notify.phone");
        assert_eq!(sent[0].1.message, "Water today: A1 (Rukola)");
    }

    #[tokio::test]
    async fn notify_skips_unknown_or_malformed_target() {
        let registry = Arc::new(Recorder::default());

        assert!(!Notifier::new(registry.clone(), "notify.tablet").notify("t", "m").await);
        assert!(!Notifier::new(registry.clone(), "garbage").notify("t", "m").await);
        assert!(registry.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn delivery_errors_are_swallowed() {
        let registry = Arc::new(Recorder {
            fail: true,
            ..Recorder::default()
        });
        let notifier = Notifier::new(registry, "notify.phone");
        assert!(!notifier.notify("t", "m").await);
    }
}
