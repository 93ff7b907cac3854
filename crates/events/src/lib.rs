//! Microgreens event bus and notification delivery.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`, carrying [`GardenEvent`]s to presentation
//!   consumers.
//! - [`EventLogger`]: background listener that traces every event.
//! - [`delivery`]: notification channels: the [`NotifyRegistry`] contract,
//!   the [`Notifier`] used by scheduled jobs, and the webhook-backed
//!   [`WebhookRegistry`].

pub mod bus;
pub mod delivery;
pub mod listener;

pub use bus::{EventBus, GardenEvent};
pub use delivery::webhook::WebhookRegistry;
pub use delivery::{DeliveryError, Notification, Notifier, NotifyRegistry, NotifyTarget};
pub use listener::EventLogger;
