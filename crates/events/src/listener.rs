//! Event logging service.
//!
//! [`EventLogger`] subscribes to the [`EventBus`](crate::bus::EventBus) and
//! traces every [`GardenEvent`] it receives. It runs as a long-lived
//! background task and stops when the bus is dropped.

use tokio::sync::broadcast;

use crate::bus::GardenEvent;

/// Background service that records garden events in the trace log.
pub struct EventLogger;

impl EventLogger {
    /// Run the logging loop until the channel closes.
    pub async fn run(mut receiver: broadcast::Receiver<GardenEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => Self::record(&event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Event logger lagged, some events were not logged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, event logger shutting down");
                    break;
                }
            }
        }
    }

    fn record(event: &GardenEvent) {
        match event {
            GardenEvent::DataUpdated => tracing::debug!("Garden data updated"),
            GardenEvent::PlotAdded(plot_id) => tracing::info!(plot_id = %plot_id, "Plot added"),
            GardenEvent::PlotRemoved(plot_id) => {
                tracing::info!(plot_id = %plot_id, "Plot removed")
            }
        }
    }
}
