use std::sync::Arc;

use microgreens_events::EventBus;

use crate::config::ServerConfig;
use crate::engine::GardenEngine;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The garden lifecycle engine; sole writer of garden state.
    pub engine: Arc<GardenEngine>,
    pub config: Arc<ServerConfig>,
    /// Event bus the engine publishes on; WebSocket clients subscribe here.
    pub event_bus: Arc<EventBus>,
}
