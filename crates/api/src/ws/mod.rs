//! WebSocket stream of garden events.
//!
//! Presentation clients connect to `/api/v1/ws` and receive every
//! [`GardenEvent`](microgreens_events::GardenEvent) as a JSON text frame.

mod handler;

pub use handler::ws_handler;
