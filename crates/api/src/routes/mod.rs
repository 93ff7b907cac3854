pub mod garden;
pub mod health;
pub mod plots;
pub mod profiles;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                              WebSocket stream of garden events
///
/// /garden                          full garden (GET)
/// /seed-defaults                   reseed default plots and profiles (POST)
///
/// /calendar?start=&end=            calendar events in range (GET)
/// /calendar/next                   next upcoming event (GET)
///
/// /plots                           list statuses, add plot
/// /plots/{id}                      status, remove
/// /plots/{id}/label                rename (PUT)
/// /plots/{id}/deploy               deploy a profile (POST)
/// /plots/{id}/harvest              harvest (POST)
/// /plots/{id}/unassign             unassign (POST)
/// /plots/{id}/shift                shift schedule (POST)
///
/// /profiles                        upsert profile (POST)
/// /profiles/{id}                   delete profile (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .merge(garden::router())
        .route("/calendar", get(handlers::calendar::list_events))
        .route("/calendar/next", get(handlers::calendar::next_event))
        .nest("/plots", plots::router())
        .nest("/profiles", profiles::router())
}
