use axum::routing::{get, post};
use axum::Router;

use crate::handlers::garden;
use crate::state::AppState;

/// Whole-garden routes.
///
/// ```text
/// GET  /garden         -> get_garden
/// POST /seed-defaults  -> seed_defaults
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/garden", get(garden::get_garden))
        .route("/seed-defaults", post(garden::seed_defaults))
}
