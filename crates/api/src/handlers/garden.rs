//! Handlers for whole-garden reads and maintenance.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/garden
///
/// The full garden: plots, profiles and deployments.
pub async fn get_garden(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let garden = state.engine.snapshot().await;
    Ok(Json(DataResponse { data: garden }))
}

/// POST /api/v1/seed-defaults
///
/// Re-run first-run seeding. Returns what was added.
pub async fn seed_defaults(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let report = state.engine.reseed_defaults().await?;
    Ok(Json(DataResponse { data: report }))
}
