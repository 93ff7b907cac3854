//! Handlers for plots and their deployments.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use microgreens_core::error::CoreError;
use microgreens_core::views;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::today;
use crate::input::coerced_int;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct AddPlotRequest {
    #[serde(default)]
    pub plot_id: String,
    pub label: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RenamePlotRequest {
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Deserialize)]
pub struct DeployRequest {
    #[serde(default)]
    pub profile_id: String,
    #[serde(default)]
    pub start_date: String,
    pub sticker: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ShiftRequest {
    #[serde(default, deserialize_with = "coerced_int")]
    pub days: Option<i64>,
}

// ---------------------------------------------------------------------------
// Plot status
// ---------------------------------------------------------------------------

/// GET /api/v1/plots
///
/// Status of every plot for today.
pub async fn list_plots(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let garden = state.engine.snapshot().await;
    let statuses = views::plot_statuses(&garden, today());
    Ok(Json(DataResponse { data: statuses }))
}

/// GET /api/v1/plots/{id}
pub async fn get_plot(
    State(state): State<AppState>,
    Path(plot_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let garden = state.engine.snapshot().await;
    let status = views::plot_status(&garden, &plot_id, today()).ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Plot",
            id: plot_id.clone(),
        })
    })?;
    Ok(Json(DataResponse { data: status }))
}

// ---------------------------------------------------------------------------
// Plot actions
// ---------------------------------------------------------------------------

/// POST /api/v1/plots
///
/// Add a plot. Adding an existing id returns the existing plot unchanged.
pub async fn add_plot(
    State(state): State<AppState>,
    payload: Result<Json<AddPlotRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let plot = state
        .engine
        .add_plot(&input.plot_id, input.label.as_deref())
        .await?;
    Ok(Json(DataResponse { data: plot }))
}

/// DELETE /api/v1/plots/{id}
///
/// Remove a plot and its deployment. Removing an unknown plot succeeds.
pub async fn remove_plot(
    State(state): State<AppState>,
    Path(plot_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.engine.remove_plot(&plot_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/plots/{id}/label
pub async fn rename_plot(
    State(state): State<AppState>,
    Path(plot_id): Path<String>,
    payload: Result<Json<RenamePlotRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let plot = state.engine.rename_plot(&plot_id, &input.label).await?;
    Ok(Json(DataResponse { data: plot }))
}

// ---------------------------------------------------------------------------
// Deployment actions
// ---------------------------------------------------------------------------

/// POST /api/v1/plots/{id}/deploy
pub async fn deploy(
    State(state): State<AppState>,
    Path(plot_id): Path<String>,
    payload: Result<Json<DeployRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let deployment = state
        .engine
        .deploy(&plot_id, &input.profile_id, &input.start_date, input.sticker)
        .await?;
    Ok(Json(DataResponse { data: deployment }))
}

/// POST /api/v1/plots/{id}/harvest
///
/// Returns the cleared deployment, or `null` if the plot was empty.
pub async fn harvest(
    State(state): State<AppState>,
    Path(plot_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let cleared = state.engine.harvest(&plot_id).await?;
    Ok(Json(DataResponse { data: cleared }))
}

/// POST /api/v1/plots/{id}/unassign
pub async fn unassign(
    State(state): State<AppState>,
    Path(plot_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let cleared = state.engine.unassign(&plot_id).await?;
    Ok(Json(DataResponse { data: cleared }))
}

/// POST /api/v1/plots/{id}/shift
///
/// Move the plot's schedule by a signed number of days.
pub async fn shift_schedule(
    State(state): State<AppState>,
    Path(plot_id): Path<String>,
    payload: Result<Json<ShiftRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let days = input
        .days
        .ok_or_else(|| AppError::Core(CoreError::Validation("days is required".into())))?;
    let shifted = state.engine.shift_schedule(&plot_id, days).await?;
    Ok(Json(DataResponse { data: shifted }))
}
