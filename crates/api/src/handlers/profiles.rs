//! Handlers for plant profiles.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use microgreens_core::error::CoreError;
use microgreens_core::lifecycle::ProfileInput;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::input::coerced_int;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpsertProfileRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "coerced_int")]
    pub cover_days: Option<i64>,
    #[serde(default, deserialize_with = "coerced_int")]
    pub uncover_days: Option<i64>,
    #[serde(default, deserialize_with = "coerced_int")]
    pub watering_frequency_days: Option<i64>,
    pub notes: Option<String>,
}

impl UpsertProfileRequest {
    fn into_input(self) -> Result<ProfileInput, CoreError> {
        let required = |value: Option<i64>, field: &str| {
            value.ok_or_else(|| CoreError::Validation(format!("{field} is required")))
        };
        Ok(ProfileInput {
            cover_days: required(self.cover_days, "cover_days")?,
            uncover_days: required(self.uncover_days, "uncover_days")?,
            id: self.id,
            name: self.name,
            watering_frequency_days: self.watering_frequency_days,
            notes: self.notes,
        })
    }
}

/// POST /api/v1/profiles
///
/// Create a profile or replace the one with the same id.
pub async fn upsert_profile(
    State(state): State<AppState>,
    payload: Result<Json<UpsertProfileRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(request) = payload?;
    let input = request.into_input().map_err(AppError::Core)?;
    let profile = state.engine.upsert_profile(input).await?;
    Ok(Json(DataResponse { data: profile }))
}

/// DELETE /api/v1/profiles/{id}
///
/// Deleting an unknown profile succeeds.
pub async fn delete_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.engine.delete_profile(&profile_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
