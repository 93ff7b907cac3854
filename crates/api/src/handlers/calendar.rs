//! Handlers for the calendar view.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use microgreens_core::error::CoreError;
use microgreens_core::lifecycle::parse_date;
use microgreens_core::views::{self, CalendarEvent};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::today;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /calendar`.
#[derive(Debug, Deserialize)]
pub struct CalendarRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// GET /api/v1/calendar?start=YYYY-MM-DD&end=YYYY-MM-DD
///
/// Events overlapping `[start, end)`. Each deployment is one all-day event
/// from its start date through its harvest date.
pub async fn list_events(
    State(state): State<AppState>,
    Query(range): Query<CalendarRange>,
) -> AppResult<impl IntoResponse> {
    let (Some(start), Some(end)) = (range.start, range.end) else {
        return Err(AppError::Core(CoreError::Validation(
            "start and end are required".into(),
        )));
    };
    let start = parse_date(&start)?;
    let end = parse_date(&end)?;

    let garden = state.engine.snapshot().await;
    let events = views::calendar_events(&garden, &state.config.garden.title_prefix, start, end);
    Ok(Json(DataResponse { data: events }))
}

/// Current state of the calendar entity.
#[derive(Debug, Serialize)]
pub struct CalendarState {
    pub entity_id: String,
    /// The next event that has not yet ended.
    pub event: Option<CalendarEvent>,
}

/// GET /api/v1/calendar/next
pub async fn next_event(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let garden = state.engine.snapshot().await;
    let settings = &state.config.garden;
    let event = views::next_calendar_event(&garden, &settings.title_prefix, today());
    Ok(Json(DataResponse {
        data: CalendarState {
            entity_id: settings.calendar_entity.clone(),
            event,
        },
    }))
}
