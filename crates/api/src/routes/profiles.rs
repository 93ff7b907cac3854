use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::profiles;
use crate::state::AppState;

/// Profile routes mounted at `/profiles`.
///
/// ```text
/// POST   /      -> upsert_profile
/// DELETE /{id}  -> delete_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(profiles::upsert_profile))
        .route("/{id}", delete(profiles::delete_profile))
}
