use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::plots;
use crate::state::AppState;

/// Plot routes mounted at `/plots`.
///
/// ```text
/// GET    /               -> list_plots
/// POST   /               -> add_plot
/// GET    /{id}           -> get_plot
/// DELETE /{id}           -> remove_plot
/// PUT    /{id}/label     -> rename_plot
/// POST   /{id}/deploy    -> deploy
/// POST   /{id}/harvest   -> harvest
/// POST   /{id}/unassign  -> unassign
/// POST   /{id}/shift     -> shift_schedule
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(plots::list_plots).post(plots::add_plot))
        .route("/{id}", get(plots::get_plot).delete(plots::remove_plot))
        .route("/{id}/label", put(plots::rename_plot))
        .route("/{id}/deploy", post(plots::deploy))
        .route("/{id}/harvest", post(plots::harvest))
        .route("/{id}/unassign", post(plots::unassign))
        .route("/{id}/shift", post(plots::shift_schedule))
}
