use axum::{Json, Router, extract::State, response::Html, routing::get};

use crate::{
    error::AppError,
    services::page_service,
    state::{SharedState, Snapshot},
};

#[utoipa::path(
    get,
    path = "/",
    tag = "overlay",
    responses((status = 200, description = "Overlay page with the current state embedded", content_type = "text/html", body = String))
)]
/// Serve the overlay page.
pub async fn index(State(state): State<SharedState>) -> Result<Html<String>, AppError> {
    Ok(Html(page_service::render_page(&state).await?))
}

#[utoipa::path(
    get,
    path = "/state",
    tag = "overlay",
    responses((status = 200, description = "Current snapshot", body = Snapshot))
)]
/// Return the snapshot currently shown by the overlay.
pub async fn current_state(State(state): State<SharedState>) -> Json<Snapshot> {
    let snapshot = state.current_snapshot().await;
    Json(Snapshot::clone(&snapshot))
}

/// Configure the page routes.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new()
        .route("/", get(index))
        .route("/state", get(current_state))
}
