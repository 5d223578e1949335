use axum::{Json, Router, body::Bytes, extract::State, routing::post};

use crate::{
    dto::update::{UpdateRequest, UpdateResponse},
    error::AppError,
    services::update_service,
    state::SharedState,
};

#[utoipa::path(
    method(post, put),
    path = "/update",
    tag = "overlay",
    request_body = UpdateRequest,
    responses(
        (status = 200, description = "Challenge list replaced and broadcast", body = UpdateResponse),
        (status = 400, description = "Body is not an object, lacks required keys or is malformed")
    )
)]
/// Replace the whole overlay state and push it to every connected viewer.
///
/// The raw body is taken so that each kind of malformed input maps to its own message.
pub async fn update_challenges(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<UpdateResponse>, AppError> {
    let response = update_service::apply_update(&state, &body).await?;
    Ok(Json(response))
}

/// Configure the update endpoint.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/update", post(update_challenges).put(update_challenges))
}
