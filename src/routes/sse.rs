use std::convert::Infallible;

use axum::{Router, extract::State, response::sse::Sse, routing::get};
use futures::Stream;

use crate::{services::sse_service, state::SharedState};

#[utoipa::path(
    get,
    path = "/stream",
    tag = "sse",
    responses((status = 200, description = "Overlay snapshot stream", content_type = "text/event-stream", body = String))
)]
/// Stream every published snapshot to the connected overlay.
pub async fn stream(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = Result<axum::response::sse::Event, Infallible>>> {
    sse_service::open_stream(&state)
}

/// Configure the SSE endpoint.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/stream", get(stream))
}
