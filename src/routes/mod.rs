use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::SharedState;

pub mod docs;
pub mod health;
pub mod page;
pub mod sse;
pub mod update;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(page::router())
        .merge(sse::router())
        .merge(update::router());

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}

/// Build the top-level router and attach cross-cutting middleware layers.
pub fn app(state: SharedState) -> Router<()> {
    router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
