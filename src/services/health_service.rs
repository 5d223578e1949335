use crate::{dto::health::HealthResponse, state::SharedState};

/// Report liveness along with the number of connected overlay viewers.
pub fn health_status(state: &SharedState) -> HealthResponse {
    HealthResponse::ok(state.sse().subscriber_count())
}
