use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the challenge overlay server.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::update::update_challenges,
        crate::routes::sse::stream,
        crate::routes::page::index,
        crate::routes::page::current_state,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::update::UpdateRequest,
            crate::dto::update::ChallengeInput,
            crate::dto::update::TeamInput,
            crate::dto::update::UpdateResponse,
            crate::state::Snapshot,
            crate::state::AugmentedChallenge,
            crate::state::Team,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "overlay", description = "Challenge state updates and overlay rendering"),
        (name = "sse", description = "Server-sent events stream"),
    )
)]
pub struct ApiDoc;
