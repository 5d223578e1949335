//! Payloads accepted and returned by the `/update` endpoint.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Full replacement of the overlay state pushed by the external writer.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRequest {
    pub title: String,
    #[schema(value_type = Object)]
    pub challenges: IndexMap<String, ChallengeInput>,
    /// Accepted only as an array of exactly two teams; any other value is ignored.
    #[serde(default)]
    #[schema(value_type = Option<Vec<TeamInput>>)]
    pub teams: Option<serde_json::Value>,
}

/// Transient per-update completion state of a single challenge.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ChallengeInput {
    pub done: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
}

/// Team as supplied by the writer; the color falls back to the default palette.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TeamInput {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// Acknowledgement returned once the new state has been applied and broadcast.
#[derive(Debug, Serialize, ToSchema)]
pub struct UpdateResponse {
    /// Always `"ok"`.
    pub status: String,
    pub message: String,
}

impl UpdateResponse {
    /// Successful update acknowledgement.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: "Challenge list updated.".to_string(),
        }
    }
}
