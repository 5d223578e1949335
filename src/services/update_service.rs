//! Validation and application of full-state updates pushed by the external writer.

use serde_json::Value;
use tracing::{debug, info};

use crate::{
    dto::update::{TeamInput, UpdateRequest, UpdateResponse},
    error::ServiceError,
    services::augmentation::{self, TEAM_COUNT},
    state::{MetadataStore, SharedState, Snapshot, Team},
};

/// Decode `body`, rebuild the snapshot and broadcast it.
///
/// The current snapshot is left untouched whenever an error is returned.
pub async fn apply_update(
    state: &SharedState,
    body: &[u8],
) -> Result<UpdateResponse, ServiceError> {
    let request = parse_request(body)?;
    let snapshot = build_snapshot(request, state.metadata())?;
    let challenges = snapshot.challenges.len();
    let delivered = state.replace_snapshot(snapshot).await?;
    info!(challenges, delivered, "challenge list updated");
    Ok(UpdateResponse::ok())
}

/// Check the overall shape of the body before decoding it into an [`UpdateRequest`].
pub fn parse_request(body: &[u8]) -> Result<UpdateRequest, ServiceError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|err| ServiceError::Malformed(err.to_string()))?;
    let Value::Object(fields) = &value else {
        return Err(ServiceError::NotAnObject);
    };
    if !fields.contains_key("title") || !fields.contains_key("challenges") {
        return Err(ServiceError::MissingFields);
    }

    serde_json::from_value(value).map_err(|err| ServiceError::Malformed(err.to_string()))
}

/// Run augmentation over a decoded request to produce the next snapshot.
pub fn build_snapshot(
    request: UpdateRequest,
    metadata: &MetadataStore,
) -> Result<Snapshot, ServiceError> {
    let teams = accepted_teams(request.teams)?;
    let challenges = augmentation::augment(&request.challenges, teams.as_deref(), metadata);
    Ok(Snapshot {
        title: request.title,
        challenges,
        teams,
    })
}

/// Only an array of exactly [`TEAM_COUNT`] entries is a team list; anything else means no teams.
fn accepted_teams(raw: Option<Value>) -> Result<Option<Vec<Team>>, ServiceError> {
    match raw {
        Some(Value::Array(entries)) if entries.len() == TEAM_COUNT => {
            let inputs: Vec<TeamInput> = serde_json::from_value(Value::Array(entries))
                .map_err(|err| ServiceError::Malformed(err.to_string()))?;
            Ok(Some(augmentation::resolve_teams(&inputs)))
        }
        Some(other) => {
            debug!(teams = %other, "ignoring team list that is not exactly two entries");
            Ok(None)
        }
        None => Ok(None),
    }
}
