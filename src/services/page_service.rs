//! Rendering of the overlay page with the current snapshot embedded for first paint.

use crate::{error::AppError, state::SharedState};

/// Line of the page template replaced with the current snapshot.
pub const INITIAL_STATE_PLACEHOLDER: &str = "const initialChallengeState = {};";

/// Render the overlay page from the snapshot current at call time.
pub async fn render_page(state: &SharedState) -> Result<String, AppError> {
    let snapshot = state.current_snapshot().await;
    let json = snapshot
        .to_json()
        .map_err(|err| AppError::Internal(format!("failed to serialise snapshot: {err}")))?;
    Ok(embed_state(state.page_template(), &json))
}

/// Substitute the initial-state placeholder with `json`, keeping it safe inside `<script>`.
pub fn embed_state(template: &str, json: &str) -> String {
    let escaped = json.replace("</", "<\\/");
    template.replace(
        INITIAL_STATE_PLACEHOLDER,
        &format!("const initialChallengeState = {escaped};"),
    )
}
