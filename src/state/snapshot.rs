//! The display model shared by the overlay page and every stream subscriber.

use indexmap::IndexMap;
use serde::Serialize;
use utoipa::ToSchema;

/// Icon used for every challenge that has no icon configured.
pub const FALLBACK_ICON: &str = "https://minecraft.wiki/images/Invicon_Grass_Block.png";

/// Title shown until the first update arrives.
const PLACEHOLDER_TITLE: &str = "Progress Tracker";

/// Fully resolved, display-ready challenge tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AugmentedChallenge {
    pub done: bool,
    pub name: String,
    pub icon: String,
    pub description: String,
    /// Owning team name, empty when unassigned.
    pub team: String,
    /// Color of the owning team, empty when unassigned.
    pub team_color: String,
}

/// A team with its resolved display color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Team {
    pub name: String,
    pub color: String,
}

/// Complete overlay state: rendered on page load and pushed to live subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Snapshot {
    pub title: String,
    #[schema(value_type = Object)]
    pub challenges: IndexMap<String, AugmentedChallenge>,
    /// Exactly two teams, or `null` when no valid team list was supplied.
    pub teams: Option<Vec<Team>>,
}

impl Snapshot {
    /// Demo state served before any writer has pushed an update.
    pub fn placeholder() -> Self {
        let challenges = [
            ("setup", true),
            ("design", false),
            ("frontend", false),
            ("backend", true),
            ("testing", false),
            ("deployment", false),
            ("documentation", false),
            ("review", false),
        ]
        .into_iter()
        .map(|(id, done)| {
            let challenge = AugmentedChallenge {
                done,
                name: crate::services::augmentation::title_case(id),
                icon: FALLBACK_ICON.to_string(),
                description: String::new(),
                team: String::new(),
                team_color: String::new(),
            };
            (id.to_string(), challenge)
        })
        .collect();

        Self {
            title: PLACEHOLDER_TITLE.to_string(),
            challenges,
            teams: None,
        }
    }

    /// Serialise the snapshot into the JSON payload used on the wire.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::placeholder()
    }
}
