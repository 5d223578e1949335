//! Merge of caller-supplied challenge state with the static metadata table.
//!
//! Everything in here is pure: the same inputs and metadata always produce the same output.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::{
    dto::update::{ChallengeInput, TeamInput},
    state::{AugmentedChallenge, FALLBACK_ICON, MetadataStore, Team},
};

/// Colors assigned by position to teams that do not specify one.
pub const DEFAULT_TEAM_COLORS: [&str; 2] = ["#e74c3c", "#3498db"];

/// Number of teams a valid team list must contain.
pub const TEAM_COUNT: usize = 2;

/// Title-case the first character and lower-case the rest of the whole string.
pub fn title_case(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => {
            let mut out = title_case_char(first);
            out.extend(chars.flat_map(char::to_lowercase));
            out
        }
        None => String::new(),
    }
}

/// Titlecase form of a single character.
///
/// Digraph letters have a dedicated titlecase code point; for characters whose upper-case
/// mapping expands (`ß` -> `SS`) only the leading letter stays upper-case.
fn title_case_char(c: char) -> String {
    match c {
        'Ǆ' | 'ǅ' | 'ǆ' => "ǅ".to_string(),
        'Ǉ' | 'ǈ' | 'ǉ' => "ǈ".to_string(),
        'Ǌ' | 'ǋ' | 'ǌ' => "ǋ".to_string(),
        'Ǳ' | 'ǲ' | 'ǳ' => "ǲ".to_string(),
        _ => {
            let mut upper = c.to_uppercase();
            let mut out = String::new();
            out.extend(upper.next());
            out.extend(upper.flat_map(char::to_lowercase));
            out
        }
    }
}

/// Part of the identifier after the last `:`, or the whole identifier.
pub fn display_name(id: &str) -> &str {
    id.rsplit_once(':').map_or(id, |(_, name)| name)
}

/// Resolve the team colors, falling back to [`DEFAULT_TEAM_COLORS`] by position.
pub fn resolve_teams(teams: &[TeamInput]) -> Vec<Team> {
    teams
        .iter()
        .enumerate()
        .map(|(index, team)| {
            let color = team
                .color
                .as_deref()
                .filter(|color| !color.is_empty())
                .or_else(|| DEFAULT_TEAM_COLORS.get(index).copied())
                .unwrap_or_default();
            Team {
                name: team.name.clone(),
                color: color.to_string(),
            }
        })
        .collect()
}

/// Build the display model for every challenge in `inputs`, preserving their order.
pub fn augment(
    inputs: &IndexMap<String, ChallengeInput>,
    teams: Option<&[Team]>,
    metadata: &MetadataStore,
) -> IndexMap<String, AugmentedChallenge> {
    let mut team_colors: HashMap<&str, &str> = HashMap::new();
    for team in teams.unwrap_or_default() {
        // first occurrence of a duplicated name wins
        team_colors
            .entry(team.name.as_str())
            .or_insert(team.color.as_str());
    }

    inputs
        .iter()
        .map(|(id, input)| {
            let challenge = augment_one(id, input, &team_colors, metadata);
            (id.clone(), challenge)
        })
        .collect()
}

fn augment_one(
    id: &str,
    input: &ChallengeInput,
    team_colors: &HashMap<&str, &str>,
    metadata: &MetadataStore,
) -> AugmentedChallenge {
    let entry = metadata.get(id);

    let name = entry
        .and_then(|entry| entry.name.clone())
        .unwrap_or_else(|| title_case(display_name(id)));
    let icon = entry
        .and_then(|entry| entry.icon.clone())
        .unwrap_or_else(|| FALLBACK_ICON.to_string());
    let description = input
        .description
        .as_ref()
        .filter(|description| !description.trim().is_empty())
        .or_else(|| entry.and_then(|entry| entry.description.as_ref()))
        .cloned()
        .unwrap_or_default();

    let (team, team_color) = input
        .team
        .as_deref()
        .and_then(|team| {
            team_colors
                .get(team)
                .map(|color| (team.to_string(), color.to_string()))
        })
        .unwrap_or_default();

    AugmentedChallenge {
        done: input.done,
        name,
        icon,
        description,
        team,
        team_color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ChallengeMetadataEntry;

    fn input(done: bool) -> ChallengeInput {
        ChallengeInput {
            done,
            ..Default::default()
        }
    }

    fn single(id: &str, input: ChallengeInput) -> IndexMap<String, ChallengeInput> {
        IndexMap::from([(id.to_string(), input)])
    }

    fn metadata() -> MetadataStore {
        [
            (
                "ach:bread".to_string(),
                ChallengeMetadataEntry {
                    name: Some("Bake Bread".into()),
                    icon: Some("bread.png".into()),
                    description: Some("Craft a loaf".into()),
                },
            ),
            (
                "ach:iron".to_string(),
                ChallengeMetadataEntry {
                    description: Some("Smelt iron".into()),
                    ..Default::default()
                },
            ),
        ]
        .into_iter()
        .collect()
    }

    fn red_blue() -> Vec<Team> {
        resolve_teams(&[
            TeamInput {
                name: "Red".into(),
                color: None,
            },
            TeamInput {
                name: "Blue".into(),
                color: Some("#000".into()),
            },
        ])
    }

    #[test]
    fn title_case_folds_whole_string() {
        assert_eq!(title_case("nether_star"), "Nether_star");
        assert_eq!(title_case("HELLO WORLD"), "Hello world");
        assert_eq!(title_case("éclair"), "Éclair");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn title_case_uses_titlecase_for_first_character() {
        assert_eq!(title_case("ßpeed"), "Sspeed");
        assert_eq!(title_case("ǆungla"), "ǅungla");
        assert_eq!(title_case("ǈUDI"), "ǈudi");
        assert_eq!(title_case("ﬁnal"), "Final");
    }

    #[test]
    fn display_name_uses_last_colon_segment() {
        assert_eq!(display_name("minecraft:story:mine_diamond"), "mine_diamond");
        assert_eq!(display_name("nether_star"), "nether_star");
        assert_eq!(display_name("trailing:"), "");
    }

    #[test]
    fn unknown_challenge_gets_fallbacks() {
        let out = augment(
            &single("ach:diamond", input(true)),
            None,
            &MetadataStore::default(),
        );
        assert_eq!(
            out["ach:diamond"],
            AugmentedChallenge {
                done: true,
                name: "Diamond".into(),
                icon: FALLBACK_ICON.into(),
                description: String::new(),
                team: String::new(),
                team_color: String::new(),
            }
        );
    }

    #[test]
    fn metadata_overrides_name_and_icon() {
        let out = augment(&single("ach:bread", input(false)), None, &metadata());
        let bread = &out["ach:bread"];
        assert_eq!(bread.name, "Bake Bread");
        assert_eq!(bread.icon, "bread.png");
        assert_eq!(bread.description, "Craft a loaf");
    }

    #[test]
    fn partial_metadata_falls_back_per_field() {
        let out = augment(&single("ach:iron", input(false)), None, &metadata());
        let iron = &out["ach:iron"];
        assert_eq!(iron.name, "Iron");
        assert_eq!(iron.icon, FALLBACK_ICON);
        assert_eq!(iron.description, "Smelt iron");
    }

    #[test]
    fn blank_input_description_defers_to_metadata() {
        let challenge = ChallengeInput {
            description: Some("  ".into()),
            ..input(false)
        };
        let out = augment(&single("ach:bread", challenge), None, &metadata());
        assert_eq!(out["ach:bread"].description, "Craft a loaf");
    }

    #[test]
    fn input_description_wins_over_metadata() {
        let challenge = ChallengeInput {
            description: Some("X".into()),
            ..input(false)
        };
        let out = augment(&single("ach:bread", challenge.clone()), None, &metadata());
        assert_eq!(out["ach:bread"].description, "X");

        let out = augment(&single("ach:unknown", challenge), None, &metadata());
        assert_eq!(out["ach:unknown"].description, "X");
    }

    #[test]
    fn teams_resolve_explicit_and_palette_colors() {
        let teams = red_blue();
        assert_eq!(teams[0].color, DEFAULT_TEAM_COLORS[0]);
        assert_eq!(teams[1].color, "#000");

        let inputs: IndexMap<String, ChallengeInput> = [
            ("a", Some("Blue")),
            ("b", Some("Red")),
            ("c", Some("Green")),
            ("d", None),
        ]
        .into_iter()
        .map(|(id, team)| {
            let challenge = ChallengeInput {
                team: team.map(str::to_string),
                ..input(false)
            };
            (id.to_string(), challenge)
        })
        .collect();

        let out = augment(&inputs, Some(&teams), &MetadataStore::default());
        assert_eq!((out["a"].team.as_str(), out["a"].team_color.as_str()), ("Blue", "#000"));
        assert_eq!(
            (out["b"].team.as_str(), out["b"].team_color.as_str()),
            ("Red", DEFAULT_TEAM_COLORS[0])
        );
        assert_eq!((out["c"].team.as_str(), out["c"].team_color.as_str()), ("", ""));
        assert_eq!((out["d"].team.as_str(), out["d"].team_color.as_str()), ("", ""));
    }

    #[test]
    fn team_is_cleared_without_team_list() {
        let challenge = ChallengeInput {
            team: Some("Red".into()),
            ..input(true)
        };
        let out = augment(&single("x", challenge), None, &MetadataStore::default());
        assert_eq!(out["x"].team, "");
        assert_eq!(out["x"].team_color, "");
    }

    #[test]
    fn duplicate_team_names_use_first_occurrence() {
        let teams = resolve_teams(&[
            TeamInput {
                name: "Same".into(),
                color: None,
            },
            TeamInput {
                name: "Same".into(),
                color: Some("#fff".into()),
            },
        ]);
        let challenge = ChallengeInput {
            team: Some("Same".into()),
            ..input(false)
        };
        let out = augment(&single("x", challenge), Some(&teams), &MetadataStore::default());
        assert_eq!(out["x"].team_color, DEFAULT_TEAM_COLORS[0]);
    }

    #[test]
    fn empty_team_color_uses_palette() {
        let teams = resolve_teams(&[
            TeamInput {
                name: "A".into(),
                color: Some(String::new()),
            },
            TeamInput {
                name: "B".into(),
                color: None,
            },
        ]);
        assert_eq!(teams[0].color, DEFAULT_TEAM_COLORS[0]);
        assert_eq!(teams[1].color, DEFAULT_TEAM_COLORS[1]);
    }

    #[test]
    fn augmentation_is_deterministic_and_ordered() {
        let inputs: IndexMap<String, ChallengeInput> = ["z:last", "a:first", "ach:bread"]
            .into_iter()
            .map(|id| (id.to_string(), input(false)))
            .collect();
        let teams = red_blue();
        let first = augment(&inputs, Some(&teams), &metadata());
        let second = augment(&inputs, Some(&teams), &metadata());

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_eq!(
            first.keys().collect::<Vec<_>>(),
            vec!["z:last", "a:first", "ach:bread"]
        );
    }
}
