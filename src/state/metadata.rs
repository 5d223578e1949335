//! Static challenge metadata loaded once at startup.

use std::{collections::HashMap, fs, io::ErrorKind, path::Path};

use serde::Deserialize;
use tracing::{info, warn};

/// Display information configured for a single challenge identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChallengeMetadataEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Read-only lookup table from challenge identifier to its metadata.
#[derive(Debug, Clone, Default)]
pub struct MetadataStore {
    entries: HashMap<String, ChallengeMetadataEntry>,
}

impl MetadataStore {
    /// Load the metadata table from `path`, degrading to an empty table on any failure.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(store) => {
                    info!(
                        path = %path.display(),
                        count = store.len(),
                        "loaded challenge metadata"
                    );
                    store
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse challenge metadata; continuing without metadata"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!(
                    path = %path.display(),
                    "challenge metadata file not found; continuing without metadata"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read challenge metadata; continuing without metadata"
                );
                Self::default()
            }
        }
    }

    /// Parse a metadata table from its JSON representation.
    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        let entries = serde_json::from_str::<HashMap<String, ChallengeMetadataEntry>>(contents)?;
        Ok(Self { entries })
    }

    /// Metadata configured for `id`, if any.
    pub fn get(&self, id: &str) -> Option<&ChallengeMetadataEntry> {
        self.entries.get(id)
    }

    /// Number of configured challenges.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no metadata is configured at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, ChallengeMetadataEntry)> for MetadataStore {
    fn from_iter<T: IntoIterator<Item = (String, ChallengeMetadataEntry)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
