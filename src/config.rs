//! Runtime configuration resolved from the environment at startup.

use std::{
    env,
    ffi::OsString,
    fs,
    net::{Ipv4Addr, SocketAddr},
    path::PathBuf,
};

use tracing::{info, warn};

use crate::state::DEFAULT_PAGE_TEMPLATE;

/// Port used when neither `PORT` nor `SERVER_PORT` is set.
const DEFAULT_PORT: u16 = 5001;
/// Default location of the challenge metadata table.
const DEFAULT_METADATA_PATH: &str = "data.json";
/// Environment variable that overrides [`DEFAULT_METADATA_PATH`].
const METADATA_PATH_ENV: &str = "CHALLENGE_METADATA_PATH";
/// Environment variable pointing at an HTML template replacing the embedded page.
const PAGE_PATH_ENV: &str = "OVERLAY_PAGE_PATH";

#[derive(Debug, Clone)]
/// Immutable runtime configuration.
pub struct AppConfig {
    /// Port the HTTP server listens on, on every interface.
    pub port: u16,
    /// JSON file holding the challenge metadata table.
    pub metadata_path: PathBuf,
    /// Optional HTML template served on `/` instead of the embedded one.
    pub page_path: Option<PathBuf>,
}

impl AppConfig {
    /// Resolve the configuration from the process environment.
    pub fn from_env() -> Self {
        let port = ["PORT", "SERVER_PORT"]
            .into_iter()
            .find_map(|key| env::var(key).ok())
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            port,
            metadata_path: non_empty_path(env::var_os(METADATA_PATH_ENV))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_METADATA_PATH)),
            page_path: non_empty_path(env::var_os(PAGE_PATH_ENV)),
        }
    }

    /// Address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }

    /// Load the page template, falling back to the embedded one when the override is unusable.
    pub fn load_page_template(&self) -> String {
        let Some(path) = &self.page_path else {
            return DEFAULT_PAGE_TEMPLATE.to_string();
        };

        match fs::read_to_string(path) {
            Ok(template) => {
                info!(path = %path.display(), "loaded overlay page template");
                template
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read overlay page template; using built-in page"
                );
                DEFAULT_PAGE_TEMPLATE.to_string()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            metadata_path: PathBuf::from(DEFAULT_METADATA_PATH),
            page_path: None,
        }
    }
}

/// Empty environment values count as unset.
fn non_empty_path(value: Option<OsString>) -> Option<PathBuf> {
    value
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
}
