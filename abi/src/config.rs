use std::{fs, path::Path, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::Error;

const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_STATE_PATH: &str = "~/.config/booking-calendar/state.json";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub state: StateConfig,
    #[serde(default)]
    pub fallback: FallbackConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateConfig {
    #[serde(default = "default_state_path")]
    pub path: String,
}

/// Fixture bookings served, flagged as degraded, when the backend is down.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FallbackConfig {
    #[serde(default)]
    pub fixtures: Option<String>,
}

impl Config {
    pub fn load(filename: impl AsRef<Path>) -> Result<Self, Error> {
        let filename = expand(&filename.as_ref().to_string_lossy());
        let display = filename.display().to_string();
        let content = fs::read_to_string(&filename).map_err(|e| Error::ConfigRead {
            path: display.clone(),
            reason: e.to_string(),
        })?;
        serde_yaml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: display,
            reason: e.to_string(),
        })
    }
}

impl ApiConfig {
    /// `base_url` joined with an endpoint path, exactly one slash between.
    pub fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

impl StateConfig {
    pub fn path(&self) -> PathBuf {
        expand(&self.path)
    }
}

impl FallbackConfig {
    pub fn fixtures_path(&self) -> Option<PathBuf> {
        self.fixtures.as_deref().map(expand)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: default_state_path(),
        }
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_state_path() -> String {
    DEFAULT_STATE_PATH.to_string()
}
