//! Viewer configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use arena_replay::ReplayStrategy;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Environment variable that overrides [`ViewerConfig::server_url`].
pub const SERVER_URL_ENV: &str = "ARENA_SERVER_URL";

/// Configuration for the replay viewer.
///
/// Every key is optional in the TOML file; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct ViewerConfig {
    /// Base URL of the arena server.
    #[serde(default = "default_server_url")]
    #[setters(into)]
    server_url: String,

    /// Timeout for a single game fetch, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    request_timeout_secs: u64,

    /// How boards are produced while scrubbing.
    #[serde(default)]
    replay_strategy: ReplayStrategy,

    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    #[setters(into)]
    log_filter: String,

    /// Log destination for the interactive viewer.
    #[serde(default = "default_log_file")]
    #[setters(into)]
    log_file: PathBuf,
}

fn default_server_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("arena_viewer.log")
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            request_timeout_secs: default_request_timeout_secs(),
            replay_strategy: ReplayStrategy::default(),
            log_filter: default_log_filter(),
            log_file: default_log_file(),
        }
    }
}

impl ViewerConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not valid configuration.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(server_url = %config.server_url, strategy = %config.replay_strategy, "Config loaded successfully");
        Ok(config)
    }

    /// Loads configuration from `path`, or the defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies a server URL taken from the environment, if one is set.
    pub fn with_env_override(self, server_url: Option<String>) -> Self {
        match server_url {
            Some(url) if !url.trim().is_empty() => {
                debug!(server_url = %url, "Server URL overridden from environment");
                self.with_server_url(url)
            }
            _ => self,
        }
    }

    /// Reads [`SERVER_URL_ENV`] and applies it.
    pub fn apply_env(self) -> Self {
        self.with_env_override(std::env::var(SERVER_URL_ENV).ok())
    }

    /// The fetch timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.server_url(), "http://localhost:8080");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(*config.replay_strategy(), ReplayStrategy::Recompute);
        assert_eq!(config.log_filter(), "info");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ViewerConfig = toml::from_str("replay_strategy = \"cached\"").unwrap();
        assert_eq!(*config.replay_strategy(), ReplayStrategy::Cached);
        assert_eq!(config.server_url(), "http://localhost:8080");
    }

    #[test]
    fn test_env_override() {
        let config = ViewerConfig::default().with_env_override(Some("http://arena:9000".into()));
        assert_eq!(config.server_url(), "http://arena:9000");

        let config = ViewerConfig::default().with_env_override(Some("  ".into()));
        assert_eq!(config.server_url(), "http://localhost:8080");
    }
}
