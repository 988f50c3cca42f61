//! Fetches games from the arena server's REST API.

use std::time::Duration;

use arena_replay::{GameId, GameRecord};
use reqwest::StatusCode;
use tracing::{debug, info, instrument, warn};

use crate::config::ViewerConfig;
use crate::source::{GameSource, LoadError, LoadedGame};

/// Game source backed by `GET {base_url}/game/{id}/state`.
#[derive(Debug, Clone)]
pub struct HttpGameSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGameSource {
    /// Creates a client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be constructed.
    #[instrument(skip_all, fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self, LoadError> {
        let base_url = base_url.as_ref().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LoadError::Transport {
                url: base_url.clone(),
                message: e.to_string(),
            })?;

        Ok(Self { base_url, client })
    }

    /// Creates a client from the viewer configuration.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be constructed.
    pub fn from_config(config: &ViewerConfig) -> Result<Self, LoadError> {
        Self::new(config.server_url(), config.request_timeout())
    }

    /// URL of the state endpoint for `id`.
    pub fn state_url(&self, id: GameId) -> String {
        format!("{}/game/{}/state", self.base_url, id)
    }
}

#[async_trait::async_trait]
impl GameSource for HttpGameSource {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch(&self, id: GameId) -> Result<LoadedGame, LoadError> {
        let url = self.state_url(id);
        debug!(url = %url, "Fetching game state");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LoadError::Transport {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            info!(game = %id, "Server has no such game");
            return Err(LoadError::NotFound {
                game: id,
                reason: "server returned 404".to_string(),
            });
        }
        if !status.is_success() {
            warn!(status = %status, "Unexpected status fetching game");
            return Err(LoadError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await.map_err(|e| LoadError::Transport {
            url: url.clone(),
            message: e.to_string(),
        })?;

        let record: GameRecord = serde_json::from_str(&body).map_err(|e| LoadError::Decode {
            game: id,
            message: e.to_string(),
        })?;

        if *record.id() != id {
            warn!(requested = %id, returned = %record.id(), "Server returned a different game id");
        }
        let outcome = *record.outcome();
        let state = record.into_game_state().ok_or_else(|| LoadError::NotFound {
            game: id,
            reason: "server has no state for this game".to_string(),
        })?;

        info!(game = %id, total_moves = state.total_moves(), "Fetched game");
        Ok(LoadedGame::new(id, Some(outcome), state))
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}
