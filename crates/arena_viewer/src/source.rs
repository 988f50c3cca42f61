//! Where recorded games come from.

use arena_replay::{GameId, GameState, Outcome};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;

/// A game fetched from a source, ready to replay.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct LoadedGame {
    /// The requested game.
    id: GameId,
    /// Recorded outcome, when the source knows it.
    outcome: Option<Outcome>,
    /// The authoritative record.
    state: GameState,
}

impl LoadedGame {
    /// Splits the loaded game into its parts.
    pub fn into_parts(self) -> (GameId, Option<Outcome>, GameState) {
        (self.id, self.outcome, self.state)
    }
}

/// Why a game could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum LoadError {
    /// The source has no such game, or no state for it.
    #[display("Game {} not found: {}", game, reason)]
    NotFound {
        /// Requested game.
        game: GameId,
        /// What the source reported.
        reason: String,
    },
    /// The identifier is not a positive integer.
    #[display("Invalid game identifier: {:?}", input)]
    InvalidId {
        /// What the user typed.
        input: String,
    },
    /// The request never produced a response.
    #[display("Request to {} failed: {}", url, message)]
    Transport {
        /// Requested URL.
        url: String,
        /// Transport error text.
        message: String,
    },
    /// The server answered with an unexpected status.
    #[display("Server returned {} for {}", status, url)]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },
    /// The payload is not a game.
    #[display("Could not decode game {}: {}", game, message)]
    Decode {
        /// Requested game.
        game: GameId,
        /// Decoder error text.
        message: String,
    },
    /// Reading a local file failed.
    #[display("Could not read {}: {}", path, message)]
    Io {
        /// File path.
        path: String,
        /// I/O error text.
        message: String,
    },
}

impl LoadError {
    /// Returns true for the "not found" outcomes shown as a distinct screen.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound { .. } | LoadError::InvalidId { .. })
    }
}

/// Parses a user-supplied game identifier.
///
/// # Errors
///
/// Returns [`LoadError::InvalidId`] unless `input` is a positive integer.
pub fn parse_game_id(input: &str) -> Result<GameId, LoadError> {
    input.trim().parse().map_err(|_| LoadError::InvalidId {
        input: input.to_string(),
    })
}

/// A source of recorded games.
#[async_trait::async_trait]
pub trait GameSource: Send + Sync {
    /// Fetches one game.
    ///
    /// A source that answers but has no usable state for `id` returns
    /// [`LoadError::NotFound`].
    async fn fetch(&self, id: GameId) -> Result<LoadedGame, LoadError>;

    /// Short description for logs and the title bar.
    fn describe(&self) -> String;
}
