//! Reads games saved as JSON files.

use std::path::{Path, PathBuf};

use arena_replay::{GameId, GameRecord, GameState};
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::source::{GameSource, LoadError, LoadedGame};

/// Either a full server record or a bare game state.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredGame {
    Record(GameRecord),
    State(GameState),
}

/// Game source backed by a local JSON file.
#[derive(Debug, Clone)]
pub struct FileGameSource {
    path: PathBuf,
}

impl FileGameSource {
    /// Creates a source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl GameSource for FileGameSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self, id: GameId) -> Result<LoadedGame, LoadError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("Game file does not exist");
                return Err(LoadError::NotFound {
                    game: id,
                    reason: format!("{} does not exist", self.path.display()),
                });
            }
            Err(e) => {
                return Err(LoadError::Io {
                    path: self.path.display().to_string(),
                    message: e.to_string(),
                });
            }
        };

        let stored: StoredGame = serde_json::from_str(&content).map_err(|e| LoadError::Decode {
            game: id,
            message: format!("not a game record or game state: {}", e),
        })?;

        let loaded = match stored {
            StoredGame::Record(record) => {
                if *record.id() != id {
                    return Err(LoadError::NotFound {
                        game: id,
                        reason: format!("{} holds game {}", self.path.display(), record.id()),
                    });
                }
                let outcome = *record.outcome();
                let state = record.into_game_state().ok_or_else(|| LoadError::NotFound {
                    game: id,
                    reason: "record has no game state".to_string(),
                })?;
                LoadedGame::new(id, Some(outcome), state)
            }
            StoredGame::State(state) => {
                debug!("File holds a bare game state");
                LoadedGame::new(id, None, state)
            }
        };

        info!(game = %id, total_moves = loaded.state().total_moves(), "Loaded game from file");
        Ok(loaded)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
