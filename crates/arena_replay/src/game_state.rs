//! Authoritative game records as supplied by the data source.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::board::Board;
use crate::turn::Turn;

/// Identifier of a game on the arena server (a positive integer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct GameId(u64);

impl GameId {
    /// Creates a game id, rejecting zero.
    pub fn new(id: u64) -> Result<Self, GameIdError> {
        if id == 0 {
            Err(GameIdError::new(id.to_string()))
        } else {
            Ok(Self(id))
        }
    }

    /// Returns the raw id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for GameId {
    type Error = GameIdError;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<GameId> for u64 {
    fn from(id: GameId) -> Self {
        id.0
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for GameId {
    type Err = GameIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id: u64 = s.trim().parse().map_err(|_| GameIdError::new(s))?;
        Self::new(id).map_err(|_| GameIdError::new(s))
    }
}

/// A game identifier that is not a positive integer.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid game identifier '{input}'")]
pub struct GameIdError {
    /// The rejected input.
    pub input: String,
}

impl GameIdError {
    /// Creates a new game id error.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// Final result of a game as recorded by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Outcome {
    /// The game ended in a draw (-1).
    Draw,
    /// The game is still being played (0).
    Ongoing,
    /// Player one won (1).
    PlayerOneWins,
    /// Player two won (2).
    PlayerTwoWins,
    /// Any other code.
    Unknown(i64),
}

impl Outcome {
    /// Returns the display label for this outcome.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Draw => "Draw",
            Outcome::Ongoing => "Ongoing",
            Outcome::PlayerOneWins => "Player 1 Wins",
            Outcome::PlayerTwoWins => "Player 2 Wins",
            Outcome::Unknown(_) => "Unknown",
        }
    }
}

impl From<i64> for Outcome {
    fn from(code: i64) -> Self {
        match code {
            -1 => Outcome::Draw,
            0 => Outcome::Ongoing,
            1 => Outcome::PlayerOneWins,
            2 => Outcome::PlayerTwoWins,
            other => Outcome::Unknown(other),
        }
    }
}

impl From<Outcome> for i64 {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Draw => -1,
            Outcome::Ongoing => 0,
            Outcome::PlayerOneWins => 1,
            Outcome::PlayerTwoWins => 2,
            Outcome::Unknown(code) => code,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Authoritative state of one game: dimensions, history and the board
/// snapshot the server computed.
///
/// Replay never modifies a `GameState`; it only reads the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    rows: usize,
    cols: usize,
    #[serde(default)]
    history: Vec<Turn>,
    board: Board,
}

impl GameState {
    /// Creates a game state from its parts.
    #[instrument(skip(history, board), fields(moves = history.len()))]
    pub fn new(rows: usize, cols: usize, history: Vec<Turn>, board: Board) -> Self {
        Self {
            rows,
            cols,
            history,
            board,
        }
    }

    /// Declared row count.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Declared column count.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The recorded turns in play order.
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// The board snapshot supplied with the record.
    pub fn snapshot(&self) -> &Board {
        &self.board
    }

    /// Number of turns in the history (`N`).
    pub fn total_moves(&self) -> usize {
        self.history.len()
    }
}

/// A game as served by `GET /game/{id}/state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GameRecord {
    /// Game id.
    id: GameId,
    /// Server id of player one.
    player1_id: i64,
    /// Server id of player two.
    player2_id: i64,
    /// Recorded outcome.
    outcome: Outcome,
    /// Game state, absent when the server could not rebuild it.
    #[serde(default)]
    game_state: Option<GameState>,
}

impl GameRecord {
    /// Creates a new game record.
    pub fn new(
        id: GameId,
        player1_id: i64,
        player2_id: i64,
        outcome: Outcome,
        game_state: Option<GameState>,
    ) -> Self {
        Self {
            id,
            player1_id,
            player2_id,
            outcome,
            game_state,
        }
    }

    /// Takes the game state out of the record.
    pub fn into_game_state(self) -> Option<GameState> {
        self.game_state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Coord, Player};

    #[test]
    fn test_game_id_parses_positive_integers() {
        assert_eq!("17".parse::<GameId>().unwrap().get(), 17);
        assert!("0".parse::<GameId>().is_err());
        assert!("-3".parse::<GameId>().is_err());
        assert!("abc".parse::<GameId>().is_err());
        assert!("".parse::<GameId>().is_err());
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(Outcome::from(-1).label(), "Draw");
        assert_eq!(Outcome::from(0).label(), "Ongoing");
        assert_eq!(Outcome::from(1).label(), "Player 1 Wins");
        assert_eq!(Outcome::from(2).label(), "Player 2 Wins");
        assert_eq!(Outcome::from(9), Outcome::Unknown(9));
        assert_eq!(Outcome::Unknown(9).label(), "Unknown");
    }

    #[test]
    fn test_decode_ignores_derived_fields() {
        let json = r#"{
            "rows": 3, "cols": 3,
            "history": [{"turnID":1,"destRow":1,"destCol":0,"sourceRow":0,"sourceCol":0,"player":1}],
            "board": [[0,1,1],[1,0,0],[2,2,2]],
            "gameOver": false, "winner": 0, "moveOptions": [], "currentPlayer": 2
        }"#;
        let state: GameState = serde_json::from_str(json).expect("Valid game state");
        assert_eq!(state.total_moves(), 1);
        assert_eq!(
            state.history()[0],
            Turn::new(Player::One, Coord::new(0, 0), Coord::new(1, 0))
        );
        assert_eq!(state.snapshot().rows(), 3);
    }

    #[test]
    fn test_record_without_state() {
        let json = r#"{"id": 4, "player1_id": 1, "player2_id": 2, "outcome": 0, "game_state": null}"#;
        let record: GameRecord = serde_json::from_str(json).expect("Valid record");
        assert_eq!(record.id().get(), 4);
        assert_eq!(*record.outcome(), Outcome::Ongoing);
        assert!(record.game_state().is_none());
    }
}
