//! Turn model: one recorded ply.
//!
//! A turn only records that a piece moved from one cell to another.
//! Whether the move was legal is decided elsewhere.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::board::{Coord, Player};

/// A recorded move: `player` moved the piece on `source` to `destination`.
///
/// Serialized in the arena server's camelCase layout. The optional
/// `turnID` is the server's row id and plays no part in equality.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    #[serde(rename = "turnID", default, skip_serializing_if = "Option::is_none")]
    turn_id: Option<i64>,
    player: Player,
    source_row: usize,
    source_col: usize,
    dest_row: usize,
    dest_col: usize,
}

impl Turn {
    /// Creates a new turn.
    #[instrument]
    pub fn new(player: Player, source: Coord, destination: Coord) -> Self {
        Self {
            turn_id: None,
            player,
            source_row: source.row,
            source_col: source.col,
            dest_row: destination.row,
            dest_col: destination.col,
        }
    }

    /// Attaches the server-side turn id.
    pub fn with_id(mut self, turn_id: i64) -> Self {
        self.turn_id = Some(turn_id);
        self
    }

    /// Returns the player who made this turn.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Returns the cell the piece left.
    pub fn source(&self) -> Coord {
        Coord::new(self.source_row, self.source_col)
    }

    /// Returns the cell the piece landed on.
    pub fn destination(&self) -> Coord {
        Coord::new(self.dest_row, self.dest_col)
    }

    /// Returns the server-side turn id, if the record carried one.
    pub fn turn_id(&self) -> Option<i64> {
        self.turn_id
    }

    /// Checks that both ends of the turn lie on a `rows x cols` board.
    pub fn fits(&self, rows: usize, cols: usize) -> bool {
        self.source_row < rows
            && self.dest_row < rows
            && self.source_col < cols
            && self.dest_col < cols
    }
}

impl PartialEq for Turn {
    fn eq(&self, other: &Self) -> bool {
        self.player == other.player
            && self.source_row == other.source_row
            && self.source_col == other.source_col
            && self.dest_row == other.dest_row
            && self.dest_col == other.dest_col
    }
}

impl Eq for Turn {}

impl std::fmt::Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.source(), self.destination())
    }
}
