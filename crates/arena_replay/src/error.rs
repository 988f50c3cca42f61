//! Replay error types.

use derive_more::{Display, Error};
use tracing::instrument;

use crate::board::CellChange;
use crate::turn::Turn;

/// The specific reason a replay operation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ReplayErrorKind {
    /// Board dimensions too small to hold both starting rows.
    #[display("Invalid board dimensions {rows}x{cols} (need at least 2 rows and 1 column)")]
    InvalidDimensions {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },

    /// A replay position outside `0..=total`.
    #[display("Replay position {requested} is outside 0..={total}")]
    PositionOutOfRange {
        /// The position the caller asked for.
        requested: i64,
        /// Number of turns in the history.
        total: usize,
    },

    /// A recorded turn points outside the board. The record is corrupt.
    #[display("Turn {index} ({turn}) leaves the {rows}x{cols} board")]
    MalformedTurn {
        /// Index of the turn in the history.
        index: usize,
        /// The offending turn.
        turn: Turn,
        /// Board rows.
        rows: usize,
        /// Board columns.
        cols: usize,
    },

    /// The snapshot board does not have the dimensions the record declares.
    #[display("Snapshot board is {actual_rows}x{actual_cols}, record says {rows}x{cols}")]
    SnapshotShape {
        /// Declared rows.
        rows: usize,
        /// Declared columns.
        cols: usize,
        /// Rows found in the snapshot.
        actual_rows: usize,
        /// Columns found in the snapshot.
        actual_cols: usize,
    },

    /// The terminal snapshot disagrees with the replayed history.
    #[display("Terminal snapshot disagrees with replayed history at {} cell(s)", changes.len())]
    TerminalMismatch {
        /// Cells where the replay (`before`) and the snapshot (`after`) differ.
        changes: Vec<CellChange>,
    },

    /// Two boards of different sizes were compared.
    #[display("Cannot compare a {left_rows}x{left_cols} board with a {right_rows}x{right_cols} board")]
    DimensionMismatch {
        /// Rows of the left board.
        left_rows: usize,
        /// Columns of the left board.
        left_cols: usize,
        /// Rows of the right board.
        right_rows: usize,
        /// Columns of the right board.
        right_cols: usize,
    },
}

impl std::error::Error for ReplayErrorKind {}

/// Replay error with location tracking.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Replay error: {} at {}:{}", kind, file, line)]
pub struct ReplayError {
    /// What went wrong.
    pub kind: ReplayErrorKind,
    /// Line number where the error was raised.
    pub line: u32,
    /// Source file where the error was raised.
    pub file: &'static str,
}

impl ReplayError {
    /// Creates a new replay error with caller location tracking.
    #[track_caller]
    #[instrument(skip(kind), fields(kind = %kind))]
    pub fn new(kind: ReplayErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns true if the error rejects a position rather than a record.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self.kind, ReplayErrorKind::PositionOutOfRange { .. })
    }
}

impl From<ReplayErrorKind> for ReplayError {
    #[track_caller]
    fn from(kind: ReplayErrorKind) -> Self {
        Self::new(kind)
    }
}
