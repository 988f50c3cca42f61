//! Replay engine: rebuild the board after any prefix of a game's history.
//!
//! Every reconstruction starts from the canonical starting layout, never
//! from the record's snapshot, and applies recorded turns in order. The
//! engine replays effects only; it does not judge whether a move was legal.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::board::{Board, Cell};
use crate::error::{ReplayError, ReplayErrorKind};
use crate::game_state::GameState;
use crate::turn::Turn;

/// Rebuilds the board after the first `position` turns of `state`.
///
/// Starts from an empty `rows x cols` board, places the standard starting
/// rows, then for each turn clears the source cell and puts the mover's
/// piece on the destination. Each call returns a fresh board.
///
/// # Errors
///
/// - [`ReplayErrorKind::PositionOutOfRange`] if `position > N`.
/// - [`ReplayErrorKind::MalformedTurn`] if a turn in the prefix leaves the
///   board.
/// - [`ReplayErrorKind::InvalidDimensions`] if the record's dimensions are
///   unusable.
#[instrument(skip(state), fields(rows = state.rows(), cols = state.cols(), total = state.total_moves()))]
pub fn reconstruct(state: &GameState, position: usize) -> Result<Board, ReplayError> {
    let total = state.total_moves();
    if position > total {
        return Err(out_of_range(position, total));
    }

    let prefix = &state.history()[..position];
    check_turns(prefix, state.rows(), state.cols())?;

    let start = Board::starting_layout(state.rows(), state.cols())?;
    let board = prefix.iter().fold(start, apply_turn);

    debug!(position, "Reconstructed board");
    Ok(board)
}

/// Checks that a record can be replayed at every position.
///
/// Verifies the dimensions, the snapshot's shape and every turn's bounds.
/// It does not compare the snapshot with the replay; see
/// [`verify_terminal`].
///
/// # Errors
///
/// Returns the first problem found.
#[instrument(skip(state), fields(rows = state.rows(), cols = state.cols(), total = state.total_moves()))]
pub fn validate(state: &GameState) -> Result<(), ReplayError> {
    Board::cell_count(state.rows(), state.cols())?;

    // The snapshot is bounded by the payload; nothing is allocated from the
    // declared dimensions until they agree with it.
    let snapshot = state.snapshot();
    if snapshot.rows() != state.rows() || snapshot.cols() != state.cols() {
        warn!(
            snapshot_rows = snapshot.rows(),
            snapshot_cols = snapshot.cols(),
            "Snapshot shape disagrees with record"
        );
        return Err(ReplayErrorKind::SnapshotShape {
            rows: state.rows(),
            cols: state.cols(),
            actual_rows: snapshot.rows(),
            actual_cols: snapshot.cols(),
        }
        .into());
    }

    check_turns(state.history(), state.rows(), state.cols())
}

/// Replays the full history and compares it with the supplied snapshot.
///
/// # Errors
///
/// Returns [`ReplayErrorKind::TerminalMismatch`] listing the differing
/// cells (`before` is the replay, `after` the snapshot), or any error from
/// [`validate`].
#[instrument(skip(state), fields(total = state.total_moves()))]
pub fn verify_terminal(state: &GameState) -> Result<(), ReplayError> {
    validate(state)?;

    let replayed = reconstruct(state, state.total_moves())?;
    let changes = replayed.diff(state.snapshot())?;

    if changes.is_empty() {
        info!("Terminal snapshot matches replayed history");
        Ok(())
    } else {
        warn!(mismatched = changes.len(), "Terminal snapshot disagrees with history");
        Err(ReplayErrorKind::TerminalMismatch { changes }.into())
    }
}

/// Every board of a game, precomputed once.
///
/// Building costs one pass over the history; each lookup after that is a
/// clone of a stored board. Lookups agree with [`reconstruct`] at every
/// position, including which positions are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    boards: Vec<Board>,
}

impl Timeline {
    /// Precomputes the boards for positions `0..=N`.
    ///
    /// # Errors
    ///
    /// Fails if any turn leaves the board or the dimensions are unusable.
    #[instrument(skip(state), fields(total = state.total_moves()))]
    pub fn build(state: &GameState) -> Result<Self, ReplayError> {
        check_turns(state.history(), state.rows(), state.cols())?;

        let mut boards = Vec::with_capacity(state.total_moves() + 1);
        let mut current = Board::starting_layout(state.rows(), state.cols())?;
        for turn in state.history() {
            let next = apply_turn(current.clone(), turn);
            boards.push(current);
            current = next;
        }
        boards.push(current);

        info!(boards = boards.len(), "Built replay timeline");
        Ok(Self { boards })
    }

    /// Returns the board after `position` turns.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayErrorKind::PositionOutOfRange`] if `position > N`.
    pub fn board_at(&self, position: usize) -> Result<Board, ReplayError> {
        self.boards
            .get(position)
            .cloned()
            .ok_or_else(|| out_of_range(position, self.total_moves()))
    }

    /// Number of turns covered (`N`).
    pub fn total_moves(&self) -> usize {
        self.boards.len().saturating_sub(1)
    }
}

/// How boards are produced for a position.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReplayStrategy {
    /// Rebuild from the starting layout on every query.
    #[default]
    Recompute,
    /// Precompute every board once, then look them up.
    Cached,
}

/// A board producer for one game, following a [`ReplayStrategy`].
#[derive(Debug, Clone)]
pub enum Replayer {
    /// Calls [`reconstruct`] per query.
    Recompute,
    /// Serves boards from a [`Timeline`].
    Cached(Timeline),
}

impl Replayer {
    /// Prepares a replayer for `state`.
    ///
    /// # Errors
    ///
    /// With [`ReplayStrategy::Cached`], fails if the timeline cannot be
    /// built.
    #[instrument(skip(state))]
    pub fn new(strategy: ReplayStrategy, state: &GameState) -> Result<Self, ReplayError> {
        match strategy {
            ReplayStrategy::Recompute => Ok(Replayer::Recompute),
            ReplayStrategy::Cached => Timeline::build(state).map(Replayer::Cached),
        }
    }

    /// Returns the board after `position` turns of `state`.
    ///
    /// # Errors
    ///
    /// Same as [`reconstruct`].
    pub fn board_at(&self, state: &GameState, position: usize) -> Result<Board, ReplayError> {
        match self {
            Replayer::Recompute => reconstruct(state, position),
            Replayer::Cached(timeline) => timeline.board_at(position),
        }
    }

    /// The strategy this replayer follows.
    pub fn strategy(&self) -> ReplayStrategy {
        match self {
            Replayer::Recompute => ReplayStrategy::Recompute,
            Replayer::Cached(_) => ReplayStrategy::Cached,
        }
    }
}

fn apply_turn(board: Board, turn: &Turn) -> Board {
    let source = turn.source();
    let dest = turn.destination();
    board
        .with_cell(source.row, source.col, Cell::Empty)
        .with_cell(dest.row, dest.col, Cell::Occupied(turn.player()))
}

fn check_turns(turns: &[Turn], rows: usize, cols: usize) -> Result<(), ReplayError> {
    match turns.iter().enumerate().find(|(_, t)| !t.fits(rows, cols)) {
        Some((index, turn)) => {
            warn!(index, %turn, rows, cols, "Malformed turn in history");
            Err(ReplayErrorKind::MalformedTurn {
                index,
                turn: *turn,
                rows,
                cols,
            }
            .into())
        }
        None => Ok(()),
    }
}

#[track_caller]
fn out_of_range(position: usize, total: usize) -> ReplayError {
    ReplayErrorKind::PositionOutOfRange {
        requested: i64::try_from(position).unwrap_or(i64::MAX),
        total,
    }
    .into()
}
