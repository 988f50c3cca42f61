//! Arena replay - deterministic reconstruction of recorded grid games
//!
//! A recorded game is a board size, an ordered list of turns and a final
//! board snapshot. This crate rebuilds the board after any prefix of the
//! history and keeps track of which prefix a viewer is looking at.
//!
//! # Architecture
//!
//! - **Board**: immutable grid of cells, updated copy-on-write
//! - **Replay**: `reconstruct`, `validate`, `verify_terminal` and a cached `Timeline`
//! - **Controller**: `ScrubController`, the single source of truth for positions
//! - **Frame**: the rendering boundary (`FrameSink`, `LatestFrame`)
//! - **Invariants**: auditable properties of well-formed records
//!
//! # Example
//!
//! ```
//! use arena_replay::{Board, Coord, GameState, Player, ReplayStrategy, ScrubController, Turn};
//!
//! # fn example() -> Result<(), arena_replay::ReplayError> {
//! let history = vec![
//!     Turn::new(Player::One, Coord::new(0, 0), Coord::new(1, 0)),
//!     Turn::new(Player::Two, Coord::new(3, 1), Coord::new(2, 1)),
//! ];
//! let snapshot = Board::starting_layout(4, 4)?;
//! let state = GameState::new(4, 4, history, snapshot);
//!
//! let mut controller = ScrubController::initialize(state, ReplayStrategy::Recompute)?;
//! let frame = controller.seek(1)?;
//! assert_eq!(frame.counter(), "Move 1 / 2");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod controller;
mod error;
mod frame;
mod game_state;
mod replay;
mod turn;

pub mod invariants;

// Crate-level exports - Board model
pub use board::{Board, BoardShapeError, Cell, CellChange, CellValueError, Coord, Player};

// Crate-level exports - Errors
pub use error::{ReplayError, ReplayErrorKind};

// Crate-level exports - Records
pub use game_state::{GameId, GameIdError, GameRecord, GameState, Outcome};
pub use turn::Turn;

// Crate-level exports - Replay engine
pub use replay::{ReplayStrategy, Replayer, Timeline, reconstruct, validate, verify_terminal};

// Crate-level exports - Navigation and rendering boundary
pub use controller::{HistoryEntry, NavRequest, ScrubController};
pub use frame::{FrameSink, LatestFrame, ReplayFrame, SinkState};

// Crate-level exports - Invariants
pub use invariants::{
    AlternatingTurnInvariant, Invariant, InvariantSet, InvariantViolation, ReplayInvariants,
    SingleStepInvariant, SourceOwnedInvariant, StartingLayoutInvariant, TerminalSnapshotInvariant,
};
