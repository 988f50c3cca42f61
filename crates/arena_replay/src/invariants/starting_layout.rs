//! Starting layout invariant: position 0 is the canonical layout.

use super::Invariant;
use crate::{Board, GameState, reconstruct};

/// Invariant: replaying zero turns yields player one's pieces on row 0,
/// player two's on the last row, and nothing else.
pub struct StartingLayoutInvariant;

impl Invariant<GameState> for StartingLayoutInvariant {
    fn holds(state: &GameState) -> bool {
        match (
            reconstruct(state, 0),
            Board::starting_layout(state.rows(), state.cols()),
        ) {
            (Ok(replayed), Ok(expected)) => replayed == expected,
            _ => false,
        }
    }

    fn description() -> &'static str {
        "Position 0 equals the standard starting layout"
    }
}
