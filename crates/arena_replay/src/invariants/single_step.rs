//! Single-step invariant: each turn changes exactly its two cells.

use super::Invariant;
use crate::{Cell, GameState, Timeline};

/// Invariant: the board after `k + 1` turns differs from the board after
/// `k` turns in exactly two cells. The turn's source is now empty and its
/// destination holds the mover's piece.
///
/// A turn whose source and destination coincide, or whose destination
/// already held the mover's piece, changes fewer cells and violates this.
pub struct SingleStepInvariant;

impl Invariant<GameState> for SingleStepInvariant {
    fn holds(state: &GameState) -> bool {
        let Ok(timeline) = Timeline::build(state) else {
            return false;
        };

        state.history().iter().enumerate().all(|(k, turn)| {
            let (Ok(before), Ok(after)) = (timeline.board_at(k), timeline.board_at(k + 1)) else {
                return false;
            };
            let Ok(changes) = before.diff(&after) else {
                return false;
            };

            changes.len() == 2
                && changes.iter().any(|c| {
                    c.coord == turn.source() && c.after == Cell::Empty
                })
                && changes.iter().any(|c| {
                    c.coord == turn.destination() && c.after == Cell::Occupied(turn.player())
                })
        })
    }

    fn description() -> &'static str {
        "Each turn empties its source and fills its destination, nothing else"
    }
}
