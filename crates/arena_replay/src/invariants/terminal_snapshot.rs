//! Terminal snapshot invariant: full replay matches the supplied board.

use super::Invariant;
use crate::{GameState, reconstruct};

/// Invariant: replaying the whole history yields the snapshot board the
/// data source supplied with the record.
pub struct TerminalSnapshotInvariant;

impl Invariant<GameState> for TerminalSnapshotInvariant {
    fn holds(state: &GameState) -> bool {
        reconstruct(state, state.total_moves()).is_ok_and(|board| &board == state.snapshot())
    }

    fn description() -> &'static str {
        "Replaying the full history reproduces the supplied snapshot"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Cell, Coord, Player, Turn};

    #[test]
    fn test_matching_snapshot_holds() {
        let history = vec![Turn::new(Player::One, Coord::new(0, 0), Coord::new(1, 1))];
        let snapshot = Board::starting_layout(3, 2)
            .unwrap()
            .set_cell(0, 0, Cell::Empty)
            .set_cell(1, 1, Cell::Occupied(Player::One));
        let state = GameState::new(3, 2, history, snapshot);
        assert!(TerminalSnapshotInvariant::holds(&state));
    }

    #[test]
    fn test_stale_snapshot_violates() {
        let history = vec![Turn::new(Player::One, Coord::new(0, 0), Coord::new(1, 1))];
        let state = GameState::new(3, 2, history, Board::starting_layout(3, 2).unwrap());
        assert!(!TerminalSnapshotInvariant::holds(&state));
    }
}
