//! Source ownership invariant: a turn moves the mover's own piece.

use super::Invariant;
use crate::{Cell, GameState, Timeline};

/// Invariant: when turn `k` is applied, its source cell holds a piece of
/// the player making the turn.
pub struct SourceOwnedInvariant;

impl Invariant<GameState> for SourceOwnedInvariant {
    fn holds(state: &GameState) -> bool {
        let Ok(timeline) = Timeline::build(state) else {
            return false;
        };

        state.history().iter().enumerate().all(|(k, turn)| {
            timeline
                .board_at(k)
                .ok()
                .and_then(|board| board.at(turn.source()))
                == Some(Cell::Occupied(turn.player()))
        })
    }

    fn description() -> &'static str {
        "Every turn moves a piece owned by the player making it"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Coord, Player, Turn};

    #[test]
    fn test_own_pieces_hold() {
        let history = vec![
            Turn::new(Player::One, Coord::new(0, 2), Coord::new(1, 2)),
            Turn::new(Player::Two, Coord::new(3, 2), Coord::new(2, 2)),
        ];
        let state = GameState::new(4, 3, history, Board::starting_layout(4, 3).unwrap());
        assert!(SourceOwnedInvariant::holds(&state));
    }

    #[test]
    fn test_moving_opponent_piece_violates() {
        let history = vec![Turn::new(Player::One, Coord::new(3, 0), Coord::new(2, 0))];
        let state = GameState::new(4, 3, history, Board::starting_layout(4, 3).unwrap());
        assert!(!SourceOwnedInvariant::holds(&state));
    }

    #[test]
    fn test_moving_from_empty_cell_violates() {
        let history = vec![Turn::new(Player::One, Coord::new(1, 0), Coord::new(2, 0))];
        let state = GameState::new(4, 3, history, Board::starting_layout(4, 3).unwrap());
        assert!(!SourceOwnedInvariant::holds(&state));
    }
}
