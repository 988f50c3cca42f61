//! Alternating turn invariant: players alternate 1, 2, 1, 2, ...

use super::Invariant;
use crate::{GameState, Player};

/// Invariant: players alternate turns.
///
/// Move history must show 1, 2, 1, 2, ... pattern.
/// First move is always player 1.
pub struct AlternatingTurnInvariant;

impl Invariant<GameState> for AlternatingTurnInvariant {
    fn holds(state: &GameState) -> bool {
        let history = state.history();

        if history.is_empty() {
            return true;
        }

        // First move must be player 1
        if history[0].player() != Player::One {
            return false;
        }

        history
            .windows(2)
            .all(|w| w[0].player() != w[1].player())
    }

    fn description() -> &'static str {
        "Players alternate turns, starting with player 1"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Coord, Turn};

    fn state_with(players: &[Player]) -> GameState {
        let history = players
            .iter()
            .map(|p| Turn::new(*p, Coord::new(0, 0), Coord::new(1, 0)))
            .collect();
        GameState::new(3, 1, history, Board::starting_layout(3, 1).unwrap())
    }

    #[test]
    fn test_empty_history_holds() {
        assert!(AlternatingTurnInvariant::holds(&state_with(&[])));
    }

    #[test]
    fn test_alternation_holds() {
        let state = state_with(&[Player::One, Player::Two, Player::One]);
        assert!(AlternatingTurnInvariant::holds(&state));
    }

    #[test]
    fn test_player_two_first_violates() {
        let state = state_with(&[Player::Two, Player::One]);
        assert!(!AlternatingTurnInvariant::holds(&state));
    }

    #[test]
    fn test_repeated_player_violates() {
        let state = state_with(&[Player::One, Player::One]);
        assert!(!AlternatingTurnInvariant::holds(&state));
    }
}
