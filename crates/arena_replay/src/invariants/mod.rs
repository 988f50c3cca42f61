//! First-class invariants for recorded games.
//!
//! The replay engine trusts the record it is given. These invariants let a
//! caller audit that trust: each one is a property a well-formed record
//! satisfies, checked by replaying the history.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description)
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>,)+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let mut violations = Vec::new();
                $(
                    if !<$inv as Invariant<S>>::holds(state) {
                        violations.push(InvariantViolation::new(
                            <$inv as Invariant<S>>::description(),
                        ));
                    }
                )+
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);
impl_invariant_set!(I1, I2, I3, I4, I5);

pub mod alternating_turn;
pub mod single_step;
pub mod source_owned;
pub mod starting_layout;
pub mod terminal_snapshot;

pub use alternating_turn::AlternatingTurnInvariant;
pub use single_step::SingleStepInvariant;
pub use source_owned::SourceOwnedInvariant;
pub use starting_layout::StartingLayoutInvariant;
pub use terminal_snapshot::TerminalSnapshotInvariant;

/// All replay invariants as a composable set.
pub type ReplayInvariants = (
    StartingLayoutInvariant,
    SourceOwnedInvariant,
    SingleStepInvariant,
    AlternatingTurnInvariant,
    TerminalSnapshotInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Cell, Coord, GameState, Player, Turn};

    fn opening() -> GameState {
        let history = vec![
            Turn::new(Player::One, Coord::new(0, 1), Coord::new(1, 1)),
            Turn::new(Player::Two, Coord::new(4, 0), Coord::new(3, 0)),
            Turn::new(Player::One, Coord::new(1, 1), Coord::new(2, 1)),
        ];
        let snapshot = Board::starting_layout(5, 3)
            .unwrap()
            .set_cell(0, 1, Cell::Empty)
            .set_cell(2, 1, Cell::Occupied(Player::One))
            .set_cell(4, 0, Cell::Empty)
            .set_cell(3, 0, Cell::Occupied(Player::Two));
        GameState::new(5, 3, history, snapshot)
    }

    #[test]
    fn test_invariant_set_holds_for_empty_game() {
        let state = GameState::new(3, 3, Vec::new(), Board::starting_layout(3, 3).unwrap());
        assert!(ReplayInvariants::check_all(&state).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        assert!(ReplayInvariants::check_all(&opening()).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let state = opening();
        let corrupt_snapshot = state.snapshot().set_cell(2, 2, Cell::Occupied(Player::Two));
        let corrupt = GameState::new(5, 3, state.history().to_vec(), corrupt_snapshot);

        let violations = ReplayInvariants::check_all(&corrupt).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].description,
            TerminalSnapshotInvariant::description()
        );
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (StartingLayoutInvariant, SingleStepInvariant);
        assert!(TwoInvariants::check_all(&opening()).is_ok());
    }
}
