//! Plain-text output for the `print` and `verify` commands.

use arena_replay::{
    GameState, InvariantSet, ReplayError, ReplayErrorKind, ReplayFrame, ReplayInvariants,
    validate, verify_terminal,
};
use tracing::instrument;

/// Renders a frame as text: the counter, the last move, then the board with
/// the last row on top.
pub fn render_frame(title: &str, frame: &ReplayFrame) -> String {
    let mut out = format!("{title}\n{}\n", frame.counter());
    if let Some(turn) = frame.last_turn() {
        out.push_str(&format!("Last move: {} {}\n", turn.player(), turn));
    }
    out.push_str(&frame.board().to_string());
    out
}

/// Result of checking a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    /// One line per finding; empty when the record is clean.
    pub problems: Vec<String>,
    /// Number of turns checked.
    pub total_moves: usize,
}

impl VerifyReport {
    /// True when no problem was found.
    pub fn passed(&self) -> bool {
        self.problems.is_empty()
    }

    /// Text printed by the `verify` command.
    pub fn render(&self) -> String {
        if self.passed() {
            return format!("OK: {} turns replay to the final snapshot\n", self.total_moves);
        }
        let lines: Vec<String> = self
            .problems
            .iter()
            .map(|problem| format!("  - {problem}\n"))
            .collect();
        format!("FAILED: {} problem(s)\n{}", self.problems.len(), lines.concat())
    }
}

/// Validates a record, checks its final snapshot and audits the replay
/// invariants.
#[instrument(skip(state), fields(total = state.total_moves()))]
pub fn verify(state: &GameState) -> VerifyReport {
    let mut problems = Vec::new();

    match validate(state) {
        Err(e) => problems.push(describe(&e)),
        Ok(()) => {
            if let Err(e) = verify_terminal(state) {
                problems.push(describe(&e));
            }
            if let Err(violations) = ReplayInvariants::check_all(state) {
                problems.extend(violations.into_iter().map(|v| format!("Invariant violated: {v}")));
            }
        }
    }

    VerifyReport {
        problems,
        total_moves: state.total_moves(),
    }
}

fn describe(error: &ReplayError) -> String {
    match &error.kind {
        ReplayErrorKind::TerminalMismatch { changes } => {
            let cells: Vec<String> = changes.iter().map(ToString::to_string).collect();
            format!("Final snapshot differs at {}", cells.join(", "))
        }
        kind => kind.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_replay::{Board, Cell, Coord, Player, ReplayStrategy, ScrubController, Turn};

    fn game() -> GameState {
        let history = vec![Turn::new(Player::One, Coord::new(0, 1), Coord::new(1, 1))];
        let snapshot = Board::starting_layout(3, 3)
            .unwrap()
            .set_cell(0, 1, Cell::Empty)
            .set_cell(1, 1, Cell::Occupied(Player::One));
        GameState::new(3, 3, history, snapshot)
    }

    #[test]
    fn test_render_frame_puts_last_row_first() {
        let controller = ScrubController::initialize(game(), ReplayStrategy::Recompute).unwrap();
        let text = render_frame("Game 1", controller.frame());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Game 1");
        assert_eq!(lines[1], "Move 1 / 1");
        assert!(lines[2].starts_with("Last move: Player 1"));
        assert!(lines[3].contains('2'));
        assert!(!lines[3].contains('1'));
    }

    #[test]
    fn test_verify_clean_record() {
        let report = verify(&game());
        assert!(report.passed());
        assert!(report.render().starts_with("OK: 1 turns"));
    }

    #[test]
    fn test_verify_reports_snapshot_mismatch() {
        let state = game();
        let wrong = state.snapshot().set_cell(1, 1, Cell::Empty);
        let report = verify(&GameState::new(3, 3, state.history().to_vec(), wrong));
        assert!(!report.passed());
        assert!(report.problems.iter().any(|p| p.contains("(1, 1)")));
        assert!(report.render().starts_with("FAILED"));
    }

    #[test]
    fn test_failed_render_lists_one_problem_per_line() {
        let report = VerifyReport {
            problems: vec!["first".to_string(), "second".to_string()],
            total_moves: 4,
        };
        assert_eq!(report.render(), "FAILED: 2 problem(s)\n  - first\n  - second\n");
    }
}
