//! Rendering boundary: what the controller hands to whoever paints.

use derive_getters::Getters;
use tracing::{debug, instrument, warn};

use crate::board::Board;
use crate::game_state::GameId;
use crate::turn::Turn;

/// One paintable state of a replay: the board after `position` of
/// `total_moves` turns.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ReplayFrame {
    /// Increases with every frame a controller emits. Later seeks carry
    /// larger generations.
    generation: u64,
    /// Board after `position` turns.
    board: Board,
    /// Turns applied (`k`).
    position: usize,
    /// Turns in the game (`N`).
    total_moves: usize,
    /// The turn that produced this board, `None` at position 0.
    last_turn: Option<Turn>,
}

impl ReplayFrame {
    /// Creates a new frame.
    pub fn new(
        generation: u64,
        board: Board,
        position: usize,
        total_moves: usize,
        last_turn: Option<Turn>,
    ) -> Self {
        Self {
            generation,
            board,
            position,
            total_moves,
            last_turn,
        }
    }

    /// Returns true when the frame shows the end of the game.
    pub fn is_final(&self) -> bool {
        self.position == self.total_moves
    }

    /// Move counter text, e.g. `Move 3 / 10`.
    pub fn counter(&self) -> String {
        format!("Move {} / {}", self.position, self.total_moves)
    }
}

/// Receiver of replay output.
pub trait FrameSink {
    /// Called with each new frame to paint.
    fn frame(&mut self, frame: ReplayFrame);

    /// Called when a game could not be loaded. Distinct from a game with an
    /// empty history, which still produces a frame.
    fn not_found(&mut self, game: GameId, reason: &str);
}

/// What a [`LatestFrame`] currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkState {
    /// Nothing received yet.
    Blank,
    /// A board to paint.
    Frame(ReplayFrame),
    /// The game could not be loaded.
    NotFound {
        /// The game that was requested.
        game: GameId,
        /// Why it could not be loaded.
        reason: String,
    },
}

/// A sink that keeps only the newest frame.
///
/// Frames delivered out of order are dropped if their generation is not
/// newer than any frame seen before, even one since replaced by a not-found
/// screen. A slow render of an old position never replaces a newer one.
#[derive(Debug, Clone)]
pub struct LatestFrame {
    state: SinkState,
    newest: Option<u64>,
}

impl LatestFrame {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self {
            state: SinkState::Blank,
            newest: None,
        }
    }

    /// What should be painted now.
    pub fn state(&self) -> &SinkState {
        &self.state
    }

    /// The current frame, if the sink holds one.
    pub fn current(&self) -> Option<&ReplayFrame> {
        match &self.state {
            SinkState::Frame(frame) => Some(frame),
            _ => None,
        }
    }
}

impl Default for LatestFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSink for LatestFrame {
    #[instrument(skip(self, frame), fields(generation = frame.generation, position = frame.position))]
    fn frame(&mut self, frame: ReplayFrame) {
        if let Some(newest) = self.newest
            && newest >= frame.generation
        {
            debug!(newest, "Dropping stale frame");
            return;
        }
        self.newest = Some(frame.generation);
        self.state = SinkState::Frame(frame);
    }

    #[instrument(skip(self))]
    fn not_found(&mut self, game: GameId, reason: &str) {
        warn!(%game, reason, "Game not found");
        self.state = SinkState::NotFound {
            game,
            reason: reason.to_string(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(generation: u64, position: usize) -> ReplayFrame {
        ReplayFrame::new(
            generation,
            Board::starting_layout(2, 2).unwrap(),
            position,
            4,
            None,
        )
    }

    #[test]
    fn test_newer_frame_replaces_older() {
        let mut sink = LatestFrame::new();
        sink.frame(frame(1, 4));
        sink.frame(frame(2, 1));
        assert_eq!(*sink.current().unwrap().position(), 1);
    }

    #[test]
    fn test_stale_frame_is_dropped() {
        let mut sink = LatestFrame::new();
        sink.frame(frame(3, 2));
        sink.frame(frame(2, 0));
        assert_eq!(*sink.current().unwrap().generation(), 3);
        assert_eq!(*sink.current().unwrap().position(), 2);
    }

    #[test]
    fn test_not_found_is_not_a_frame() {
        let mut sink = LatestFrame::new();
        let game = GameId::new(9).unwrap();
        sink.not_found(game, "404");
        assert!(sink.current().is_none());
        assert!(matches!(sink.state(), SinkState::NotFound { .. }));
    }

    #[test]
    fn test_stale_frame_after_not_found_is_dropped() {
        let mut sink = LatestFrame::new();
        sink.frame(frame(5, 3));
        sink.not_found(GameId::new(9).unwrap(), "404");

        sink.frame(frame(4, 1));
        assert!(matches!(sink.state(), SinkState::NotFound { .. }));

        sink.frame(frame(6, 2));
        assert_eq!(*sink.current().unwrap().generation(), 6);
    }

    #[test]
    fn test_counter_text() {
        assert_eq!(frame(1, 3).counter(), "Move 3 / 4");
        assert!(!frame(1, 3).is_final());
        assert!(frame(1, 4).is_final());
    }
}
