//! Scrub controller: the user's position in a replay.
//!
//! The controller owns the authoritative [`GameState`] and the current
//! position `k`. Every navigation request funnels into [`ScrubController::seek`],
//! which validates `k`, asks the replay engine for the board and produces a
//! new [`ReplayFrame`]. A rejected request changes nothing.

use tracing::{debug, info, instrument, warn};

use crate::board::Player;
use crate::error::{ReplayError, ReplayErrorKind};
use crate::frame::ReplayFrame;
use crate::game_state::GameState;
use crate::replay::{ReplayStrategy, Replayer, validate};
use crate::turn::Turn;

/// A navigation request from the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavRequest {
    /// Show the board right after history entry `i` (0-based).
    JumpToMove(usize),
    /// Show the board after `k` turns, e.g. from a slider.
    SetPosition(i64),
    /// One turn forward.
    StepForward,
    /// One turn back.
    StepBack,
    /// The starting layout.
    First,
    /// The end of the game.
    Last,
}

/// One line of the move list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    /// 0-based index into the history.
    pub index: usize,
    /// The recorded turn.
    pub turn: Turn,
}

impl HistoryEntry {
    /// Label shown in the move list, e.g. `Move 3: (1, 0) → (2, 0)`.
    pub fn label(&self) -> String {
        format!("Move {}: {}", self.index + 1, self.turn)
    }

    /// Position to seek to when this entry is selected.
    pub fn position(&self) -> usize {
        self.index + 1
    }
}

/// Holds a game and the position being viewed.
#[derive(Debug, Clone)]
pub struct ScrubController {
    state: GameState,
    replayer: Replayer,
    position: usize,
    generation: u64,
    frame: ReplayFrame,
}

impl ScrubController {
    /// Takes ownership of a game and positions the view at its end (`k = N`).
    ///
    /// The record is validated once here; a corrupt record is rejected
    /// before anything is shown.
    ///
    /// # Errors
    ///
    /// Returns the validation error for unusable dimensions, a snapshot of
    /// the wrong shape, or a turn that leaves the board.
    #[instrument(skip(state), fields(total = state.total_moves()))]
    pub fn initialize(state: GameState, strategy: ReplayStrategy) -> Result<Self, ReplayError> {
        validate(&state)?;
        let replayer = Replayer::new(strategy, &state)?;
        let position = state.total_moves();
        let frame = build_frame(&state, &replayer, position, 1)?;

        info!(position, %strategy, "Scrub controller initialized");
        Ok(Self {
            state,
            replayer,
            position,
            generation: 1,
            frame,
        })
    }

    /// Replaces the game being viewed, discarding every derived view.
    ///
    /// The generation keeps counting so frames of the new game supersede
    /// frames of the old one. On error the controller is unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`ScrubController::initialize`].
    #[instrument(skip(self, state), fields(total = state.total_moves()))]
    pub fn reload(&mut self, state: GameState) -> Result<&ReplayFrame, ReplayError> {
        validate(&state)?;
        let replayer = Replayer::new(self.replayer.strategy(), &state)?;
        let position = state.total_moves();
        let generation = self.generation + 1;
        let frame = build_frame(&state, &replayer, position, generation)?;

        info!(position, generation, "Scrub controller reloaded");
        self.state = state;
        self.replayer = replayer;
        self.position = position;
        self.generation = generation;
        self.frame = frame;
        Ok(&self.frame)
    }

    /// Moves to position `k` and returns the new frame.
    ///
    /// `k` is signed so callers passing `-1` get a range error rather than
    /// a wrapped index.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayErrorKind::PositionOutOfRange`] unless `0 <= k <= N`.
    /// The controller's position and frame are left as they were.
    #[instrument(skip(self), fields(current = self.position, total = self.total_moves()))]
    pub fn seek(&mut self, k: i64) -> Result<&ReplayFrame, ReplayError> {
        let total = self.total_moves();
        let position = match usize::try_from(k) {
            Ok(p) if p <= total => p,
            _ => {
                warn!(requested = k, total, "Rejected out-of-range seek");
                return Err(ReplayErrorKind::PositionOutOfRange {
                    requested: k,
                    total,
                }
                .into());
            }
        };

        let generation = self.generation + 1;
        let frame = build_frame(&self.state, &self.replayer, position, generation)?;

        debug!(position, generation, "Seek complete");
        self.position = position;
        self.generation = generation;
        self.frame = frame;
        Ok(&self.frame)
    }

    /// Shows the board right after history entry `index`, i.e. `seek(index + 1)`.
    ///
    /// # Errors
    ///
    /// Out of range unless `index < N`.
    #[instrument(skip(self))]
    pub fn seek_to_history_index(&mut self, index: usize) -> Result<&ReplayFrame, ReplayError> {
        let k = i64::try_from(index).map_or(i64::MAX, |i| i.saturating_add(1));
        self.seek(k)
    }

    /// One turn forward.
    ///
    /// # Errors
    ///
    /// Out of range when already at the end.
    pub fn step_forward(&mut self) -> Result<&ReplayFrame, ReplayError> {
        self.seek(self.signed_position() + 1)
    }

    /// One turn back.
    ///
    /// # Errors
    ///
    /// Out of range when already at the start.
    pub fn step_back(&mut self) -> Result<&ReplayFrame, ReplayError> {
        self.seek(self.signed_position() - 1)
    }

    /// Jumps to the starting layout.
    ///
    /// # Errors
    ///
    /// Only if the record became unplayable, which validation rules out.
    pub fn seek_start(&mut self) -> Result<&ReplayFrame, ReplayError> {
        self.seek(0)
    }

    /// Jumps to the end of the game.
    ///
    /// # Errors
    ///
    /// Only if the record became unplayable, which validation rules out.
    pub fn seek_end(&mut self) -> Result<&ReplayFrame, ReplayError> {
        let end = i64::try_from(self.total_moves()).unwrap_or(i64::MAX);
        self.seek(end)
    }

    /// Dispatches a navigation request to the matching seek.
    ///
    /// # Errors
    ///
    /// Whatever the underlying seek returns.
    #[instrument(skip(self))]
    pub fn navigate(&mut self, request: NavRequest) -> Result<&ReplayFrame, ReplayError> {
        match request {
            NavRequest::JumpToMove(index) => self.seek_to_history_index(index),
            NavRequest::SetPosition(k) => self.seek(k),
            NavRequest::StepForward => self.step_forward(),
            NavRequest::StepBack => self.step_back(),
            NavRequest::First => self.seek_start(),
            NavRequest::Last => self.seek_end(),
        }
    }

    /// Current position `k`.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of turns in the game (`N`).
    pub fn total_moves(&self) -> usize {
        self.state.total_moves()
    }

    /// The frame for the current position.
    pub fn frame(&self) -> &ReplayFrame {
        &self.frame
    }

    /// The game being viewed.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The strategy used to produce boards.
    pub fn strategy(&self) -> ReplayStrategy {
        self.replayer.strategy()
    }

    /// Every history entry in order.
    pub fn history_entries(&self) -> Vec<HistoryEntry> {
        self.state
            .history()
            .iter()
            .enumerate()
            .map(|(index, turn)| HistoryEntry { index, turn: *turn })
            .collect()
    }

    /// History entries made by `player`, in order.
    pub fn entries_for(&self, player: Player) -> Vec<HistoryEntry> {
        self.history_entries()
            .into_iter()
            .filter(|entry| entry.turn.player() == player)
            .collect()
    }

    fn signed_position(&self) -> i64 {
        i64::try_from(self.position).unwrap_or(i64::MAX)
    }
}

fn build_frame(
    state: &GameState,
    replayer: &Replayer,
    position: usize,
    generation: u64,
) -> Result<ReplayFrame, ReplayError> {
    let board = replayer.board_at(state, position)?;
    let last_turn = position
        .checked_sub(1)
        .and_then(|i| state.history().get(i))
        .copied();
    Ok(ReplayFrame::new(
        generation,
        board,
        position,
        state.total_moves(),
        last_turn,
    ))
}
