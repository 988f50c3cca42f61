//! One loaded game and the viewer's position in it.

use arena_replay::{
    FrameSink, GameId, HistoryEntry, InvariantSet, NavRequest, Outcome, Player, ReplayError,
    ReplayErrorKind, ReplayFrame, ReplayInvariants, ReplayStrategy, ScrubController,
    verify_terminal,
};
use derive_more::{Display, Error, From};
use tracing::{info, instrument, warn};

use crate::source::{GameSource, LoadError, LoadedGame};

/// Failure to open a replay session.
#[derive(Debug, Clone, Display, Error, From)]
pub enum SessionError {
    /// The game could not be loaded.
    #[display("{}", _0)]
    Load(LoadError),
    /// The game was loaded but cannot be replayed.
    #[display("{}", _0)]
    Replay(ReplayError),
}

/// A game being viewed: the controller plus what the title bar needs.
///
/// Built once per game load. Dropping it discards every derived board.
#[derive(Debug, Clone)]
pub struct ReplaySession {
    game: GameId,
    outcome: Option<Outcome>,
    controller: ScrubController,
    terminal_warning: Option<String>,
}

impl ReplaySession {
    /// Opens a loaded game at its final position.
    ///
    /// A terminal snapshot that disagrees with the replayed history does not
    /// prevent viewing; it is kept as a warning.
    ///
    /// # Errors
    ///
    /// Fails if the record cannot be replayed at all.
    #[instrument(skip(loaded), fields(game = %loaded.id()))]
    pub fn open(loaded: LoadedGame, strategy: ReplayStrategy) -> Result<Self, ReplayError> {
        let (game, outcome, state) = loaded.into_parts();

        let terminal_warning = match verify_terminal(&state) {
            Ok(()) => None,
            Err(ReplayError {
                kind: ReplayErrorKind::TerminalMismatch { changes },
                ..
            }) => {
                warn!(cells = changes.len(), "Snapshot disagrees with history");
                Some(format!(
                    "Final snapshot disagrees with history in {} cell(s)",
                    changes.len()
                ))
            }
            Err(e) => return Err(e),
        };

        if let Err(violations) = ReplayInvariants::check_all(&state) {
            for violation in &violations {
                warn!(%violation, "Record violates invariant");
            }
        }

        let controller = ScrubController::initialize(state, strategy)?;
        info!(total_moves = controller.total_moves(), "Replay session opened");
        Ok(Self {
            game,
            outcome,
            controller,
            terminal_warning,
        })
    }

    /// Fetches `game` from `source` and opens it.
    ///
    /// On failure the sink is told the game was not found, so a viewer can
    /// show that instead of a board.
    ///
    /// # Errors
    ///
    /// Any load or replay error.
    #[instrument(skip(source, sink), fields(source = %source.describe()))]
    pub async fn load(
        source: &dyn GameSource,
        game: GameId,
        strategy: ReplayStrategy,
        sink: &mut dyn FrameSink,
    ) -> Result<Self, SessionError> {
        let result = match source.fetch(game).await {
            Ok(loaded) => Self::open(loaded, strategy).map_err(SessionError::from),
            Err(e) => Err(SessionError::from(e)),
        };

        match result {
            Ok(session) => {
                sink.frame(session.frame().clone());
                Ok(session)
            }
            Err(e) => {
                sink.not_found(game, &e.to_string());
                Err(e)
            }
        }
    }

    /// Applies a navigation request and forwards the new frame to `sink`.
    ///
    /// A rejected request leaves both the session and the sink untouched.
    ///
    /// # Errors
    ///
    /// The controller's range error.
    #[instrument(skip(self, sink), fields(game = %self.game))]
    pub fn navigate(
        &mut self,
        request: NavRequest,
        sink: &mut dyn FrameSink,
    ) -> Result<(), ReplayError> {
        let frame = self.controller.navigate(request)?.clone();
        sink.frame(frame);
        Ok(())
    }

    /// The game being viewed.
    pub fn game(&self) -> GameId {
        self.game
    }

    /// Recorded outcome, if the source supplied one.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Warning about the final snapshot, if any.
    pub fn terminal_warning(&self) -> Option<&str> {
        self.terminal_warning.as_deref()
    }

    /// The controller's current frame.
    pub fn frame(&self) -> &ReplayFrame {
        self.controller.frame()
    }

    /// Current position.
    pub fn position(&self) -> usize {
        self.controller.position()
    }

    /// Number of turns.
    pub fn total_moves(&self) -> usize {
        self.controller.total_moves()
    }

    /// All history entries.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.controller.history_entries()
    }

    /// History entries for one player's column.
    pub fn column(&self, player: Player) -> Vec<HistoryEntry> {
        self.controller.entries_for(player)
    }

    /// Title line, e.g. `Game 12 - Player 1 Wins`.
    pub fn title(&self) -> String {
        match self.outcome {
            Some(outcome) => format!("Game {} - {}", self.game, outcome),
            None => format!("Game {}", self.game),
        }
    }
}
