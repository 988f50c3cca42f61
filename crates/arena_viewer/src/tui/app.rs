//! Viewer state and key handling.

use arena_replay::{LatestFrame, NavRequest, ReplayFrame, SinkState};
use crossterm::event::KeyCode;
use tracing::{debug, info};

use crate::session::ReplaySession;

/// What a key press asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Navigate the replay.
    Navigate(NavRequest),
    /// Move the history cursor by the given offset.
    MoveCursor(isize),
    /// Show the board after the highlighted history entry.
    JumpToCursor,
    /// Leave the viewer.
    Quit,
    /// Nothing bound to this key.
    Ignore,
}

/// Maps a key to its action.
pub fn key_action(key: KeyCode) -> KeyAction {
    match key {
        KeyCode::Left => KeyAction::Navigate(NavRequest::StepBack),
        KeyCode::Right => KeyAction::Navigate(NavRequest::StepForward),
        KeyCode::Home => KeyAction::Navigate(NavRequest::First),
        KeyCode::End => KeyAction::Navigate(NavRequest::Last),
        KeyCode::Up => KeyAction::MoveCursor(-1),
        KeyCode::Down => KeyAction::MoveCursor(1),
        KeyCode::Enter => KeyAction::JumpToCursor,
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        _ => KeyAction::Ignore,
    }
}

/// Main application state.
pub struct App {
    session: Option<ReplaySession>,
    sink: LatestFrame,
    cursor: usize,
    status_message: String,
    should_quit: bool,
}

impl App {
    /// Creates the app from a load attempt. `sink` already holds either the
    /// first frame or the not-found signal.
    pub fn new(session: Option<ReplaySession>, sink: LatestFrame) -> Self {
        let status_message = match &session {
            Some(s) => default_status(s),
            None => "Press q to quit".to_string(),
        };
        let cursor = session
            .as_ref()
            .map_or(0, |s| s.position().saturating_sub(1));
        Self {
            session,
            sink,
            cursor,
            status_message,
            should_quit: false,
        }
    }

    /// The loaded session, if any.
    pub fn session(&self) -> Option<&ReplaySession> {
        self.session.as_ref()
    }

    /// What the rendering boundary should paint.
    pub fn display(&self) -> &SinkState {
        self.sink.state()
    }

    /// The frame being painted, if any.
    pub fn frame(&self) -> Option<&ReplayFrame> {
        self.sink.current()
    }

    /// Highlighted history entry (0-based).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// True once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handles one key press.
    pub fn handle_key(&mut self, key: KeyCode) {
        match key_action(key) {
            KeyAction::Quit => {
                info!("User quit");
                self.should_quit = true;
            }
            KeyAction::MoveCursor(delta) => self.move_cursor(delta),
            KeyAction::JumpToCursor => self.jump_to_cursor(),
            KeyAction::Navigate(request) => self.navigate(request),
            KeyAction::Ignore => {}
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let Some(session) = &self.session else {
            return;
        };
        let last = session.total_moves().saturating_sub(1);
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
        debug!(cursor = self.cursor, "History cursor moved");
    }

    fn jump_to_cursor(&mut self) {
        let has_moves = self.session.as_ref().is_some_and(|s| s.total_moves() > 0);
        if has_moves {
            self.navigate(NavRequest::JumpToMove(self.cursor));
        }
    }

    fn navigate(&mut self, request: NavRequest) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        // Steps clamp to [0, N] here; the controller re-validates anyway.
        let position = session.position();
        let blocked = match request {
            NavRequest::StepBack => position == 0,
            NavRequest::StepForward => position >= session.total_moves(),
            _ => false,
        };
        if blocked {
            debug!(?request, position, "Navigation clamped at end of history");
            return;
        }

        match session.navigate(request, &mut self.sink) {
            Ok(()) => {
                self.cursor = session.position().saturating_sub(1);
                self.status_message = default_status(session);
            }
            Err(e) => {
                self.status_message = format!("Rejected: {}", e.kind);
            }
        }
    }
}

/// Key help shown in the status bar.
pub fn help_text() -> &'static str {
    "←/→ step  Home/End first/last  ↑/↓ select  Enter jump  q quit"
}

fn default_status(session: &ReplaySession) -> String {
    match session.terminal_warning() {
        Some(warning) => format!("Warning: {warning}"),
        None => help_text().to_string(),
    }
}
