//! Terminal UI for stepping through a replay.

mod app;
mod ui;

pub use app::{App, KeyAction, help_text, key_action};
pub use ui::{board_lines, draw};

use std::io;
use std::time::Duration;

use anyhow::Result;
use arena_replay::{GameId, LatestFrame, ReplayStrategy};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, error, info, instrument, warn};

use crate::session::ReplaySession;
use crate::source::GameSource;

/// Loads `game` from `source` and runs the viewer until the user quits.
///
/// A game that cannot be loaded is shown as a "not found" screen rather
/// than ending the program.
#[instrument(skip(source), fields(source = %source.describe()))]
pub async fn run_viewer(
    source: &dyn GameSource,
    game: GameId,
    strategy: ReplayStrategy,
) -> Result<()> {
    info!("Starting arena viewer");

    let mut sink = LatestFrame::new();
    let session = match ReplaySession::load(source, game, strategy, &mut sink).await {
        Ok(session) => Some(session),
        Err(e) => {
            warn!(error = %e, "Could not open game");
            None
        }
    };
    let mut app = App::new(session, sink);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Viewer loop error");
    }
    res
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            debug!(code = ?key.code, "Key pressed");
            app.handle_key(key.code);
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
