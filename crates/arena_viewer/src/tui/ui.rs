//! Stateless UI rendering for the replay viewer.

use arena_replay::{Board, Cell, HistoryEntry, Player, ReplayFrame, SinkState};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListState, Paragraph, Wrap},
};

use super::app::App;
use crate::session::ReplaySession;

/// Renders the whole viewer.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(6),    // Board and history
            Constraint::Length(3), // Counter and slider
            Constraint::Length(3), // Status
        ])
        .split(area);

    match (app.display(), app.session()) {
        (SinkState::Frame(replay), Some(session)) => {
            draw_title(frame, chunks[0], &session.title());
            draw_body(frame, chunks[1], replay, session, app.cursor());
            draw_counter(frame, chunks[2], replay);
        }
        (SinkState::NotFound { game, reason }, _) => {
            draw_title(frame, chunks[0], &format!("Game {game}"));
            draw_not_found(frame, chunks[1], reason);
        }
        _ => {
            draw_title(frame, chunks[0], "Arena Viewer");
        }
    }

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[3]);
}

fn draw_title(frame: &mut Frame, area: Rect, title: &str) {
    let title = Paragraph::new(title.to_string())
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, area);
}

fn draw_body(
    frame: &mut Frame,
    area: Rect,
    replay: &ReplayFrame,
    session: &ReplaySession,
    cursor: usize,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let board = Paragraph::new(board_lines(replay.board()))
        .alignment(Alignment::Center)
        .block(Block::default().title("Board").borders(Borders::ALL));
    frame.render_widget(board, columns[0]);

    let history = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[1]);

    for (player, column) in [(Player::One, history[0]), (Player::Two, history[1])] {
        let entries = session.column(player);
        let lines = history_lines(&entries, *replay.position(), cursor);
        let list =
            List::new(lines).block(Block::default().title(player.to_string()).borders(Borders::ALL));
        let mut state = ListState::default();
        state.select(anchor_row(&entries, cursor));
        frame.render_stateful_widget(list, column, &mut state);
    }
}

/// Row a history column keeps in view: the entry under the cursor, or the
/// player's latest entry before it.
fn anchor_row(entries: &[HistoryEntry], cursor: usize) -> Option<usize> {
    entries
        .iter()
        .rposition(|entry| entry.index <= cursor)
        .or((!entries.is_empty()).then_some(0))
}

/// Board rows as styled lines, last row first, on a checker background.
pub fn board_lines(board: &Board) -> Vec<Line<'static>> {
    (0..board.rows())
        .rev()
        .map(|row| {
            let spans: Vec<Span<'static>> = (0..board.cols())
                .map(|col| {
                    let cell = board.get(row, col).unwrap_or_default();
                    Span::styled(format!(" {} ", cell_glyph(cell)), cell_style(cell, row, col))
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn cell_glyph(cell: Cell) -> char {
    match cell {
        Cell::Empty => ' ',
        occupied => occupied.symbol(),
    }
}

fn cell_style(cell: Cell, row: usize, col: usize) -> Style {
    let background = if Board::is_light(row, col) {
        Color::Gray
    } else {
        Color::DarkGray
    };
    let base = Style::default().bg(background);
    match cell {
        Cell::Empty => base,
        Cell::Occupied(Player::One) => base.fg(Color::Blue).add_modifier(Modifier::BOLD),
        Cell::Occupied(Player::Two) => base.fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

fn history_lines(entries: &[HistoryEntry], position: usize, cursor: usize) -> Vec<Line<'static>> {
    entries
        .iter()
        .map(|entry| {
            let mut style = Style::default();
            if entry.position() == position {
                style = style.fg(Color::Green).add_modifier(Modifier::BOLD);
            }
            if entry.index == cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Line::from(Span::styled(entry.label(), style))
        })
        .collect()
}

fn draw_counter(frame: &mut Frame, area: Rect, replay: &ReplayFrame) {
    let total = *replay.total_moves();
    let ratio = if total == 0 {
        1.0
    } else {
        *replay.position() as f64 / total as f64
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(ratio)
        .label(replay.counter());
    frame.render_widget(gauge, area);
}

fn draw_not_found(frame: &mut Frame, area: Rect, reason: &str) {
    let message = Paragraph::new(vec![
        Line::from(Span::styled(
            "Game not found",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(reason.to_string()),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(message, area);
}
