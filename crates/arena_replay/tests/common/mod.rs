//! Shared fixtures for replay tests.

#![allow(dead_code)]

use arena_replay::{Board, Cell, Coord, GameState, Player, Turn};

/// The 4x4 two-move game used throughout the docs.
pub fn four_by_four() -> GameState {
    let history = vec![
        Turn::new(Player::One, Coord::new(0, 0), Coord::new(1, 0)),
        Turn::new(Player::Two, Coord::new(3, 1), Coord::new(2, 1)),
    ];
    let snapshot = Board::starting_layout(4, 4)
        .unwrap()
        .set_cell(0, 0, Cell::Empty)
        .set_cell(1, 0, Cell::Occupied(Player::One))
        .set_cell(3, 1, Cell::Empty)
        .set_cell(2, 1, Cell::Occupied(Player::Two));
    GameState::new(4, 4, history, snapshot)
}

/// Plays up to `max_turns` forward steps, alternating players, and returns
/// a well-formed record whose snapshot is the final board.
///
/// Each player advances the first of its pieces that has an empty cell
/// ahead of it. Play stops early when the mover is stuck.
pub fn marching_game(rows: usize, cols: usize, max_turns: usize) -> GameState {
    let mut board = Board::starting_layout(rows, cols).unwrap();
    let mut history = Vec::new();
    let mut player = Player::One;

    for _ in 0..max_turns {
        let Some(turn) = next_step(&board, player) else {
            break;
        };
        let (from, to) = (turn.source(), turn.destination());
        board = board
            .set_cell(from.row, from.col, Cell::Empty)
            .set_cell(to.row, to.col, Cell::Occupied(player));
        history.push(turn);
        player = player.opponent();
    }

    GameState::new(rows, cols, history, board)
}

fn next_step(board: &Board, player: Player) -> Option<Turn> {
    let rows: Vec<usize> = match player {
        Player::One => (0..board.rows()).rev().collect(),
        Player::Two => (0..board.rows()).collect(),
    };
    for row in rows {
        for col in 0..board.cols() {
            if board.get(row, col) != Some(Cell::Occupied(player)) {
                continue;
            }
            let ahead = match player {
                Player::One => row + 1,
                Player::Two => match row.checked_sub(1) {
                    Some(r) => r,
                    None => continue,
                },
            };
            if board.get(ahead, col) == Some(Cell::Empty) {
                return Some(Turn::new(player, Coord::new(row, col), Coord::new(ahead, col)));
            }
        }
    }
    None
}
