//! Shared fixtures for viewer tests.

#![allow(dead_code)]

use std::io::Write;

use arena_replay::{Board, Cell, Coord, GameState, Player, Turn, reconstruct};
use tempfile::NamedTempFile;

/// Server payload for game 31: two turns on a 4x4 board.
pub const RECORD_31: &str = r#"{
    "id": 31,
    "player1_id": 7,
    "player2_id": 8,
    "outcome": 2,
    "game_state": {
        "board": [[0,1,1,1],[1,0,0,0],[0,2,0,0],[2,0,2,2]],
        "rows": 4,
        "cols": 4,
        "history": [
            {"turnID": 101, "player": 1, "sourceRow": 0, "sourceCol": 0, "destRow": 1, "destCol": 0},
            {"turnID": 102, "player": 2, "sourceRow": 3, "sourceCol": 1, "destRow": 2, "destCol": 1}
        ],
        "gameOver": true,
        "winner": 2
    }
}"#;

/// A record the server knows but could not rebuild.
pub const RECORD_WITHOUT_STATE: &str =
    r#"{"id": 31, "player1_id": 7, "player2_id": 8, "outcome": 0, "game_state": null}"#;

/// Three turns on a 5x3 board, with a matching snapshot.
pub fn opening() -> GameState {
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

/// `moves` turns on a 4x1 board, each player shuttling one piece between
/// its home row and the next.
pub fn shuttle(moves: usize) -> GameState {
    let history: Vec<Turn> = (0..moves)
        .map(|k| {
            let (player, home, next) = if k % 2 == 0 {
                (Player::One, Coord::new(0, 0), Coord::new(1, 0))
            } else {
                (Player::Two, Coord::new(3, 0), Coord::new(2, 0))
            };
            if (k / 2) % 2 == 0 {
                Turn::new(player, home, next)
            } else {
                Turn::new(player, next, home)
            }
        })
        .collect();
    let draft = GameState::new(4, 1, history.clone(), Board::starting_layout(4, 1).unwrap());
    let snapshot = reconstruct(&draft, moves).unwrap();
    GameState::new(4, 1, history, snapshot)
}

/// Writes `contents` to a temporary JSON file.
pub fn json_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write game file");
    file
}
