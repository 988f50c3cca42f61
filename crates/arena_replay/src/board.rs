//! Board model: a fixed-size grid of cells for a two-player game.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{ReplayError, ReplayErrorKind};

/// Player in the game.
///
/// Player one starts on row 0 and moves toward the last row; player two
/// starts on the last row and moves toward row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Player {
    /// Player 1, home row 0.
    One,
    /// Player 2, home row is the last row.
    Two,
}

impl Player {
    /// Returns the wire number of this player (1 or 2).
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

impl TryFrom<u8> for Player {
    type Error = CellValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            other => Err(CellValueError::new(other)),
        }
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> Self {
        player.number()
    }
}

/// A single cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Cell {
    /// No piece.
    #[default]
    Empty,
    /// A piece owned by a player.
    Occupied(Player),
}

impl Cell {
    /// Returns the player occupying this cell, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(p) => Some(p),
        }
    }

    /// Single-character symbol used by the text renderer.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Occupied(Player::One) => '1',
            Cell::Occupied(Player::Two) => '2',
        }
    }
}

impl TryFrom<u8> for Cell {
    type Error = CellValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Cell::Empty),
            other => Player::try_from(other).map(Cell::Occupied),
        }
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => 0,
            Cell::Occupied(p) => p.number(),
        }
    }
}

/// A cell value outside `{0, 1, 2}` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Invalid cell value {value} (expected 0, 1 or 2)")]
pub struct CellValueError {
    /// The rejected value.
    pub value: u8,
}

impl CellValueError {
    /// Creates a new cell value error.
    pub fn new(value: u8) -> Self {
        Self { value }
    }
}

/// A snapshot grid that is not a rectangle of at least 2x1.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid board shape: {message}")]
pub struct BoardShapeError {
    /// What was wrong with the grid.
    pub message: String,
}

/// A row/column pair on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Row index, 0 is player one's home row.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

impl Coord {
    /// Creates a new coordinate.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One cell that differs between two boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange {
    /// Where the boards differ.
    pub coord: Coord,
    /// Value on the first board.
    pub before: Cell,
    /// Value on the second board.
    pub after: Cell,
}

impl std::fmt::Display for CellChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} -> {}",
            self.coord,
            self.before.symbol(),
            self.after.symbol()
        )
    }
}

/// A `rows x cols` grid of cells in row-major order.
///
/// Boards are values. Updates go through [`Board::set_cell`], which returns
/// a new board, or [`Board::with_cell`], which consumes the old one. No
/// method mutates a board that someone else can still observe.
///
/// On the wire a board is a JSON array of rows of cell numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Cell>>", into = "Vec<Vec<Cell>>")]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Smallest row count that fits both starting rows.
    pub const MIN_ROWS: usize = 2;

    /// Smallest column count.
    pub const MIN_COLS: usize = 1;

    /// Creates a board with every cell empty.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayErrorKind::InvalidDimensions`] if `rows < 2` or
    /// `cols < 1`.
    #[instrument]
    pub fn empty(rows: usize, cols: usize) -> Result<Self, ReplayError> {
        let len = Self::cell_count(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::Empty; len],
        })
    }

    /// Number of cells a `rows x cols` board holds, without allocating it.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayErrorKind::InvalidDimensions`] if `rows < 2`,
    /// `cols < 1`, or the cell count does not fit in a `usize`.
    pub fn cell_count(rows: usize, cols: usize) -> Result<usize, ReplayError> {
        if rows < Self::MIN_ROWS || cols < Self::MIN_COLS {
            return Err(ReplayErrorKind::InvalidDimensions { rows, cols }.into());
        }
        rows.checked_mul(cols)
            .ok_or_else(|| ReplayErrorKind::InvalidDimensions { rows, cols }.into())
    }

    /// Creates the canonical starting layout for a `rows x cols` game.
    ///
    /// # Errors
    ///
    /// Same as [`Board::empty`].
    #[instrument]
    pub fn starting_layout(rows: usize, cols: usize) -> Result<Self, ReplayError> {
        Ok(Self::empty(rows, cols)?.with_standard_starting_rows())
    }

    /// Returns a board of the same size with player one's pieces on row 0,
    /// player two's pieces on the last row, and every other row empty.
    pub fn with_standard_starting_rows(&self) -> Self {
        let last = self.rows - 1;
        let cells = (0..self.rows)
            .flat_map(|row| {
                let cell = match row {
                    0 => Cell::Occupied(Player::One),
                    r if r == last => Cell::Occupied(Player::Two),
                    _ => Cell::Empty,
                };
                std::iter::repeat_n(cell, self.cols)
            })
            .collect();
        Self {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }

    /// Returns a copy of this board with one cell changed.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is outside the board. Coordinates reaching
    /// this point have already been bounds-checked against the record.
    pub fn set_cell(&self, row: usize, col: usize, cell: Cell) -> Self {
        self.clone().with_cell(row, col, cell)
    }

    /// Consumes the board and returns it with one cell changed.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is outside the board.
    pub fn with_cell(mut self, row: usize, col: usize, cell: Cell) -> Self {
        assert!(
            self.contains(row, col),
            "cell ({row}, {col}) outside {}x{} board",
            self.rows,
            self.cols
        );
        let idx = self.index(row, col);
        self.cells[idx] = cell;
        self
    }

    /// Gets the cell at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if self.contains(row, col) {
            Some(self.cells[self.index(row, col)])
        } else {
            None
        }
    }

    /// Gets the cell at a coordinate.
    pub fn at(&self, coord: Coord) -> Option<Cell> {
        self.get(coord.row, coord.col)
    }

    /// Checks whether `(row, col)` lies on the board.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns one row as a slice.
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        (row < self.rows).then(|| &self.cells[row * self.cols..(row + 1) * self.cols])
    }

    /// Iterates rows from row 0 upward.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols)
    }

    /// Counts the pieces a player has on the board.
    pub fn pieces(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == Cell::Occupied(player))
            .count()
    }

    /// Checker colouring used by renderers: light when `row + col` is even.
    pub fn is_light(row: usize, col: usize) -> bool {
        (row + col) % 2 == 0
    }

    /// Lists every cell where `self` and `other` differ.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayErrorKind::DimensionMismatch`] if the boards have
    /// different sizes.
    #[instrument(skip(self, other))]
    pub fn diff(&self, other: &Board) -> Result<Vec<CellChange>, ReplayError> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(ReplayErrorKind::DimensionMismatch {
                left_rows: self.rows,
                left_cols: self.cols,
                right_rows: other.rows,
                right_cols: other.cols,
            }
            .into());
        }

        let changes: Vec<_> = self
            .cells
            .iter()
            .zip(&other.cells)
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(idx, (before, after))| CellChange {
                coord: Coord::new(idx / self.cols, idx % self.cols),
                before: *before,
                after: *after,
            })
            .collect();

        debug!(changed = changes.len(), "Diffed boards");
        Ok(changes)
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }
}

impl std::fmt::Display for Board {
    /// Prints the last row first so player one's home row is at the bottom.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.cells.chunks(self.cols).rev().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line: String = row.iter().map(|c| c.symbol()).collect();
            write!(f, "{line}")?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<Vec<Cell>>> for Board {
    type Error = BoardShapeError;

    fn try_from(grid: Vec<Vec<Cell>>) -> Result<Self, Self::Error> {
        let rows = grid.len();
        let cols = grid.first().map_or(0, Vec::len);

        if rows < Self::MIN_ROWS || cols < Self::MIN_COLS {
            return Err(BoardShapeError {
                message: format!("{rows}x{cols} grid is smaller than 2x1"),
            });
        }
        if let Some((idx, row)) = grid.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(BoardShapeError {
                message: format!("row {idx} has {} cells, expected {cols}", row.len()),
            });
        }

        Ok(Self {
            rows,
            cols,
            cells: grid.into_iter().flatten().collect(),
        })
    }
}

impl From<Board> for Vec<Vec<Cell>> {
    fn from(board: Board) -> Self {
        board.iter_rows().map(<[Cell]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflowing_dimensions_rejected() {
        let err = Board::empty(usize::MAX, 2).unwrap_err();
        assert!(matches!(err.kind, ReplayErrorKind::InvalidDimensions { cols: 2, .. }));
        assert!(Board::cell_count(1 << 32, (1 << 32) + 1).is_err());
        assert_eq!(Board::cell_count(3, 4).unwrap(), 12);
    }

    #[test]
    fn test_empty_board_has_no_pieces() {
        let board = Board::empty(3, 5).expect("Valid dimensions");
        assert_eq!(board.rows(), 3);
        assert_eq!(board.cols(), 5);
        assert_eq!(board.pieces(Player::One), 0);
        assert_eq!(board.pieces(Player::Two), 0);
    }

    #[test]
    fn test_empty_rejects_single_row() {
        let err = Board::empty(1, 4).unwrap_err();
        assert_eq!(err.kind, ReplayErrorKind::InvalidDimensions { rows: 1, cols: 4 });
    }

    #[test]
    fn test_starting_rows_fill_home_rows_only() {
        let board = Board::starting_layout(5, 3).expect("Valid dimensions");
        assert_eq!(board.row(0), Some(&[Cell::Occupied(Player::One); 3][..]));
        assert_eq!(board.row(4), Some(&[Cell::Occupied(Player::Two); 3][..]));
        for row in 1..4 {
            assert!(board.row(row).unwrap().iter().all(|c| *c == Cell::Empty));
        }
    }

    #[test]
    fn test_starting_rows_clear_existing_pieces() {
        let cluttered = Board::empty(4, 4)
            .unwrap()
            .with_cell(2, 2, Cell::Occupied(Player::One));
        let board = cluttered.with_standard_starting_rows();
        assert_eq!(board.get(2, 2), Some(Cell::Empty));
    }

    #[test]
    fn test_set_cell_leaves_original_untouched() {
        let original = Board::empty(2, 2).unwrap();
        let updated = original.set_cell(1, 1, Cell::Occupied(Player::Two));
        assert_eq!(original.get(1, 1), Some(Cell::Empty));
        assert_eq!(updated.get(1, 1), Some(Cell::Occupied(Player::Two)));
    }

    #[test]
    #[should_panic(expected = "outside 2x2 board")]
    fn test_set_cell_out_of_bounds_panics() {
        let board = Board::empty(2, 2).unwrap();
        let _ = board.set_cell(2, 0, Cell::Empty);
    }

    #[test]
    fn test_get_out_of_bounds_is_none() {
        let board = Board::empty(2, 2).unwrap();
        assert_eq!(board.get(0, 2), None);
        assert_eq!(board.get(5, 0), None);
    }

    #[test]
    fn test_diff_reports_changed_cells() {
        let a = Board::starting_layout(3, 3).unwrap();
        let b = a
            .set_cell(0, 1, Cell::Empty)
            .set_cell(1, 1, Cell::Occupied(Player::One));
        let changes = a.diff(&b).unwrap();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].coord, Coord::new(0, 1));
        assert_eq!(changes[0].after, Cell::Empty);
        assert_eq!(changes[1].coord, Coord::new(1, 1));
    }

    #[test]
    fn test_diff_rejects_other_dimensions() {
        let a = Board::empty(3, 3).unwrap();
        let b = Board::empty(3, 4).unwrap();
        assert!(matches!(
            a.diff(&b).unwrap_err().kind,
            ReplayErrorKind::DimensionMismatch { .. }
        ));
    }

    #[test]
    fn test_display_puts_last_row_on_top() {
        let board = Board::starting_layout(3, 2).unwrap();
        assert_eq!(board.to_string(), "22\n..\n11");
    }

    #[test]
    fn test_board_json_round_trip_shape() {
        let board: Board = serde_json::from_str("[[1,1],[0,0],[2,2]]").expect("Valid grid");
        assert_eq!(board, Board::starting_layout(3, 2).unwrap());
        assert_eq!(
            serde_json::to_string(&board).unwrap(),
            "[[1,1],[0,0],[2,2]]"
        );
    }

    #[test]
    fn test_board_json_rejects_ragged_rows() {
        let result: Result<Board, _> = serde_json::from_str("[[1,1],[0],[2,2]]");
        assert!(result.is_err());
    }

    #[test]
    fn test_board_json_rejects_unknown_cell_value() {
        let result: Result<Board, _> = serde_json::from_str("[[1,3],[0,0],[2,2]]");
        assert!(result.is_err());
    }
}
