//! Board representation.
//!
//! This module contains:
//! - Disc colors and the cell states of the grid
//! - The fixed 8x8 board with bounds-checked access
//! - The canonical opening position
//! - The integer wire encoding (0 = empty, 1 = white, 2 = black)

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Side length of the board.
pub const BOARD_SIZE: usize = 8;

/// Disc color of one of the two players.
///
/// White always takes the first seat of a session and moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Both colors in wire-encoding order
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// The opposing color
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl From<Color> for u8 {
    fn from(color: Color) -> u8 {
        match color {
            Color::White => 1,
            Color::Black => 2,
        }
    }
}

impl TryFrom<u8> for Color {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Color::White),
            2 => Ok(Color::Black),
            other => Err(format!("invalid color value: {other}")),
        }
    }
}

/// State of a single cell on the board.
///
/// Serializes as a small integer: 0 = empty, 1 = white disc, 2 = black disc.
/// This encoding is a compatibility contract with existing clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Cell {
    Empty,
    Disc(Color),
}

impl Cell {
    /// Get the disc color on this cell, if any
    pub fn disc(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Disc(color) => Some(color),
        }
    }

    /// Check if the cell is empty
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> u8 {
        match cell {
            Cell::Empty => 0,
            Cell::Disc(color) => color.into(),
        }
    }
}

impl TryFrom<u8> for Cell {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Cell::Empty),
            other => Color::try_from(other).map(Cell::Disc),
        }
    }
}

/// Error for coordinates outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("coordinates ({row}, {col}) are outside the {BOARD_SIZE}x{BOARD_SIZE} board")]
pub struct OutOfBounds {
    pub row: usize,
    pub col: usize,
}

/// The 8x8 playing grid, addressed by `(row, col)` with `(0, 0)` top-left.
///
/// Serializes as a row-major array of arrays of cell integers, e.g. the
/// opening position encodes its fourth row as `[0, 0, 0, 1, 2, 0, 0, 0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Create the canonical opening position: all cells empty except the
    /// center 2x2 block, white on the main diagonal and black on the other.
    ///
    /// Every game outcome is seeded by this exact arrangement, so it must
    /// never change.
    pub fn opening() -> Self {
        let mut board = Self::new();
        board.cells[3][3] = Cell::Disc(Color::White);
        board.cells[3][4] = Cell::Disc(Color::Black);
        board.cells[4][3] = Cell::Disc(Color::Black);
        board.cells[4][4] = Cell::Disc(Color::White);
        board
    }

    /// Get the cell at `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> Result<Cell, OutOfBounds> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(OutOfBounds { row, col });
        }
        Ok(self.cells[row][col])
    }

    /// Set the cell at `(row, col)`. No validation beyond bounds checking.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), OutOfBounds> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(OutOfBounds { row, col });
        }
        self.cells[row][col] = cell;
        Ok(())
    }

    /// Unchecked read for callers that have already validated coordinates.
    pub(crate) fn cell(&self, row: usize, col: usize) -> Cell {
        debug_assert!(row < BOARD_SIZE && col < BOARD_SIZE);
        self.cells[row][col]
    }

    /// Unchecked write for callers that have already validated coordinates.
    pub(crate) fn set_cell(&mut self, row: usize, col: usize, cell: Cell) {
        debug_assert!(row < BOARD_SIZE && col < BOARD_SIZE);
        self.cells[row][col] = cell;
    }

    /// Count discs of the given color
    pub fn count(&self, color: Color) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.disc() == Some(color))
            .count()
    }

    /// Check whether every cell holds a disc
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|cell| !cell.is_empty())
    }

    /// The board in its external wire shape: a row-major grid of cell
    /// integers (0 = empty, 1 = white, 2 = black).
    pub fn to_grid(&self) -> Vec<Vec<u8>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|&cell| cell.into()).collect())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_opening_layout() {
        let board = Board::opening();

        assert_eq!(board.get(3, 3).unwrap(), Cell::Disc(Color::White));
        assert_eq!(board.get(3, 4).unwrap(), Cell::Disc(Color::Black));
        assert_eq!(board.get(4, 3).unwrap(), Cell::Disc(Color::Black));
        assert_eq!(board.get(4, 4).unwrap(), Cell::Disc(Color::White));

        // Every other cell is empty
        let occupied = [(3, 3), (3, 4), (4, 3), (4, 4)];
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if !occupied.contains(&(row, col)) {
                    assert_eq!(board.get(row, col).unwrap(), Cell::Empty);
                }
            }
        }

        assert_eq!(board.count(Color::White), 2);
        assert_eq!(board.count(Color::Black), 2);
        assert!(!board.is_full());
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut board = Board::opening();

        assert_eq!(
            board.get(BOARD_SIZE, 4),
            Err(OutOfBounds { row: BOARD_SIZE, col: 4 })
        );
        assert_eq!(
            board.get(4, BOARD_SIZE + 1),
            Err(OutOfBounds { row: 4, col: BOARD_SIZE + 1 })
        );
        assert!(board.set(BOARD_SIZE, 0, Cell::Empty).is_err());
        assert!(board.set(0, 0, Cell::Disc(Color::Black)).is_ok());
    }

    #[test]
    fn test_opponent_is_total_and_involutive() {
        assert_eq!(Color::White.opponent(), Color::Black);
        assert_eq!(Color::Black.opponent(), Color::White);
        for color in Color::ALL {
            assert_eq!(color.opponent().opponent(), color);
        }
    }

    #[test]
    fn test_wire_encoding_of_opening_board() {
        let board = Board::opening();

        assert_eq!(
            board.to_grid(),
            vec![
                vec![0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 1, 2, 0, 0, 0],
                vec![0, 0, 0, 2, 1, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0],
            ]
        );

        // serde produces the same shape
        let json = serde_json::to_value(board).unwrap();
        assert_eq!(json, serde_json::to_value(board.to_grid()).unwrap());
    }

    #[test]
    fn test_board_round_trips_through_serde() {
        let board = Board::opening();
        let json = serde_json::to_string(&board).unwrap();
        let decoded: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, board);
    }

    #[test]
    fn test_cell_rejects_unknown_integers() {
        assert!(Cell::try_from(3).is_err());
        assert!(serde_json::from_str::<Cell>("7").is_err());
    }
}
