//! Move validation, capture resolution, and candidate enumeration.
//!
//! A move is legal when the target cell is empty, in bounds, and brackets at
//! least one run of opposing discs against a disc of the moving color along
//! one of the eight compass directions. Applying a legal move flips every
//! bracketed disc; an illegal move leaves the board untouched.

use crate::board::{Board, Cell, Color, BOARD_SIZE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The eight compass directions as `(row, col)` deltas, clockwise from north.
const DIRECTIONS: [(isize, isize); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

/// Why a requested move was rejected. Each variant is reported to the caller
/// as a normal negative result; none of them mutate the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum MoveError {
    #[error("coordinates ({row}, {col}) are outside the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("cell ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },

    #[error("a disc at ({row}, {col}) would capture nothing")]
    NoCapture { row: usize, col: usize },
}

/// Apply a move for `color` at `(row, col)`.
///
/// On success the target cell receives a disc of the moving color, every
/// bracketed opposing disc is flipped, and the captured coordinates are
/// returned. On failure the board is byte-for-byte unchanged: captures are
/// collected before any cell is written.
pub fn apply_move(
    board: &mut Board,
    color: Color,
    row: usize,
    col: usize,
) -> Result<Vec<(usize, usize)>, MoveError> {
    if row >= BOARD_SIZE || col >= BOARD_SIZE {
        return Err(MoveError::OutOfBounds { row, col });
    }
    if !board.cell(row, col).is_empty() {
        return Err(MoveError::Occupied { row, col });
    }

    let captured = captures(board, color, row, col);
    if captured.is_empty() {
        return Err(MoveError::NoCapture { row, col });
    }

    board.set_cell(row, col, Cell::Disc(color));
    for &(r, c) in &captured {
        board.set_cell(r, c, Cell::Disc(color));
    }

    Ok(captured)
}

/// Collect every opposing disc a move at `(row, col)` would flip.
///
/// Scans outward along each direction while cells hold the opposing color.
/// A scan that leaves the board or reaches an empty cell contributes no
/// capture; a scan that ends on the moving color captures the run between.
fn captures(board: &Board, color: Color, row: usize, col: usize) -> Vec<(usize, usize)> {
    let mut captured = Vec::new();

    for (dr, dc) in DIRECTIONS {
        let mut run = Vec::new();
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;

        loop {
            if r < 0 || c < 0 || r >= BOARD_SIZE as isize || c >= BOARD_SIZE as isize {
                run.clear();
                break;
            }
            match board.cell(r as usize, c as usize) {
                Cell::Empty => {
                    run.clear();
                    break;
                }
                Cell::Disc(d) if d == color => break,
                Cell::Disc(_) => run.push((r as usize, c as usize)),
            }
            r += dr;
            c += dc;
        }

        captured.extend(run);
    }

    captured
}

/// Enumerate every legal destination for `color` in row-major order.
///
/// The ordering (top-to-bottom, left-to-right, as `(row, col)` pairs) is a
/// contract other components and tests rely on. Each probe trials the
/// resolver against a copy of the board, so the caller's board is never
/// touched. O(N^3) over the side length, acceptable at N = 8.
pub fn candidates(board: &Board, color: Color) -> Vec<(usize, usize)> {
    let mut found = Vec::new();

    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            let mut trial = *board;
            if apply_move(&mut trial, color, row, col).is_ok() {
                found.push((row, col));
            }
        }
    }

    found
}
