//! reversi-core - rules engine for two-player Reversi
//!
//! This crate provides the game logic only: board state, legal-move
//! validation with capture resolution, candidate enumeration, and the
//! per-session turn/phase state machine. It performs no I/O, never logs,
//! and holds no global state; the session registry and any transport layer
//! sit on top of it.
//!
//! # Modules
//!
//! - [`board`]: the 8x8 grid, cell states, and the canonical opening
//! - [`moves`]: move legality, capture resolution, candidate enumeration
//! - [`player`]: seated players
//! - [`session`]: pairing, turn alternation, pass and win detection

pub mod board;
pub mod moves;
pub mod player;
pub mod session;

// Re-export commonly used types
pub use board::{Board, Cell, Color, OutOfBounds, BOARD_SIZE};
pub use moves::{apply_move, candidates, MoveError};
pub use player::Player;
pub use session::{Move, MoveOutcome, Session, SessionError, SessionPhase};
