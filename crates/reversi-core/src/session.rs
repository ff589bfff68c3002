//! Session state machine.
//!
//! A session pairs two players over one board and advances turn and phase
//! after each committed move. It starts in `Waiting` with a single player and
//! the canonical opening board, becomes active when a second player joins,
//! then alternates turns until neither color can move.

use crate::board::{Board, Color};
use crate::moves::{self, MoveError};
use crate::player::Player;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// One player seated, waiting for an opponent
    Waiting,

    /// Active, the given color to move
    Turn(Color),

    /// The given color had no legal move; the turn stays with its opponent
    Passed(Color),

    /// Terminal: the given color won
    Won(Color),

    /// Terminal: neither color could move and disc counts were equal
    Drawn,
}

impl SessionPhase {
    /// Whether this phase is terminal
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionPhase::Won(_) | SessionPhase::Drawn)
    }
}

/// A committed move, as stored in the session log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub color: Color,
    pub row: usize,
    pub col: usize,
}

/// Result of a committed move: what was flipped and where the session went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Cells flipped to the moving color, excluding the placed disc
    pub captured: Vec<(usize, usize)>,
    /// Phase after the turn-advance protocol ran
    pub phase: SessionPhase,
}

/// Errors that can occur when joining a session or applying a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SessionError {
    #[error("session has not started yet")]
    NotStarted,

    #[error("session already has two players")]
    AlreadyPaired,

    #[error("not your turn")]
    NotYourTurn,

    #[error("game is over")]
    Finished,

    #[error(transparent)]
    Move(#[from] MoveError),
}

/// One game of Reversi between two players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    players: Vec<Player>,
    phase: SessionPhase,
    turn: Color,
    board: Board,
    elapsed_moves: u32,
    last_move: Option<Move>,
    move_log: Vec<Move>,
}

impl Session {
    /// Create a session with its first player. The creator takes the white
    /// seat and will move first once an opponent joins.
    pub fn new(player: Player) -> Self {
        Self {
            players: vec![player],
            phase: SessionPhase::Waiting,
            turn: Color::White,
            board: Board::opening(),
            elapsed_moves: 1,
            last_move: None,
            move_log: Vec::new(),
        }
    }

    /// Seat a second player, transitioning `Waiting` -> active.
    pub fn join(&mut self, player: Player) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Waiting {
            return Err(SessionError::AlreadyPaired);
        }
        self.players.push(player);
        self.phase = SessionPhase::Turn(self.turn);
        Ok(())
    }

    /// Whether the session is still waiting for a second player
    pub fn is_waiting(&self) -> bool {
        self.phase == SessionPhase::Waiting
    }

    /// Whether the session has reached a terminal phase
    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    /// The winning color, if the session is over and not drawn
    pub fn winner(&self) -> Option<Color> {
        match self.phase {
            SessionPhase::Won(color) => Some(color),
            _ => None,
        }
    }

    /// Players in seat order: white first, black second
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The color seated for the given player identifier
    pub fn player_color(&self, player_id: &str) -> Option<Color> {
        self.players
            .iter()
            .position(|p| p.id == player_id)
            .and_then(|seat| Color::ALL.get(seat).copied())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The color whose move is expected next. Meaningful only once active;
    /// retained by the mover while the opponent is in a passed phase.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Elapsed-move counter, starting at 1 for a fresh session
    pub fn elapsed_moves(&self) -> u32 {
        self.elapsed_moves
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Every committed move in order
    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }

    /// Disc counts as `(white, black)`
    pub fn score(&self) -> (usize, usize) {
        (
            self.board.count(Color::White),
            self.board.count(Color::Black),
        )
    }

    /// Legal destinations for the given color, row-major
    pub fn candidates(&self, color: Color) -> Vec<(usize, usize)> {
        moves::candidates(&self.board, color)
    }

    /// Apply a move and run the turn-advance protocol.
    ///
    /// After the capture is committed: if the opponent can move, the turn
    /// alternates; if neither side can move, the session terminates on disc
    /// count; otherwise the opponent passes and the mover keeps the turn.
    pub fn play(
        &mut self,
        color: Color,
        row: usize,
        col: usize,
    ) -> Result<MoveOutcome, SessionError> {
        match self.phase {
            SessionPhase::Waiting => return Err(SessionError::NotStarted),
            SessionPhase::Won(_) | SessionPhase::Drawn => return Err(SessionError::Finished),
            SessionPhase::Turn(_) | SessionPhase::Passed(_) => {}
        }
        if color != self.turn {
            return Err(SessionError::NotYourTurn);
        }

        let captured = moves::apply_move(&mut self.board, color, row, col)?;

        self.elapsed_moves += 1;
        let committed = Move { color, row, col };
        self.last_move = Some(committed);
        self.move_log.push(committed);
        self.advance(color);

        Ok(MoveOutcome {
            captured,
            phase: self.phase,
        })
    }

    /// Turn-advance protocol. Runs the candidate generator up to twice
    /// against the live board, which is what pass/win detection costs.
    fn advance(&mut self, mover: Color) {
        let opponent = mover.opponent();

        if !moves::candidates(&self.board, opponent).is_empty() {
            self.turn = opponent;
            self.phase = SessionPhase::Turn(opponent);
        } else if moves::candidates(&self.board, mover).is_empty() {
            // Neither side can move: score by disc count.
            let (white, black) = self.score();
            self.phase = match white.cmp(&black) {
                Ordering::Greater => SessionPhase::Won(Color::White),
                Ordering::Less => SessionPhase::Won(Color::Black),
                Ordering::Equal => SessionPhase::Drawn,
            };
        } else {
            // Pass-and-repeat: the mover keeps the turn.
            self.phase = SessionPhase::Passed(opponent);
        }
    }
}
