//! Session lifecycle and pairing.
//!
//! The registry owns every live session and serializes access to it. It is
//! an explicit object handed to the transport layer, not a hidden singleton,
//! so tests can run independent registries side by side.

use crate::users::{User, UserRegistry};
use dashmap::DashMap;
use reversi_core::{Color, MoveOutcome, Player, Session, SessionError};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

/// Errors reported by registry operations. Not-found conditions are kept
/// distinct from rule violations so callers can tell "your move was illegal"
/// from "your session no longer exists".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("session not found")]
    SessionNotFound,

    #[error("user not found")]
    UserNotFound,

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// What a joining player gets back: their identity and their table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTicket {
    pub player_id: Uuid,
    pub session_id: Uuid,
}

/// A session plus the bookkeeping the registry needs for pairing order.
#[derive(Debug)]
struct HostedSession {
    created_at: Instant,
    session: Session,
}

/// Process-wide store mapping session identifiers to live sessions.
///
/// Per-session mutation goes through the map's exclusive entry guards;
/// `create_or_join` additionally holds a registry-wide mutex for the whole
/// pairing scan so two lone players can never claim the same waiting seat.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<Uuid, HostedSession>,
    users: UserRegistry,
    pairing: Mutex<()>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a player and seat them: into the oldest waiting session if
    /// one exists, otherwise into a fresh session that waits for an opponent.
    pub fn create_or_join(&self, player_name: &str) -> SessionTicket {
        let user = self.users.create(player_name);
        let player = Player::new(user.id.to_string(), user.name.clone());

        let _pairing = self.pairing.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(session_id) = self.oldest_waiting() {
            if let Some(mut entry) = self.sessions.get_mut(&session_id) {
                if entry.session.join(player.clone()).is_ok() {
                    info!(session = %session_id, player = %user.id, "paired into waiting session");
                    return SessionTicket {
                        player_id: user.id,
                        session_id,
                    };
                }
            }
        }

        let session_id = Uuid::new_v4();
        self.sessions.insert(
            session_id,
            HostedSession {
                created_at: Instant::now(),
                session: Session::new(player),
            },
        );
        info!(session = %session_id, player = %user.id, "session created, waiting for opponent");

        SessionTicket {
            player_id: user.id,
            session_id,
        }
    }

    /// The oldest session still waiting for a second player, if any.
    /// Callers must hold the pairing lock.
    fn oldest_waiting(&self) -> Option<Uuid> {
        self.sessions
            .iter()
            .filter(|entry| entry.session.is_waiting())
            .min_by_key(|entry| entry.created_at)
            .map(|entry| *entry.key())
    }

    /// Snapshot a session by identifier
    pub fn get(&self, session_id: Uuid) -> Result<Session, RegistryError> {
        self.sessions
            .get(&session_id)
            .map(|entry| entry.session.clone())
            .ok_or(RegistryError::SessionNotFound)
    }

    /// The session's board in wire shape (row-major cell integers)
    pub fn board(&self, session_id: Uuid) -> Result<Vec<Vec<u8>>, RegistryError> {
        self.sessions
            .get(&session_id)
            .map(|entry| entry.session.board().to_grid())
            .ok_or(RegistryError::SessionNotFound)
    }

    /// Legal destinations for a color, row-major
    pub fn candidates(
        &self,
        session_id: Uuid,
        color: Color,
    ) -> Result<Vec<(usize, usize)>, RegistryError> {
        self.sessions
            .get(&session_id)
            .map(|entry| entry.session.candidates(color))
            .ok_or(RegistryError::SessionNotFound)
    }

    /// Apply a move to a session and advance its state machine
    pub fn apply_move(
        &self,
        session_id: Uuid,
        color: Color,
        row: usize,
        col: usize,
    ) -> Result<MoveOutcome, RegistryError> {
        let mut entry = self
            .sessions
            .get_mut(&session_id)
            .ok_or(RegistryError::SessionNotFound)?;

        let outcome = entry.session.play(color, row, col)?;
        debug!(
            session = %session_id,
            ?color,
            row,
            col,
            captured = outcome.captured.len(),
            "move applied"
        );
        Ok(outcome)
    }

    /// Remove a session. Subsequent lookups, and a second removal, report
    /// `SessionNotFound`.
    pub fn remove(&self, session_id: Uuid) -> Result<(), RegistryError> {
        match self.sessions.remove(&session_id) {
            Some(_) => {
                info!(session = %session_id, "session removed");
                Ok(())
            }
            None => Err(RegistryError::SessionNotFound),
        }
    }

    /// Look up a registered user
    pub fn user(&self, user_id: Uuid) -> Result<User, RegistryError> {
        self.users.get(user_id).ok_or(RegistryError::UserNotFound)
    }

    /// Number of live sessions
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reversi_core::{MoveError, SessionPhase};
    use std::sync::Arc;

    #[test]
    fn test_two_joins_pair_into_one_session() {
        let registry = SessionRegistry::new();

        let first = registry.create_or_join("test");
        let second = registry.create_or_join("test2");

        assert_eq!(first.session_id, second.session_id);
        assert_ne!(first.player_id, second.player_id);
        assert_eq!(registry.session_count(), 1);

        let session = registry.get(first.session_id).unwrap();
        assert_eq!(session.phase(), SessionPhase::Turn(Color::White));
        assert_eq!(session.players().len(), 2);
        assert_eq!(
            session.player_color(&first.player_id.to_string()),
            Some(Color::White)
        );
        assert_eq!(
            session.player_color(&second.player_id.to_string()),
            Some(Color::Black)
        );
    }

    #[test]
    fn test_third_join_opens_a_new_waiting_session() {
        let registry = SessionRegistry::new();

        let first = registry.create_or_join("a");
        let _ = registry.create_or_join("b");
        let third = registry.create_or_join("c");

        assert_ne!(first.session_id, third.session_id);
        assert_eq!(registry.session_count(), 2);
        assert!(registry.get(third.session_id).unwrap().is_waiting());
    }

    #[test]
    fn test_pairing_prefers_the_oldest_waiting_session() {
        let registry = SessionRegistry::new();

        let older = registry.create_or_join("a");
        // Fill the older session so a second waiting one can exist
        let _ = registry.create_or_join("b");
        let newer = registry.create_or_join("c");
        let stale = registry.create_or_join("d");

        // "c" was alone; "d" must land next to "c", not open a third session
        assert_eq!(stale.session_id, newer.session_id);
        assert_ne!(stale.session_id, older.session_id);
    }

    #[test]
    fn test_moves_route_through_the_registry() {
        let registry = SessionRegistry::new();
        let ticket = registry.create_or_join("test");
        let _ = registry.create_or_join("test2");

        let outcome = registry
            .apply_move(ticket.session_id, Color::White, 2, 4)
            .unwrap();
        assert_eq!(outcome.captured, vec![(3, 4)]);
        assert_eq!(outcome.phase, SessionPhase::Turn(Color::Black));

        assert_eq!(
            registry.apply_move(ticket.session_id, Color::White, 2, 4),
            Err(RegistryError::Session(SessionError::NotYourTurn))
        );
        assert_eq!(
            registry.apply_move(ticket.session_id, Color::Black, 3, 3),
            Err(RegistryError::Session(SessionError::Move(
                MoveError::Occupied { row: 3, col: 3 }
            )))
        );
        assert_eq!(
            registry.apply_move(Uuid::new_v4(), Color::Black, 2, 3),
            Err(RegistryError::SessionNotFound)
        );
    }

    #[test]
    fn test_board_and_candidates_lookups() {
        let registry = SessionRegistry::new();
        let ticket = registry.create_or_join("test");

        let board = registry.board(ticket.session_id).unwrap();
        assert_eq!(board[3], vec![0, 0, 0, 1, 2, 0, 0, 0]);
        assert_eq!(board[4], vec![0, 0, 0, 2, 1, 0, 0, 0]);

        assert_eq!(
            registry.candidates(ticket.session_id, Color::White).unwrap(),
            vec![(2, 4), (3, 5), (4, 2), (5, 3)]
        );
        assert_eq!(
            registry.board(Uuid::new_v4()),
            Err(RegistryError::SessionNotFound)
        );
    }

    #[test]
    fn test_removal_is_idempotent() {
        let registry = SessionRegistry::new();
        let ticket = registry.create_or_join("test");

        assert!(registry.remove(ticket.session_id).is_ok());
        assert_eq!(
            registry.get(ticket.session_id),
            Err(RegistryError::SessionNotFound)
        );
        assert_eq!(
            registry.remove(ticket.session_id),
            Err(RegistryError::SessionNotFound)
        );
    }

    #[test]
    fn test_users_survive_session_removal() {
        let registry = SessionRegistry::new();
        let ticket = registry.create_or_join("test");

        registry.remove(ticket.session_id).unwrap();
        assert_eq!(
            registry.user(ticket.player_id).map(|u| u.name),
            Ok("test".to_string())
        );
        assert_eq!(
            registry.user(Uuid::new_v4()),
            Err(RegistryError::UserNotFound)
        );
    }

    #[test]
    fn test_concurrent_joins_never_overfill_a_session() {
        let registry = Arc::new(SessionRegistry::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.create_or_join(&format!("p{i}")))
            })
            .collect();

        let tickets: Vec<SessionTicket> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        // 16 lone players pair into exactly 8 two-seat sessions
        assert_eq!(registry.session_count(), 8);
        for ticket in tickets {
            let session = registry.get(ticket.session_id).unwrap();
            assert_eq!(session.players().len(), 2);
            assert!(!session.is_waiting());
        }
    }
}
