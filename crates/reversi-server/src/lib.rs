//! reversi-server - session and user lifecycle for a Reversi service.
//!
//! This crate sits between the pure rules engine ([`reversi_core`]) and a
//! transport layer. It owns the process-wide session registry (pairing lone
//! players, routing moves, removal) and the user identity store. Everything
//! here is safe to call from concurrent request handlers.

pub mod registry;
pub mod users;

pub use registry::{RegistryError, SessionRegistry, SessionTicket};
pub use users::{User, UserRegistry};
