//! Seated players.

use serde::{Deserialize, Serialize};

/// A player seated in a session: an opaque identifier plus a display name,
/// created once and immutable thereafter. The identity registry that mints
/// identifiers lives outside the engine; the engine only stores them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
}

impl Player {
    /// Create a new player
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
