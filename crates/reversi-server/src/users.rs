//! User identity store.
//!
//! A trivial name-to-identifier registry. Identifiers are UUIDv4: opaque,
//! URL-safe, and collision-resistant.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
}

/// Process-wide user store. Display names are not unique; identifiers are.
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: DashMap<Uuid, User>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user under a fresh identifier
    pub fn create(&self, name: &str) -> User {
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };
        self.users.insert(user.id, user.clone());
        debug!(user = %user.id, name = %user.name, "user created");
        user
    }

    /// Look up a user by identifier
    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users.get(&id).map(|entry| entry.clone())
    }

    /// Remove a user, returning it if it existed
    pub fn remove(&self, id: Uuid) -> Option<User> {
        self.users.remove(&id).map(|(_, user)| user)
    }
}
