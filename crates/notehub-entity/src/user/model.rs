//! User entity model.

use chrono::{DateTime, Utc};
use notehub_core::types::id::UserId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Maximum length of a username, in characters.
pub const MAX_USERNAME_LEN: usize = 30;

/// A registered NoteHub user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a fresh user record.
    pub fn from_new(new: NewUser) -> Self {
        Self {
            id: UserId::new(),
            username: new.username,
            password_hash: new.password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Desired username.
    pub username: String,
    /// Pre-hashed password.
    pub password_hash: String,
}
