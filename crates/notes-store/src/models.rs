//! Database models for the storage layer.
//!
//! These types map directly to database rows and are used for sqlx
//! queries. Roles are stored as the canonical upper-case strings from
//! `notes_core::Role`; rows expose a typed accessor for them.

use chrono::{DateTime, Utc};
use notes_core::Role;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    /// Argon2 hash; `None` for federated accounts that never set a password.
    pub password_hash: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    /// Parse the stored role string, defaulting to `USER` for any value
    /// written outside this application.
    pub fn role(&self) -> Role {
        self.role.parse().unwrap_or_default()
    }
}

/// Insert payload for a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: Option<String>,
    pub role: Role,
}

/// Database row for the `notes` table.
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub owner_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Optimistic concurrency counter, starts at 0.
    pub version: i64,
}

/// Insert payload for a new note.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub owner_email: String,
}

/// Database row for the `tags` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct TagRow {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
