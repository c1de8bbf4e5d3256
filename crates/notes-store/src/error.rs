//! Error types for the storage layer.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection or query error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// User not found by id.
    #[error("user not found: {0}")]
    UserNotFound(Uuid),

    /// Note not found.
    #[error("note not found: {0}")]
    NoteNotFound(Uuid),

    /// An account with this email already exists.
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// Optimistic concurrency failure: the note was updated since the
    /// caller last read it.
    #[error("version conflict on note {note_id}: expected version {expected}")]
    VersionConflict { note_id: Uuid, expected: i64 },

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}
