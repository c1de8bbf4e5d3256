//! notes-store: PostgreSQL storage layer for the Learning Notes API.
//!
//! This crate provides:
//! - [`Store`] — pooled sqlx access to users, notes, tags and the
//!   note↔tag join table
//! - Optimistic concurrency for note updates (version-guarded UPDATE)
//! - Idempotent tag resolution with insert-or-recover under races
//! - Embedded, idempotent schema migrations run at connect time
//!
//! The store exposes typed errors ([`StoreError`]) so the HTTP layer can
//! map not-found, duplicate-email and version-conflict cases to distinct
//! status codes.

pub mod error;
pub mod models;
pub mod schema;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use models::{NewNote, NewUser, NoteRow, TagRow, UserRow};
pub use store::{NotePage, Store, StoreConfig, normalize_tag_names};
