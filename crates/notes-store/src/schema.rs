//! Schema definitions and migration utilities.
//!
//! The schema is embedded in the binary and applied at connect time.
//! Migrations are idempotent: every statement checks for existing objects
//! before creating them, so running them on every startup is safe.

use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};

/// Embedded migration SQL for the core schema (001_schema.sql).
pub const SCHEMA_MIGRATION: &str = include_str!("../../../migrations/001_schema.sql");

/// Run all pending migrations against the database.
pub async fn run_migrations(pool: &PgPool) -> StoreResult<()> {
    tracing::info!("Running database migrations...");

    sqlx::raw_sql(SCHEMA_MIGRATION)
        .execute(pool)
        .await
        .map_err(|e| StoreError::Migration(format!("schema migration failed: {e}")))?;

    tracing::info!("Migrations completed successfully");
    Ok(())
}
