//! notes-server: HTTP API server for the Learning Notes API.
//!
//! This crate provides:
//! - REST endpoints for registration, login, federated login and note CRUD
//! - JWT issuance and verification ([`auth::TokenService`])
//! - Bearer-token authentication middleware with audit logging
//! - Structured JSON error responses (`{status, message, timestamp}`)
//!
//! # Architecture
//!
//! The server is built on Axum with a middleware stack applied in a fixed,
//! explicit order by `main`:
//! - Request tracing and logging
//! - CORS handling
//! - Request ID generation
//! - Bearer-token authentication
//!
//! Handlers that need identity extract [`auth::SecurityContext`]; routes
//! without it accept anonymous requests.

pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-exports for convenience
pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

// Re-export dependent crates
pub use notes_core;
pub use notes_store;
