//! Middleware for the HTTP API.
//!
//! Each cross-cutting concern is a single composable
//! `intercept(request, next)` function, applied by `main` in a fixed,
//! explicit order.

pub mod auth;
pub mod request_id;
