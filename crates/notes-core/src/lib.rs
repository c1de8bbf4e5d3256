//! notes-core: domain types and pure logic for the Learning Notes API.
//!
//! This crate holds everything that needs no I/O:
//!
//! - [`Role`] — the two-role RBAC model (USER / ADMIN)
//! - [`access`] — the ownership/role predicate applied to every note operation
//! - [`password`] — the password-strength policy enforced at registration
//!
//! Keeping these pure makes the security-relevant decisions unit-testable
//! without a database or an HTTP stack.

pub mod access;
pub mod password;
pub mod types;

pub use access::can_access;
pub use types::{ParseRoleError, Role};
