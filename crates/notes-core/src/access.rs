//! Ownership and role evaluation for resource operations.
//!
//! Every note read/update/delete goes through the same predicate: the
//! requester must own the resource or be an admin. Emails compare exactly
//! (case-sensitive) against the stored owner email.

use crate::types::Role;

/// Returns true iff the requester may operate on a resource owned by
/// `owner_email`.
///
/// Admins may access everything; everyone else only their own resources.
/// Pure function, applied identically for read, update and delete.
#[must_use]
pub fn can_access(owner_email: &str, requester_email: &str, requester_role: Role) -> bool {
    requester_role.is_admin() || owner_email == requester_email
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_can_access_regardless_of_role() {
        assert!(can_access("a@x.com", "a@x.com", Role::User));
        assert!(can_access("a@x.com", "a@x.com", Role::Admin));
    }

    #[test]
    fn admin_can_access_any_resource() {
        assert!(can_access("a@x.com", "b@x.com", Role::Admin));
    }

    #[test]
    fn other_user_is_denied() {
        assert!(!can_access("a@x.com", "b@x.com", Role::User));
    }

    #[test]
    fn email_match_is_case_sensitive() {
        assert!(!can_access("a@x.com", "A@x.com", Role::User));
    }
}
