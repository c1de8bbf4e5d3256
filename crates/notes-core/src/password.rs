//! Password-strength policy enforced at registration.
//!
//! A password must be at least [`MIN_LENGTH`] characters and contain an
//! upper-case letter, a lower-case letter, a digit, and one of the special
//! characters in [`SPECIAL_CHARS`]. `validate` reports every violated rule
//! so the client can show them all at once.

/// Minimum password length.
pub const MIN_LENGTH: usize = 8;

/// Accepted special characters.
pub const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Validate a password against the policy.
///
/// Returns an empty list when the password is acceptable, otherwise one
/// message per violated rule.
#[must_use]
pub fn validate(password: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if password.chars().count() < MIN_LENGTH {
        errors.push(format!("must be at least {MIN_LENGTH} characters long"));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("must contain at least one upper-case letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("must contain at least one lower-case letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("must contain at least one digit".to_string());
    }
    if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        errors.push(format!(
            "must contain at least one special character ({SPECIAL_CHARS})"
        ));
    }

    errors
}

/// Whether a password satisfies the policy.
#[must_use]
pub fn is_valid(password: &str) -> bool {
    validate(password).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_strong_password() {
        assert!(is_valid("Abcdef1!"));
        assert!(validate("Str0ng,pass").is_empty());
    }

    #[test]
    fn rejects_short_password() {
        let errors = validate("Ab1!");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("at least 8"));
    }

    #[test]
    fn reports_each_missing_class() {
        // lower-case only: short is fine at 8 chars, missing upper/digit/special
        let errors = validate("abcdefgh");
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn empty_password_violates_everything() {
        assert_eq!(validate("").len(), 5);
    }

    #[test]
    fn special_char_set_is_exact() {
        // underscore is not in the accepted set
        assert!(!is_valid("Abcdefg1_"));
        assert!(is_valid("Abcdefg1?"));
    }
}
