//! Authentication primitives: JWT token service, password hashing, and the
//! request-scoped security context.
//!
//! Signature verification and expiry checking are deliberately split into
//! two calls ([`TokenService::verify`] and [`TokenService::is_expired`]) so
//! the middleware can answer "token expired, log in again" distinctly from
//! "invalid token" — both are 401, but clients and audit logs see
//! different messages.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use notes_core::Role;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// JWT claims.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject — the user's email.
    pub sub: String,
    /// User role.
    pub role: Role,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiration time (unix timestamp).
    pub exp: i64,
}

/// Issues and verifies signed, time-bound identity tokens.
///
/// Keys are derived once from the process-wide signing secret and shared
/// through `AppState`; the secret is never embedded in a token.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl TokenService {
    /// Build a token service from the signing secret and lifetime.
    ///
    /// The lifetime is clamped to at least one second so an issued token
    /// can never carry `exp <= iat`.
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs: (ttl_secs.max(1)).min(i64::MAX as u64) as i64,
        }
    }

    /// Issue a token for `subject` with the given role.
    pub fn issue(&self, subject: &str, role: Role) -> Result<String, ApiError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            role,
            iat: now,
            exp: now + self.ttl_secs,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| ApiError::Internal(format!("failed to sign token: {e}")))
    }

    /// Verify a token's signature and structure, returning its claims.
    ///
    /// Expiry is NOT checked here — callers that care use
    /// [`Self::is_expired`]. Absent, empty, malformed and forged tokens
    /// all fail with `InvalidToken`.
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        if token.is_empty() {
            return Err(ApiError::InvalidToken("no token supplied".to_string()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|e| ApiError::InvalidToken(e.to_string()))?;

        Ok(data.claims)
    }

    /// Whether a token is past its expiry.
    ///
    /// Fails exactly like [`Self::verify`] on a malformed or forged token,
    /// so expiry can never be probed without a valid signature.
    pub fn is_expired(&self, token: &str) -> Result<bool, ApiError> {
        let claims = self.verify(token)?;
        Ok(claims.exp <= Utc::now().timestamp())
    }

    /// The subject (email) carried by a verified token.
    pub fn subject_of(&self, token: &str) -> Result<String, ApiError> {
        Ok(self.verify(token)?.sub)
    }

    /// The role carried by a verified token.
    pub fn role_of(&self, token: &str) -> Result<Role, ApiError> {
        Ok(self.verify(token)?.role)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        f.debug_struct("TokenService")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

/// Hash a password using Argon2.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(format!("failed to hash password: {e}")))?;
    Ok(password_hash.to_string())
}

/// Verify a password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ApiError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| ApiError::Internal(format!("invalid password hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Per-request identity derived from a verified, unexpired token.
///
/// Inserted into request extensions by the authentication middleware and
/// discarded with the request. Handlers that require identity extract it;
/// absence means the request never carried a valid bearer token.
#[derive(Debug, Clone)]
pub struct SecurityContext {
    /// Authenticated user's email.
    pub email: String,
    /// Authenticated user's role.
    pub role: Role,
}

impl SecurityContext {
    /// Whether this identity may operate on a resource owned by
    /// `owner_email`.
    #[must_use]
    pub fn may_access(&self, owner_email: &str) -> bool {
        notes_core::can_access(owner_email, &self.email, self.role)
    }

    /// Explicit role guard for admin-only handlers.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(ApiError::PermissionDenied(
                "administrator role required".to_string(),
            ))
        }
    }
}

impl<S> FromRequestParts<S> for SecurityContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SecurityContext>()
            .cloned()
            .ok_or_else(|| ApiError::InvalidToken("authentication required".to_string()))
    }
}
