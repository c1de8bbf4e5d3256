//! Server configuration from environment variables.

use std::env;

/// Development fallback signing secret. Good enough for local hacking,
/// loudly warned about at startup.
const DEV_JWT_SECRET: &str = "dev-secret-change-me-before-deploying";

/// Minimum recommended signing-secret length in bytes.
const MIN_SECRET_BYTES: usize = 32;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server port to listen on.
    pub port: u16,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// CORS allowed origins (comma-separated or "*" for all).
    pub cors_allowed_origins: String,
    /// JWT signing secret (HS256).
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub jwt_ttl_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `PORT`: Server port (default: 3000)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    /// - `CORS_ALLOWED_ORIGINS`: Allowed CORS origins (default: "*")
    /// - `JWT_SECRET`: Token signing secret (default: dev secret, warned)
    /// - `JWT_TTL_SECS`: Token lifetime in seconds (default: 86400)
    ///
    /// A missing or short `JWT_SECRET` is a startup warning, not a hard
    /// failure; a zero TTL is a configuration error because the token
    /// service must never issue a token that is already expired.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let cors_allowed_origins =
            env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string());

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => DEV_JWT_SECRET.to_string(),
        };

        let jwt_ttl_secs = match env::var("JWT_TTL_SECS") {
            Ok(s) => s.parse().map_err(|_| ConfigError::InvalidValue {
                name: "JWT_TTL_SECS".to_string(),
                reason: format!("not a number: {s}"),
            })?,
            Err(_) => 86_400,
        };
        if jwt_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                name: "JWT_TTL_SECS".to_string(),
                reason: "token lifetime must be at least one second".to_string(),
            });
        }

        Ok(Self {
            port,
            log_level,
            cors_allowed_origins,
            jwt_secret,
            jwt_ttl_secs,
        })
    }

    /// Get the socket address for the server.
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    /// Emit startup warnings for secrets that should not reach production.
    /// Called from `main` once tracing is initialized; a weak or default
    /// secret is a warning, not a hard failure.
    pub fn log_secret_warnings(&self) {
        if self.jwt_secret == DEV_JWT_SECRET {
            tracing::warn!("JWT_SECRET not set, using development default");
        } else if self.jwt_secret.len() < MIN_SECRET_BYTES {
            tracing::warn!(
                "JWT_SECRET is shorter than {} bytes; use a high-entropy secret in production",
                MIN_SECRET_BYTES
            );
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid environment variable value.
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}

#[cfg(test)]
pub(crate) fn test_config() -> ServerConfig {
    ServerConfig {
        port: 3000,
        log_level: "info".to_string(),
        cors_allowed_origins: "*".to_string(),
        jwt_secret: "test-secret-0123456789-0123456789".to_string(),
        jwt_ttl_secs: 3600,
    }
}
