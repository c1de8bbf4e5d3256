//! Authentication routes: register, login, federated login, me.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use notes_core::{Role, password};
use notes_store::{NewUser, StoreError, UserRow};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{self, SecurityContext};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Provider-verified identity pair from a successful Google OAuth2 login.
/// The code/token exchange with Google happens upstream; this endpoint
/// only maps the identity to a local account.
#[derive(Debug, Deserialize)]
pub struct GoogleLoginRequest {
    /// Google subject identifier.
    pub sub: String,
    /// Verified email address.
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub token: String,
}

impl UserResponse {
    fn from_user(user: UserRow, token: String) -> Self {
        let role = user.role();
        Self {
            id: user.id,
            email: user.email,
            role,
            token,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

impl From<UserRow> for MeResponse {
    fn from(user: UserRow) -> Self {
        let role = user.role();
        Self {
            id: user.id,
            email: user.email,
            role,
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /auth/register
async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    if !request.email.contains('@') {
        return Err(ApiError::BadRequest("invalid email address".to_string()));
    }

    let violations = password::validate(&request.password);
    if !violations.is_empty() {
        return Err(ApiError::WeakPassword(violations.join("; ")));
    }

    let password_hash = auth::hash_password(&request.password)?;
    let user = state
        .store()
        .insert_user(&NewUser {
            email: request.email.clone(),
            password_hash: Some(password_hash),
            role: Role::User,
        })
        .await
        .map_err(|e| match e {
            StoreError::DuplicateEmail(_) => ApiError::DuplicateEmail,
            other => ApiError::from(other),
        })?;

    let token = state.tokens().issue(&user.email, user.role())?;

    tracing::info!(user_id = %user.id, email = %user.email, "User registered");

    Ok((StatusCode::CREATED, Json(UserResponse::from_user(user, token))))
}

/// POST /auth/login
///
/// Unknown email and wrong password fail identically so account existence
/// cannot be probed through error messages.
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .store()
        .get_user_by_email(&request.email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    // Federated-only accounts have no password hash and cannot log in
    // with a password.
    let hash = user
        .password_hash
        .as_deref()
        .ok_or(ApiError::InvalidCredentials)?;

    if !auth::verify_password(&request.password, hash)? {
        return Err(ApiError::InvalidCredentials);
    }

    // Role comes from the stored user, never from client input.
    let token = state.tokens().issue(&user.email, user.role())?;

    tracing::info!(user_id = %user.id, email = %user.email, "User logged in");

    Ok(Json(UserResponse::from_user(user, token)))
}

/// POST /auth/oauth/google
///
/// Maps a provider-verified identity to a local user, creating one
/// without a password hash if absent, then issues a token exactly as
/// `login` does.
async fn login_google(
    State(state): State<AppState>,
    Json(request): Json<GoogleLoginRequest>,
) -> ApiResult<Json<UserResponse>> {
    if request.email.is_empty() || request.sub.is_empty() {
        return Err(ApiError::BadRequest(
            "federated identity must carry sub and email".to_string(),
        ));
    }

    let user = match state.store().get_user_by_email(&request.email).await? {
        Some(user) => user,
        None => {
            let created = state
                .store()
                .insert_user(&NewUser {
                    email: request.email.clone(),
                    password_hash: None,
                    role: Role::User,
                })
                .await;
            match created {
                Ok(user) => user,
                // Concurrent first login with the same identity: the other
                // request created the account, use it.
                Err(StoreError::DuplicateEmail(_)) => state
                    .store()
                    .get_user_by_email(&request.email)
                    .await?
                    .ok_or_else(|| {
                        ApiError::Internal("user vanished after duplicate-email conflict".into())
                    })?,
                Err(e) => return Err(e.into()),
            }
        }
    };

    let token = state.tokens().issue(&user.email, user.role())?;

    tracing::info!(
        user_id = %user.id,
        email = %user.email,
        sub = %request.sub,
        "Federated login"
    );

    Ok(Json(UserResponse::from_user(user, token)))
}

/// GET /auth/me — current user info.
async fn me(State(state): State<AppState>, ctx: SecurityContext) -> ApiResult<Json<MeResponse>> {
    let user = state
        .store()
        .get_user_by_email(&ctx.email)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("user {}", ctx.email)))?;

    Ok(Json(MeResponse::from(user)))
}

/// Build auth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/oauth/google", post(login_google))
        .route("/auth/me", get(me))
}
