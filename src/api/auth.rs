//! Authentication API endpoints
//!
//! Handles HTTP requests for account authentication:
//! - POST /api/login - Exchange credentials for a session token
//! - POST /api/register - Create an account
//! - GET /api/me - Claims of the presented token

use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{ApiError, AppState, AuthenticatedUser};
use crate::models::{UserAccount, UserRole};
use crate::services::{LoginInput, RegisterInput};

/// Request body for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    /// "admin", "teacher" or "parent"
    pub role: String,
    #[serde(default)]
    pub related_id: Option<i64>,
}

/// Response for successful login
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub role: UserRole,
    pub username: String,
}

/// Response for successful registration
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserAccount,
}

/// Response for the current caller
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: i64,
    pub username: String,
    pub role: UserRole,
    pub related_id: Option<i64>,
    /// Token expiry (unix seconds)
    pub expires_at: i64,
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state
        .auth_service
        .login(LoginInput::new(body.username, body.password))
        .await?;

    Ok(Json(TokenResponse {
        access_token: session.token,
        token_type: "bearer",
        role: session.account.role,
        username: session.account.username,
    }))
}

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let role: UserRole = body
        .role
        .parse()
        .map_err(|e: anyhow::Error| ApiError::validation_error(e.to_string()))?;

    let user = state
        .auth_service
        .register(RegisterInput::new(body.username, body.password, role, body.related_id))
        .await?;

    Ok(Json(RegisterResponse {
        message: format!("{} muvaffaqiyatli ro'yxatdan o'tdi", user.username),
        user,
    }))
}

/// GET /api/me
///
/// 401 when the token's account no longer exists, e.g. after a restart
/// with the same signing key.
pub async fn me(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> Result<Json<MeResponse>, ApiError> {
    let account = state
        .auth_service
        .get_account(claims.id)
        .await?
        .filter(|account| account.username == claims.sub)
        .ok_or_else(|| ApiError::unauthorized("Account no longer exists"))?;

    Ok(Json(MeResponse {
        id: account.id,
        username: account.username,
        role: account.role,
        related_id: account.related_id,
        expires_at: claims.exp,
    }))
}
