//! API middleware
//!
//! Contains middleware for:
//! - Authentication (Bearer token validation)
//! - Authorization (read access for any account, writes for admins)
//!
//! Also defines the shared application state and the JSON error envelope.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::models::{Schedule, Student, Teacher, UserRole};
use crate::services::{
    AuthError, AuthService, Claims, RecordError, RecordService, StatsService, TokenError,
};

/// Request handling switches taken from the config
#[derive(Debug, Clone, Copy)]
pub struct ApiSettings {
    /// Require tokens on record routes and admin for writes
    pub enforce_auth: bool,
    /// List demo logins on the root endpoint
    pub expose_demo_credentials: bool,
}

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub teacher_service: Arc<RecordService<Teacher>>,
    pub student_service: Arc<RecordService<Student>>,
    pub schedule_service: Arc<RecordService<Schedule>>,
    pub stats_service: Arc<StatsService>,
    pub settings: ApiSettings,
}

/// Verified token claims of the caller
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

/// Error response for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
                details: Some(details),
            },
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new("FORBIDDEN", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn status(&self) -> StatusCode {
        match self.error.code.as_str() {
            "UNAUTHORIZED" => StatusCode::UNAUTHORIZED,
            "FORBIDDEN" => StatusCode::FORBIDDEN,
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "VALIDATION_ERROR" | "DUPLICATE_USERNAME" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => ApiError::unauthorized(e.to_string()),
            AuthError::DuplicateUsername(ref username) => ApiError::with_details(
                "DUPLICATE_USERNAME",
                "Bu username allaqachon mavjud",
                serde_json::json!({ "username": username }),
            ),
            AuthError::ValidationError(msg) => ApiError::validation_error(msg),
            AuthError::Token(TokenError::Signing(msg)) => {
                tracing::error!("Token signing failure: {}", msg);
                ApiError::internal_error("Internal server error")
            }
            AuthError::Token(e) => ApiError::unauthorized(e.to_string()),
            AuthError::InternalError(e) => {
                tracing::error!("Auth failure: {:#}", e);
                ApiError::internal_error("Internal server error")
            }
        }
    }
}

impl From<RecordError> for ApiError {
    fn from(e: RecordError) -> Self {
        match e {
            RecordError::NotFound(kind) => ApiError::not_found(kind.not_found_message()),
            RecordError::InternalError(e) => {
                tracing::error!("Record store failure: {:#}", e);
                ApiError::internal_error("Internal server error")
            }
        }
    }
}

/// Extract the bearer token from the Authorization header
fn extract_bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Verify the request's token and return its claims
fn authenticate(state: &AppState, request: &Request) -> Result<Claims, ApiError> {
    let token = extract_bearer_token(request)
        .ok_or_else(|| ApiError::unauthorized("Missing authentication token"))?;

    state.auth_service.authenticate(token).map_err(|e| {
        tracing::warn!("Rejected token on {} {}: {}", request.method(), request.uri().path(), e);
        ApiError::from(e)
    })
}

fn is_read_only(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// Authentication middleware. Always requires a valid token.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = authenticate(&state, &request)?;
    request.extensions_mut().insert(AuthenticatedUser(claims));
    Ok(next.run(request).await)
}

/// Access policy for the school record routes and registration
///
/// With enforcement off every request passes. Otherwise reads need any
/// valid token and writes need an admin token.
pub async fn enforce_access(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.settings.enforce_auth {
        return Ok(next.run(request).await);
    }

    let claims = authenticate(&state, &request)?;
    if !is_read_only(request.method()) && claims.role != UserRole::Admin {
        tracing::warn!(
            "'{}' ({}) denied {} {}",
            claims.sub,
            claims.role,
            request.method(),
            request.uri().path()
        );
        return Err(ApiError::forbidden("Admin privileges required"));
    }

    request.extensions_mut().insert(AuthenticatedUser(claims));
    Ok(next.run(request).await)
}
