//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP API endpoints of the school backend.
//! It includes:
//! - Login, registration and current-account endpoints
//! - Teacher, student and class schedule CRUD endpoints
//! - School statistics
//! - Root banner and endpoint index

pub mod auth;
pub mod middleware;
pub mod responses;
pub mod schedule;
pub mod site;
pub mod stats;
pub mod students;
pub mod teachers;


use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use middleware::{ApiError, ApiSettings, AppState, AuthenticatedUser};

/// Build the API routes
pub fn build_api_router(state: AppState) -> Router<AppState> {
    // School records and registration (access policy from config)
    let guarded_routes = Router::new()
        .merge(teachers::router())
        .merge(students::router())
        .merge(schedule::router())
        .route("/api/stats", get(stats::get_stats))
        .route("/api/register", post(auth::register))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::enforce_access,
        ));

    // Always needs a token
    let protected_routes = Router::new()
        .route("/api/me", get(auth::me))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    // Public routes
    Router::new()
        .route("/", get(site::get_site_info))
        .route("/docs", get(site::get_docs))
        .route("/api/login", post(auth::login))
        .merge(guarded_routes)
        .merge(protected_routes)
}

/// CORS policy for the configured origin; `*` allows any origin, method and header
fn cors_layer(cors_origin: &str) -> anyhow::Result<CorsLayer> {
    if cors_origin.trim() == "*" {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origin = cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin '{}'", cors_origin))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> anyhow::Result<Router> {
    let cors = cors_layer(cors_origin)?;

    Ok(build_api_router(state.clone())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state))
}
