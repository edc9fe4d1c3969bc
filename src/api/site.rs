//! Public site information API
//!
//! The root endpoint identifies the service. No authentication required.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::middleware::AppState;
use crate::services::{DemoAccount, DEMO_ACCOUNTS};

/// Response for the root endpoint
#[derive(Debug, Serialize)]
pub struct SiteInfoResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub docs: &'static str,
    /// Only present when demo credentials are exposed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_accounts: Option<Vec<DemoAccount>>,
}

/// GET /
pub async fn get_site_info(State(state): State<AppState>) -> Json<SiteInfoResponse> {
    let demo_accounts = state
        .settings
        .expose_demo_credentials
        .then(|| DEMO_ACCOUNTS.to_vec());

    Json(SiteInfoResponse {
        message: "Mening Maktabim API",
        version: env!("CARGO_PKG_VERSION"),
        docs: "/docs",
        demo_accounts,
    })
}

/// One row of the endpoint index
#[derive(Debug, Serialize)]
pub struct EndpointDoc {
    pub method: &'static str,
    pub path: &'static str,
    pub access: &'static str,
}

const ENDPOINTS: &[(&str, &str, &str)] = &[
    ("GET", "/", "public"),
    ("GET", "/docs", "public"),
    ("POST", "/api/login", "public"),
    ("POST", "/api/register", "admin"),
    ("GET", "/api/me", "token"),
    ("GET", "/api/teachers", "token"),
    ("POST", "/api/teachers", "admin"),
    ("GET", "/api/teachers/{id}", "token"),
    ("PUT", "/api/teachers/{id}", "admin"),
    ("DELETE", "/api/teachers/{id}", "admin"),
    ("GET", "/api/students?sinf=N", "token"),
    ("POST", "/api/students", "admin"),
    ("GET", "/api/students/{id}", "token"),
    ("PUT", "/api/students/{id}", "admin"),
    ("DELETE", "/api/students/{id}", "admin"),
    ("GET", "/api/schedule?sinf=N&teacher_id=M", "token"),
    ("POST", "/api/schedule", "admin"),
    ("GET", "/api/schedule/{id}", "token"),
    ("PUT", "/api/schedule/{id}", "admin"),
    ("DELETE", "/api/schedule/{id}", "admin"),
    ("GET", "/api/stats", "token"),
];

/// GET /docs - Endpoint index
///
/// With enforcement off, everything except `/api/me` is public.
pub async fn get_docs(State(state): State<AppState>) -> Json<Vec<EndpointDoc>> {
    let enforce = state.settings.enforce_auth;
    let docs = ENDPOINTS
        .iter()
        .map(|&(method, path, access)| EndpointDoc {
            method,
            path,
            access: if enforce || path == "/api/me" { access } else { "public" },
        })
        .collect();
    Json(docs)
}
