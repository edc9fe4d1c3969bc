//! Statistics API
//!
//! - GET /api/stats - Head counts and students per grade

use axum::{extract::State, Json};

use crate::api::middleware::{ApiError, AppState};
use crate::models::SchoolStats;

/// GET /api/stats
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<SchoolStats>, ApiError> {
    Ok(Json(state.stats_service.snapshot().await?))
}
