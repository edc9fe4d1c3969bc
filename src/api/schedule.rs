//! Class schedule API endpoints
//!
//! - GET /api/schedule?sinf=N&teacher_id=M - List lessons, filters combine
//! - POST /api/schedule - Create a lesson
//! - GET /api/schedule/{id} - Get a lesson
//! - PUT /api/schedule/{id} - Replace a lesson
//! - DELETE /api/schedule/{id} - Delete a lesson

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::MessageResponse;
use crate::models::{Schedule, ScheduleFilter, ScheduleInput};

/// Build the schedule router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/schedule", get(list_lessons).post(create_lesson))
        .route(
            "/api/schedule/{id}",
            get(get_lesson).put(update_lesson).delete(delete_lesson),
        )
}

async fn list_lessons(
    State(state): State<AppState>,
    Query(filter): Query<ScheduleFilter>,
) -> Result<Json<Vec<Schedule>>, ApiError> {
    let lessons = state
        .schedule_service
        .list_where(move |lesson| filter.matches(lesson))
        .await?;
    Ok(Json(lessons))
}

async fn get_lesson(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Schedule>, ApiError> {
    Ok(Json(state.schedule_service.get(id).await?))
}

async fn create_lesson(
    State(state): State<AppState>,
    Json(body): Json<ScheduleInput>,
) -> Result<Json<Schedule>, ApiError> {
    Ok(Json(state.schedule_service.create(body).await?))
}

async fn update_lesson(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<ScheduleInput>,
) -> Result<Json<Schedule>, ApiError> {
    Ok(Json(state.schedule_service.update(id, body).await?))
}

async fn delete_lesson(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.schedule_service.delete(id).await?;
    Ok(Json(MessageResponse::new(state.schedule_service.kind().deleted_message())))
}
