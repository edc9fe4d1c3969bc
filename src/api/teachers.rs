//! Teacher API endpoints
//!
//! - GET /api/teachers - List teachers
//! - POST /api/teachers - Create a teacher
//! - GET /api/teachers/{id} - Get a teacher
//! - PUT /api/teachers/{id} - Replace a teacher
//! - DELETE /api/teachers/{id} - Delete a teacher

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::MessageResponse;
use crate::models::{Teacher, TeacherInput};

/// Build the teachers router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/teachers", get(list_teachers).post(create_teacher))
        .route(
            "/api/teachers/{id}",
            get(get_teacher).put(update_teacher).delete(delete_teacher),
        )
}

async fn list_teachers(State(state): State<AppState>) -> Result<Json<Vec<Teacher>>, ApiError> {
    Ok(Json(state.teacher_service.list().await?))
}

async fn get_teacher(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Teacher>, ApiError> {
    Ok(Json(state.teacher_service.get(id).await?))
}

async fn create_teacher(
    State(state): State<AppState>,
    Json(body): Json<TeacherInput>,
) -> Result<Json<Teacher>, ApiError> {
    Ok(Json(state.teacher_service.create(body).await?))
}

async fn update_teacher(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<TeacherInput>,
) -> Result<Json<Teacher>, ApiError> {
    Ok(Json(state.teacher_service.update(id, body).await?))
}

async fn delete_teacher(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.teacher_service.delete(id).await?;
    Ok(Json(MessageResponse::new(state.teacher_service.kind().deleted_message())))
}
