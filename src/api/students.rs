//! Student API endpoints
//!
//! - GET /api/students?sinf=N - List students, optionally of one grade
//! - POST /api/students - Create a student
//! - GET /api/students/{id} - Get a student
//! - PUT /api/students/{id} - Replace a student
//! - DELETE /api/students/{id} - Delete a student

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::MessageResponse;
use crate::models::{Student, StudentFilter, StudentInput};

/// Build the students router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/students", get(list_students).post(create_student))
        .route(
            "/api/students/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
}

async fn list_students(
    State(state): State<AppState>,
    Query(filter): Query<StudentFilter>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let students = state
        .student_service
        .list_where(move |student| filter.matches(student))
        .await?;
    Ok(Json(students))
}

async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Student>, ApiError> {
    Ok(Json(state.student_service.get(id).await?))
}

async fn create_student(
    State(state): State<AppState>,
    Json(body): Json<StudentInput>,
) -> Result<Json<Student>, ApiError> {
    Ok(Json(state.student_service.create(body).await?))
}

async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<StudentInput>,
) -> Result<Json<Student>, ApiError> {
    Ok(Json(state.student_service.update(id, body).await?))
}

async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.student_service.delete(id).await?;
    Ok(Json(MessageResponse::new(state.student_service.kind().deleted_message())))
}
