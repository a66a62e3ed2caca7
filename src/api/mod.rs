use axum::Json;
use axum::extract::Path;
use axum::extract::rejection::JsonRejection;
use axum::{Router, extract::State, http::StatusCode, routing::get};

use crate::error::AppError;
use crate::state::AppState;
use crate::models::*;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/courses", get(list_courses).post(create_course))
        .route(
            "/api/courses/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
        .route("/api/students", get(list_students).post(create_student))
        .route(
            "/api/students/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let courses = state.courses.list().await?;
    Ok(Json(courses))
}

async fn create_course(
    State(state): State<AppState>,
    payload: Result<Json<CourseRequest>, JsonRejection>
) -> Result<(StatusCode, Json<Course>), AppError> {
    let Json(req) = payload?;
    let course = state.courses.create(req).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i64>
) -> Result<Json<Course>, AppError> {
    let course = state.courses.get(id).await?;
    Ok(Json(course))
}

async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<CourseRequest>, JsonRejection>
) -> Result<Json<Course>, AppError> {
    let Json(req) = payload?;
    let course = state.courses.update(id, req).await?;
    Ok(Json(course))
}

async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<i64>
) -> Result<StatusCode, AppError> {
    state.courses.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_students(
    State(state): State<AppState>
) -> Result<Json<Vec<StudentResponse>>, AppError> {
    let students = state.students.list().await?;
    Ok(Json(students))
}

async fn create_student(
    State(state): State<AppState>,
    payload: Result<Json<StudentRequest>, JsonRejection>
) -> Result<(StatusCode, Json<StudentResponse>), AppError> {
    let Json(req) = payload?;
    let student = state.students.create(req).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<i64>
) -> Result<Json<StudentResponse>, AppError> {
    let student = state.students.get(id).await?;
    Ok(Json(student))
}

async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<StudentRequest>, JsonRejection>
) -> Result<Json<StudentResponse>, AppError> {
    let Json(req) = payload?;
    let student = state.students.update(id, req).await?;
    Ok(Json(student))
}

async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<i64>
) -> Result<StatusCode, AppError> {
    state.students.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
