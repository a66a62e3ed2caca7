#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use coursebook::api::router;
use coursebook::config::AppConfig;
use coursebook::db;
use coursebook::models::{CourseRequest, StudentRequest};
use coursebook::state::AppState;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Fresh in-memory database with the schema applied. A single connection
/// keeps every query on the same in-memory database.
pub async fn setup_pool() -> SqlitePool {
    let config = AppConfig {
        database_url: "sqlite::memory:".to_string(),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        max_connections: 1,
    };
    let pool = db::connect(&config)
        .await
        .expect("Failed to create database");
    db::migrate(&pool).await.expect("Failed to run migrations");
    pool
}

pub async fn setup_app() -> (Router, AppState) {
    let state = AppState::new(setup_pool().await);
    (router(state.clone()), state)
}

pub fn algebra(active: bool) -> CourseRequest {
    CourseRequest {
        title: "Algebra".to_string(),
        description: "Basics".to_string(),
        duration_hours: 40,
        exercise_count: 10,
        active,
    }
}

pub fn student_in(course_id: i64) -> StudentRequest {
    StudentRequest {
        first_name: "Ana".to_string(),
        last_name: "Souza".to_string(),
        email: "ana@example.com".to_string(),
        age: 21,
        national_id: "12345678901".to_string(),
        course_id,
    }
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(json) => builder.body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Router failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Body is not JSON")
    };
    (status, json)
}
