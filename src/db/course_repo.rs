use sqlx::SqliteConnection;

use crate::models::{Course, CourseRequest};

pub async fn fetch_courses(conn: &mut SqliteConnection) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, title, description, duration_hours, exercise_count, active FROM courses ORDER BY id"
    )
    .fetch_all(conn)
    .await
}

pub async fn find_course_by_id(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, title, description, duration_hours, exercise_count, active FROM courses WHERE id = ?"
    )
    .bind(id)
    .fetch_optional(conn)
    .await
}

pub async fn course_exists(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM courses WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(found.is_some())
}

pub async fn insert_course(
    conn: &mut SqliteConnection,
    req: CourseRequest,
) -> Result<Course, sqlx::Error> {
    let id = sqlx::query(
        r#"
        INSERT INTO courses
            (title, description, duration_hours, exercise_count, active)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&req.title)
    .bind(&req.description)
    .bind(req.duration_hours)
    .bind(req.exercise_count)
    .bind(req.active)
    .execute(conn)
    .await?
    .last_insert_rowid();

    Ok(req.into_course(id))
}

/// Replaces every mutable column of the course at `id`. The caller has
/// already confirmed the row exists.
pub async fn update_course(
    conn: &mut SqliteConnection,
    id: i64,
    req: CourseRequest,
) -> Result<Course, sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE courses
        SET title = ?1,
            description = ?2,
            duration_hours = ?3,
            exercise_count = ?4,
            active = ?5
        WHERE id = ?6
        "#,
    )
    .bind(&req.title)
    .bind(&req.description)
    .bind(req.duration_hours)
    .bind(req.exercise_count)
    .bind(req.active)
    .bind(id)
    .execute(conn)
    .await?;

    Ok(req.into_course(id))
}

pub async fn delete_course(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM courses WHERE id = ?1")
        .bind(id)
        .execute(conn)
        .await?
        .rows_affected();

    Ok(result > 0)
}
