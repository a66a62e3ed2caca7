use sqlx::SqliteConnection;

use crate::models::{Student, StudentRequest};

pub async fn fetch_students(conn: &mut SqliteConnection) -> Result<Vec<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(
        "SELECT id, first_name, last_name, email, age, national_id, course_id FROM students ORDER BY id"
    )
    .fetch_all(conn)
    .await
}

pub async fn find_student_by_id(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(
        "SELECT id, first_name, last_name, email, age, national_id, course_id FROM students WHERE id = ?"
    )
    .bind(id)
    .fetch_optional(conn)
    .await
}

pub async fn student_exists(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM students WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(found.is_some())
}

/// Number of students referencing `course_id`.
pub async fn count_students_in_course(
    conn: &mut SqliteConnection,
    course_id: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM students WHERE course_id = ?")
        .bind(course_id)
        .fetch_one(conn)
        .await
}

pub async fn insert_student(
    conn: &mut SqliteConnection,
    req: StudentRequest,
) -> Result<Student, sqlx::Error> {
    let id = sqlx::query(
        r#"
        INSERT INTO students
            (first_name, last_name, email, age, national_id, course_id)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&req.first_name)
    .bind(&req.last_name)
    .bind(&req.email)
    .bind(req.age)
    .bind(&req.national_id)
    .bind(req.course_id)
    .execute(conn)
    .await?
    .last_insert_rowid();

    Ok(req.into_student(id))
}

pub async fn update_student(
    conn: &mut SqliteConnection,
    id: i64,
    req: StudentRequest,
) -> Result<Student, sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE students
        SET first_name = ?1,
            last_name = ?2,
            email = ?3,
            age = ?4,
            national_id = ?5,
            course_id = ?6
        WHERE id = ?7
        "#,
    )
    .bind(&req.first_name)
    .bind(&req.last_name)
    .bind(&req.email)
    .bind(req.age)
    .bind(&req.national_id)
    .bind(req.course_id)
    .bind(id)
    .execute(conn)
    .await?;

    Ok(req.into_student(id))
}

pub async fn delete_student(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM students WHERE id = ?1")
        .bind(id)
        .execute(conn)
        .await?
        .rows_affected();

    Ok(result > 0)
}
