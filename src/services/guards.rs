//! Cross-entity checks shared by the course and student services.
//!
//! Every function here runs on the caller's open transaction, so a check and
//! the write it protects see the same snapshot.

use sqlx::SqliteConnection;
use tracing::warn;

use crate::db::{self, course_repo, student_repo};
use crate::error::AppError;
use crate::models::{Course, Student};

/// A student may only be written against a course that exists.
pub async fn ensure_course_exists(
    conn: &mut SqliteConnection,
    course_id: i64,
) -> Result<(), AppError> {
    if course_repo::course_exists(conn, course_id).await? {
        Ok(())
    } else {
        warn!("rejected student write: course {} does not exist", course_id);
        Err(AppError::CourseNotFound(course_id))
    }
}

/// A course may only be deleted once nobody is enrolled in it.
pub async fn ensure_no_enrolled_students(
    conn: &mut SqliteConnection,
    course_id: i64,
) -> Result<(), AppError> {
    let enrolled = student_repo::count_students_in_course(conn, course_id).await?;
    if enrolled > 0 {
        warn!(
            "rejected delete of course {}: {} student(s) enrolled",
            course_id, enrolled
        );
        return Err(AppError::StudentsEnrolled(course_id));
    }
    Ok(())
}

/// Resolves the course a stored student points at. A miss means the
/// reference was broken by an earlier write; it is logged once, when the
/// error is turned into a response.
pub async fn resolve_course_of(
    conn: &mut SqliteConnection,
    student: &Student,
) -> Result<Course, AppError> {
    match course_repo::find_course_by_id(conn, student.course_id).await? {
        Some(course) => Ok(course),
        None => {
            Err(AppError::InconsistentState(format!(
                "student {} references missing course {}",
                student.id, student.course_id
            )))
        }
    }
}

/// Only the student's current course is considered.
pub fn ensure_course_inactive(student: &Student, course: &Course) -> Result<(), AppError> {
    if course.active {
        warn!(
            "rejected delete of student {}: course {} is active",
            student.id, course.id
        );
        return Err(AppError::CourseActive(course.id));
    }
    Ok(())
}

/// Translates a foreign-key failure from SQLite into the business error the
/// service checks would have produced.
pub fn map_foreign_key_violation(err: sqlx::Error, rejection: AppError) -> AppError {
    if db::is_foreign_key_violation(&err) {
        warn!("foreign key rejected write: {}", err);
        rejection
    } else {
        AppError::Database(err)
    }
}
