use std::collections::HashMap;

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::db::{course_repo, student_repo};
use crate::error::AppError;
use crate::models::{Course, StudentRequest, StudentResponse};
use crate::services::guards;

/// Student operations. Writes check the referenced course inside the same
/// transaction as the write; reads resolve the embedded course on demand.
#[derive(Clone)]
pub struct StudentService {
    db: SqlitePool,
}

impl StudentService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create(&self, req: StudentRequest) -> Result<StudentResponse, AppError> {
        req.validate()?;
        let course_id = req.course_id;

        let mut tx = self.db.begin().await?;
        guards::ensure_course_exists(&mut tx, course_id).await?;
        let student = student_repo::insert_student(&mut tx, req)
            .await
            .map_err(|e| guards::map_foreign_key_violation(e, AppError::CourseNotFound(course_id)))?;
        let course = guards::resolve_course_of(&mut tx, &student).await?;
        tx.commit().await?;

        info!("created student {} in course {}", student.id, course.id);
        Ok(StudentResponse::new(student, course))
    }

    pub async fn list(&self) -> Result<Vec<StudentResponse>, AppError> {
        let mut tx = self.db.begin().await?;
        let students = student_repo::fetch_students(&mut tx).await?;
        let courses: HashMap<i64, Course> = course_repo::fetch_courses(&mut tx)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        tx.commit().await?;

        let mut responses = Vec::with_capacity(students.len());
        for student in students {
            let course = match courses.get(&student.course_id) {
                Some(course) => course.clone(),
                None => {
                    return Err(AppError::InconsistentState(format!(
                        "student {} references missing course {}",
                        student.id, student.course_id
                    )));
                }
            };
            responses.push(StudentResponse::new(student, course));
        }

        debug!("listed {} students", responses.len());
        Ok(responses)
    }

    pub async fn get(&self, id: i64) -> Result<StudentResponse, AppError> {
        let mut tx = self.db.begin().await?;
        let student = student_repo::find_student_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Student".to_string()))?;
        let course = guards::resolve_course_of(&mut tx, &student).await?;
        tx.commit().await?;

        Ok(StudentResponse::new(student, course))
    }

    /// Replaces every field but the id. When the course changes, the new
    /// course is checked and embedded in the returned record.
    pub async fn update(&self, id: i64, req: StudentRequest) -> Result<StudentResponse, AppError> {
        req.validate()?;
        let course_id = req.course_id;

        let mut tx = self.db.begin().await?;
        let previous = student_repo::find_student_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Student".to_string()))?;
        guards::ensure_course_exists(&mut tx, course_id).await?;

        let student = student_repo::update_student(&mut tx, id, req)
            .await
            .map_err(|e| guards::map_foreign_key_violation(e, AppError::CourseNotFound(course_id)))?;
        let course = guards::resolve_course_of(&mut tx, &student).await?;
        tx.commit().await?;

        if previous.course_id != student.course_id {
            info!(
                "moved student {} from course {} to course {}",
                id, previous.course_id, student.course_id
            );
        } else {
            info!("updated student {}", id);
        }
        Ok(StudentResponse::new(student, course))
    }

    /// Deletes a student unless their current course is active.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut tx = self.db.begin().await?;
        let student = student_repo::find_student_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Student".to_string()))?;
        let course = guards::resolve_course_of(&mut tx, &student).await?;
        guards::ensure_course_inactive(&student, &course)?;

        if !student_repo::delete_student(&mut tx, id).await? {
            return Err(AppError::NotFound("Student".to_string()));
        }
        tx.commit().await?;

        info!("deleted student {}", id);
        Ok(())
    }

    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let mut conn = self.db.acquire().await?;
        Ok(student_repo::student_exists(&mut conn, id).await?)
    }
}
