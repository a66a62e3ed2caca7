use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::db::course_repo;
use crate::error::AppError;
use crate::models::{Course, CourseRequest};
use crate::services::guards;

/// Course operations. Writes run on their own transaction and commit only
/// when every check has passed.
#[derive(Clone)]
pub struct CourseService {
    db: SqlitePool,
}

impl CourseService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create(&self, req: CourseRequest) -> Result<Course, AppError> {
        req.validate()?;

        let mut tx = self.db.begin().await?;
        let course = course_repo::insert_course(&mut tx, req).await?;
        tx.commit().await?;

        info!("created course {} ({})", course.id, course.title);
        Ok(course)
    }

    pub async fn list(&self) -> Result<Vec<Course>, AppError> {
        let mut conn = self.db.acquire().await?;
        let courses = course_repo::fetch_courses(&mut conn).await?;
        debug!("listed {} courses", courses.len());
        Ok(courses)
    }

    pub async fn get(&self, id: i64) -> Result<Course, AppError> {
        let mut conn = self.db.acquire().await?;
        course_repo::find_course_by_id(&mut conn, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course".to_string()))
    }

    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let mut conn = self.db.acquire().await?;
        Ok(course_repo::course_exists(&mut conn, id).await?)
    }

    pub async fn update(&self, id: i64, req: CourseRequest) -> Result<Course, AppError> {
        req.validate()?;

        let mut tx = self.db.begin().await?;
        if !course_repo::course_exists(&mut tx, id).await? {
            return Err(AppError::NotFound("Course".to_string()));
        }
        let course = course_repo::update_course(&mut tx, id, req).await?;
        tx.commit().await?;

        info!("updated course {} (active: {})", course.id, course.active);
        Ok(course)
    }

    /// Deletes a course nobody is enrolled in. The enrolment count and the
    /// delete share one transaction, and the `students.course_id` foreign
    /// key catches an enrolment that slips in between.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut tx = self.db.begin().await?;
        if !course_repo::course_exists(&mut tx, id).await? {
            return Err(AppError::NotFound("Course".to_string()));
        }
        guards::ensure_no_enrolled_students(&mut tx, id).await?;

        let deleted = course_repo::delete_course(&mut tx, id)
            .await
            .map_err(|e| guards::map_foreign_key_violation(e, AppError::StudentsEnrolled(id)))?;
        if !deleted {
            return Err(AppError::NotFound("Course".to_string()));
        }
        tx.commit().await?;

        info!("deleted course {}", id);
        Ok(())
    }
}
