use sqlx::SqlitePool;

use crate::services::{CourseService, StudentService};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub courses: CourseService,
    pub students: StudentService,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self {
            courses: CourseService::new(db.clone()),
            students: StudentService::new(db.clone()),
            db,
        }
    }
}
