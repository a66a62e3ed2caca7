use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

pub const TITLE_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub duration_hours: i64,
    pub exercise_count: i64,
    pub active: bool,
}

/// Body of `POST /api/courses` and `PUT /api/courses/{id}`.
///
/// Updates replace every field, so the same shape serves both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRequest {
    pub title: String,
    pub description: String,
    pub duration_hours: i64,
    pub exercise_count: i64,
    pub active: bool,
}

impl CourseRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::BadRequest("title must not be empty".to_string()));
        }
        if self.title.chars().count() > TITLE_MAX_LEN {
            return Err(AppError::BadRequest(format!(
                "title must be at most {} characters",
                TITLE_MAX_LEN
            )));
        }
        if self.description.chars().count() > DESCRIPTION_MAX_LEN {
            return Err(AppError::BadRequest(format!(
                "description must be at most {} characters",
                DESCRIPTION_MAX_LEN
            )));
        }
        if self.duration_hours < 0 {
            return Err(AppError::BadRequest(
                "duration_hours must not be negative".to_string(),
            ));
        }
        if self.exercise_count < 0 {
            return Err(AppError::BadRequest(
                "exercise_count must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    pub fn into_course(self, id: i64) -> Course {
        Course {
            id,
            title: self.title,
            description: self.description,
            duration_hours: self.duration_hours,
            exercise_count: self.exercise_count,
            active: self.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn algebra() -> CourseRequest {
        CourseRequest {
            title: "Algebra".to_string(),
            description: "Basics".to_string(),
            duration_hours: 40,
            exercise_count: 10,
            active: true,
        }
    }

    #[test]
    fn accepts_well_formed_course() {
        assert!(algebra().validate().is_ok());
    }

    #[test]
    fn rejects_blank_title() {
        let req = CourseRequest {
            title: "   ".to_string(),
            ..algebra()
        };
        assert!(matches!(req.validate(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn rejects_negative_counts() {
        let req = CourseRequest {
            duration_hours: -1,
            ..algebra()
        };
        assert!(matches!(req.validate(), Err(AppError::BadRequest(_))));

        let req = CourseRequest {
            exercise_count: -5,
            ..algebra()
        };
        assert!(matches!(req.validate(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn rejects_oversized_description() {
        let req = CourseRequest {
            description: "x".repeat(DESCRIPTION_MAX_LEN + 1),
            ..algebra()
        };
        assert!(matches!(req.validate(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn title_limit_is_inclusive() {
        let req = CourseRequest {
            title: "a".repeat(TITLE_MAX_LEN),
            ..algebra()
        };
        assert!(req.validate().is_ok());

        let req = CourseRequest {
            title: "a".repeat(TITLE_MAX_LEN + 1),
            ..algebra()
        };
        assert!(matches!(req.validate(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn description_at_limit_is_accepted() {
        let req = CourseRequest {
            description: "x".repeat(DESCRIPTION_MAX_LEN),
            ..algebra()
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn zero_counts_are_accepted() {
        let req = CourseRequest {
            duration_hours: 0,
            exercise_count: 0,
            ..algebra()
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn into_course_keeps_fields() {
        let course = algebra().into_course(7);
        assert_eq!(course.id, 7);
        assert_eq!(course.title, "Algebra");
        assert!(course.active);
    }
}
