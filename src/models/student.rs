use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;
use crate::models::Course;

pub const NAME_MAX_LEN: usize = 100;
pub const NATIONAL_ID_LEN: usize = 11;

/// Persisted student row. The course is referenced by id only and is
/// resolved on demand when a response is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: i64,
    pub national_id: String,
    pub course_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: i64,
    pub national_id: String,
    pub course_id: i64,
}

/// Student as returned to clients, with its course embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentResponse {
    #[serde(flatten)]
    pub student: Student,
    pub course: Course,
}

impl StudentRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::BadRequest(format!("{} must not be empty", field)));
            }
            if value.chars().count() > NAME_MAX_LEN {
                return Err(AppError::BadRequest(format!(
                    "{} must be at most {} characters",
                    field, NAME_MAX_LEN
                )));
            }
        }
        if !self.email.contains('@') {
            return Err(AppError::BadRequest("email is not valid".to_string()));
        }
        if self.age < 0 {
            return Err(AppError::BadRequest("age must not be negative".to_string()));
        }
        if self.national_id.chars().count() != NATIONAL_ID_LEN {
            return Err(AppError::BadRequest(format!(
                "national_id must be exactly {} characters",
                NATIONAL_ID_LEN
            )));
        }
        Ok(())
    }

    pub fn into_student(self, id: i64) -> Student {
        Student {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            age: self.age,
            national_id: self.national_id,
            course_id: self.course_id,
        }
    }
}

impl StudentResponse {
    pub fn new(student: Student, course: Course) -> Self {
        Self { student, course }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> StudentRequest {
        StudentRequest {
            first_name: "Ana".to_string(),
            last_name: "Souza".to_string(),
            email: "ana@example.com".to_string(),
            age: 21,
            national_id: "12345678901".to_string(),
            course_id: 1,
        }
    }

    #[test]
    fn accepts_well_formed_student() {
        assert!(ana().validate().is_ok());
    }

    #[test]
    fn rejects_short_national_id() {
        let req = StudentRequest {
            national_id: "1234".to_string(),
            ..ana()
        };
        assert!(matches!(req.validate(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn rejects_empty_last_name() {
        let req = StudentRequest {
            last_name: String::new(),
            ..ana()
        };
        assert!(matches!(req.validate(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn rejects_email_without_at_sign() {
        let req = StudentRequest {
            email: "ana.example.com".to_string(),
            ..ana()
        };
        assert!(matches!(req.validate(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn national_id_must_be_exact_length() {
        let req = StudentRequest {
            national_id: "1".repeat(NATIONAL_ID_LEN),
            ..ana()
        };
        assert!(req.validate().is_ok());

        for len in [NATIONAL_ID_LEN - 1, NATIONAL_ID_LEN + 1] {
            let req = StudentRequest {
                national_id: "1".repeat(len),
                ..ana()
            };
            assert!(matches!(req.validate(), Err(AppError::BadRequest(_))), "len {}", len);
        }
    }

    #[test]
    fn name_limits_are_inclusive() {
        let req = StudentRequest {
            first_name: "a".repeat(NAME_MAX_LEN),
            last_name: "b".repeat(NAME_MAX_LEN),
            ..ana()
        };
        assert!(req.validate().is_ok());

        let req = StudentRequest {
            first_name: "a".repeat(NAME_MAX_LEN + 1),
            ..ana()
        };
        assert!(matches!(req.validate(), Err(AppError::BadRequest(_))));

        let req = StudentRequest {
            last_name: "b".repeat(NAME_MAX_LEN + 1),
            ..ana()
        };
        assert!(matches!(req.validate(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn email_limit_is_inclusive() {
        let domain = "@example.com";
        let local = "a".repeat(NAME_MAX_LEN - domain.len());
        let req = StudentRequest {
            email: format!("{}{}", local, domain),
            ..ana()
        };
        assert!(req.validate().is_ok());

        let req = StudentRequest {
            email: format!("a{}{}", local, domain),
            ..ana()
        };
        assert!(matches!(req.validate(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn age_must_not_be_negative() {
        let req = StudentRequest { age: 0, ..ana() };
        assert!(req.validate().is_ok());

        let req = StudentRequest { age: -1, ..ana() };
        assert!(matches!(req.validate(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn response_flattens_student_and_embeds_course() {
        let course = Course {
            id: 1,
            title: "Algebra".to_string(),
            description: "Basics".to_string(),
            duration_hours: 40,
            exercise_count: 10,
            active: true,
        };
        let response = StudentResponse::new(ana().into_student(3), course);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["course_id"], 1);
        assert_eq!(json["course"]["id"], 1);
        assert_eq!(json["course"]["active"], true);
    }
}
