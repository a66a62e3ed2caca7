pub mod course_service;
pub mod guards;
pub mod student_service;

pub use course_service::CourseService;
pub use student_service::StudentService;
