//! Per-record-type services.
//!
//! Thin wrappers over a [`crate::store::RecordProvider`] that add the
//! domain queries each portal page needs. Every call is async and fallible;
//! the aggregation they delegate to is not.

pub mod announcements;
pub mod assignments;
pub mod attendance;
pub mod courses;
pub mod grades;

pub use announcements::AnnouncementService;
pub use assignments::AssignmentService;
pub use attendance::AttendanceService;
pub use courses::CourseService;
pub use grades::GradeService;
