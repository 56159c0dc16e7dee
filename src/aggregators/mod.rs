//! GPA and attendance aggregation.
//!
//! Pure functions over already-loaded record slices. Nothing here fails:
//! empty input and zero denominators produce zero-valued results.

pub mod attendance;
pub mod credits;
pub mod gpa;
pub mod grade_points;
pub mod types;
pub mod utility;

pub use attendance::{AttendanceStanding, RatePrecision, aggregate, overall_rate, per_course_aggregate};
pub use credits::{CreditRegistry, DEFAULT_CREDITS};
pub use gpa::{calculate_gpa, course_weighted_percentage, gpa_breakdown, try_calculate_gpa};
pub use grade_points::{letter_grade, percentage_to_gpa};
pub use types::{AttendanceSummary, CourseGpa, GpaSummary, GradeDistribution};
