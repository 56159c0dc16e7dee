//! Client-side list narrowing and ordering.
//!
//! Every sort here is stable: records that compare equal keep their input
//! order. A filter value missing from the data simply yields an empty list.

pub mod announcements;
pub mod assignments;
pub mod attendance;
pub mod courses;
pub mod grades;

pub use announcements::{AnnouncementFilter, CourseScope};
pub use courses::{CourseQuery, CourseSort};
pub use grades::{GradeQuery, GradeSort};

use std::cmp::Ordering;

/// Case-insensitive substring match of `query` against any of `fields`.
/// A blank query matches everything.
pub fn matches_query(query: &str, fields: &[&str]) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    fields.iter().any(|f| f.to_lowercase().contains(&query))
}

/// Human ordering for display strings: case-insensitive first, and on a
/// case-only tie the lowercase form sorts first.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}
