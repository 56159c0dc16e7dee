//! Portal record types.
//!
//! Every record carries a numeric identifier serialized under the `Id` key
//! (plain `id` is accepted on input) and camelCase field names, matching the
//! fixture files in `fixtures/`.

pub mod announcement;
pub mod assignment;
pub mod attendance;
pub mod course;
pub mod grade;

pub use announcement::{Announcement, Priority};
pub use assignment::{Assignment, AssignmentStatus};
pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use course::{Course, EnrollmentStatus};
pub use grade::Grade;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Identifier shared by every record type.
pub type RecordId = u32;

/// Label shown when a record points at a course that does not exist.
pub const UNKNOWN_COURSE: &str = "Unknown Course";

/// A flat record that can be held by a [`crate::store::RecordProvider`].
pub trait Record: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Collection name, used for fixture files and remote tables.
    const TABLE: &'static str;

    fn id(&self) -> RecordId;
    fn set_id(&mut self, id: RecordId);
}

macro_rules! impl_record {
    ($($ty:ty => $table:literal),* $(,)?) => {
        $(
            impl Record for $ty {
                const TABLE: &'static str = $table;

                fn id(&self) -> RecordId {
                    self.id
                }

                fn set_id(&mut self, id: RecordId) {
                    self.id = id;
                }
            }
        )*
    };
}

impl_record! {
    Announcement => "announcements",
    Assignment => "assignments",
    AttendanceRecord => "attendance",
    Course => "courses",
    Grade => "grades",
}

/// Resolves a course id to `"CODE - Name"`, or [`UNKNOWN_COURSE`] for orphans.
pub fn course_label(courses: &[Course], course_id: RecordId) -> String {
    courses
        .iter()
        .find(|c| c.id == course_id)
        .map(|c| format!("{} - {}", c.code, c.name))
        .unwrap_or_else(|| UNKNOWN_COURSE.to_string())
}
