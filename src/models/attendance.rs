use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    /// No class was held that day.
    Holiday,
}

/// Attendance for one course meeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(rename = "Id", alias = "id", default)]
    pub id: RecordId,
    pub course_id: RecordId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl AttendanceRecord {
    pub fn new(course_id: RecordId, date: NaiveDate, status: AttendanceStatus) -> Self {
        Self {
            id: 0,
            course_id,
            date,
            status,
            remarks: None,
        }
    }
}
