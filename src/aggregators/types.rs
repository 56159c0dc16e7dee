//! Summary structures produced by the aggregators.

use serde::Serialize;

use crate::models::RecordId;

/// Weighted result for a single course.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseGpa {
    pub course_id: RecordId,
    pub percentage: f64,
    pub grade_points: f64,
    pub credits: u32,
}

/// Credit-weighted GPA with the per-course figures that produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GpaSummary {
    pub gpa: f64,
    pub total_credits: u32,
    pub courses: Vec<CourseGpa>,
}

/// Present/absent/holiday tallies and the resulting attendance rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
    pub holidays: usize,
    pub attendance_rate: f64,
}

impl AttendanceSummary {
    /// Meetings that actually took place.
    pub fn classes_held(&self) -> usize {
        self.total - self.holidays
    }
}

/// Count of graded items per letter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GradeDistribution {
    #[serde(rename = "A")]
    pub a: usize,
    #[serde(rename = "B")]
    pub b: usize,
    #[serde(rename = "C")]
    pub c: usize,
    #[serde(rename = "D")]
    pub d: usize,
    #[serde(rename = "F")]
    pub f: usize,
}
