use serde::Serialize;
use std::collections::BTreeMap;

use crate::aggregators::types::AttendanceSummary;
use crate::aggregators::utility::{pct, round_to};
use crate::models::{AttendanceRecord, AttendanceStatus, RecordId};

/// Rounding applied to an attendance rate.
///
/// The overall figure has historically been shown with one decimal and the
/// per-course figures as whole percentages; both stay the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatePrecision {
    Tenths,
    Whole,
}

impl RatePrecision {
    fn apply(self, rate: f64) -> f64 {
        match self {
            RatePrecision::Tenths => round_to(rate, 1),
            RatePrecision::Whole => round_to(rate, 0),
        }
    }
}

/// Qualitative band for an attendance rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttendanceStanding {
    Excellent,
    Good,
    Average,
    Poor,
}

impl AttendanceStanding {
    pub fn from_rate(rate: f64) -> Self {
        match rate {
            r if r >= 90.0 => AttendanceStanding::Excellent,
            r if r >= 80.0 => AttendanceStanding::Good,
            r if r >= 70.0 => AttendanceStanding::Average,
            _ => AttendanceStanding::Poor,
        }
    }
}

impl AttendanceSummary {
    fn record(&mut self, status: AttendanceStatus) {
        self.total += 1;
        match status {
            AttendanceStatus::Present => self.present += 1,
            AttendanceStatus::Absent => self.absent += 1,
            AttendanceStatus::Holiday => self.holidays += 1,
        }
    }

    /// Sets the rate as present / classes held, excluding holidays.
    fn finish(mut self, precision: RatePrecision) -> Self {
        self.attendance_rate = precision.apply(pct(self.present, self.classes_held()));
        self
    }
}

/// Tallies records and computes the rate to one decimal.
pub fn aggregate<'a, I>(records: I) -> AttendanceSummary
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    let mut summary = AttendanceSummary::default();
    for record in records {
        summary.record(record.status);
    }
    summary.finish(RatePrecision::Tenths)
}

/// Tallies per course, with whole-percent rates.
pub fn per_course_aggregate<'a, I>(records: I) -> BTreeMap<RecordId, AttendanceSummary>
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    per_course_aggregate_with(records, RatePrecision::Whole)
}

pub fn per_course_aggregate_with<'a, I>(
    records: I,
    precision: RatePrecision,
) -> BTreeMap<RecordId, AttendanceSummary>
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    let mut by_course: BTreeMap<RecordId, AttendanceSummary> = BTreeMap::new();
    for record in records {
        by_course.entry(record.course_id).or_default().record(record.status);
    }

    by_course
        .into_iter()
        .map(|(course_id, summary)| (course_id, summary.finish(precision)))
        .collect()
}

/// Whole-percent rate across all courses from per-course tallies.
pub fn overall_rate(per_course: &BTreeMap<RecordId, AttendanceSummary>) -> f64 {
    let present: usize = per_course.values().map(|s| s.present).sum();
    let held: usize = per_course.values().map(AttendanceSummary::classes_held).sum();
    round_to(pct(present, held), 0)
}
