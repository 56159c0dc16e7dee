use chrono::NaiveDate;

use crate::models::{AttendanceRecord, RecordId};

/// Records dated within `[start, end]`, optionally for one course.
pub fn within_dates(
    records: &[AttendanceRecord],
    start: NaiveDate,
    end: NaiveDate,
    course: Option<RecordId>,
) -> Vec<AttendanceRecord> {
    records
        .iter()
        .filter(|r| r.date >= start && r.date <= end)
        .filter(|r| course.is_none_or(|id| r.course_id == id))
        .cloned()
        .collect()
}

/// The `limit` latest records by date.
pub fn recent(records: &[AttendanceRecord], limit: usize) -> Vec<AttendanceRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttendanceStatus;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn records() -> Vec<AttendanceRecord> {
        vec![
            AttendanceRecord::new(1, day(1), AttendanceStatus::Present),
            AttendanceRecord::new(2, day(4), AttendanceStatus::Absent),
            AttendanceRecord::new(1, day(8), AttendanceStatus::Holiday),
            AttendanceRecord::new(1, day(12), AttendanceStatus::Present),
        ]
    }

    #[test]
    fn test_range_is_inclusive() {
        let found = within_dates(&records(), day(4), day(8), None);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].date, day(4));
        assert_eq!(found[1].date, day(8));
    }

    #[test]
    fn test_range_with_course() {
        let found = within_dates(&records(), day(1), day(31), Some(1));
        assert_eq!(found.len(), 3);
        assert!(within_dates(&records(), day(1), day(31), Some(7)).is_empty());
    }

    #[test]
    fn test_recent() {
        let latest = recent(&records(), 2);
        assert_eq!(latest[0].date, day(12));
        assert_eq!(latest[1].date, day(8));
    }
}
