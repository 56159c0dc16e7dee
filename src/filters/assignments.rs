use chrono::{DateTime, Utc};

use crate::models::Assignment;

/// Unsubmitted assignments due after `now`, soonest first.
pub fn upcoming(assignments: &[Assignment], now: DateTime<Utc>) -> Vec<Assignment> {
    let mut due: Vec<Assignment> = assignments.iter().filter(|a| a.is_upcoming(now)).cloned().collect();
    due.sort_by(|a, b| a.due_date.cmp(&b.due_date));
    due
}
