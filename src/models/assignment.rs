use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RecordId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    #[default]
    Pending,
    Submitted,
    Graded,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    #[serde(rename = "Id", alias = "id", default)]
    pub id: RecordId,
    pub course_id: RecordId,
    pub title: String,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub submitted: bool,
    #[serde(default)]
    pub status: AssignmentStatus,
}

impl Assignment {
    pub fn new(course_id: RecordId, title: &str, due_date: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            course_id,
            title: title.to_string(),
            due_date,
            submitted: false,
            status: AssignmentStatus::Pending,
        }
    }

    /// Due strictly after `now` and not yet handed in.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.due_date > now && !self.submitted
    }
}
