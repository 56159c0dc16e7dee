use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A notice posted to the portal. `course_id` is `None` for general
/// announcements that apply to every course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    #[serde(rename = "Id", alias = "id", default)]
    pub id: RecordId,
    pub title: String,
    pub content: String,
    pub category: String,
    pub priority: Priority,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub course_id: Option<RecordId>,
}

impl Announcement {
    pub fn is_general(&self) -> bool {
        self.course_id.is_none()
    }
}
