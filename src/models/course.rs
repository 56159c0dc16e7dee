use serde::{Deserialize, Serialize};
use std::fmt;

use super::RecordId;

/// Whether the student holds a seat in the course or is queued for one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    #[default]
    Enrolled,
    Waitlisted,
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnrollmentStatus::Enrolled => f.write_str("enrolled"),
            EnrollmentStatus::Waitlisted => f.write_str("waitlisted"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "Id", alias = "id", default)]
    pub id: RecordId,
    pub code: String,
    pub name: String,
    pub credits: u32,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub professor: String,
    #[serde(default)]
    pub schedule: String,
    #[serde(default)]
    pub enrollment_status: EnrollmentStatus,
}

impl Course {
    /// Builds an enrolled course with empty descriptive fields and no id yet.
    pub fn new(code: &str, name: &str, credits: u32) -> Self {
        Self {
            id: 0,
            code: code.to_string(),
            name: name.to_string(),
            credits,
            department: String::new(),
            professor: String::new(),
            schedule: String::new(),
            enrollment_status: EnrollmentStatus::Enrolled,
        }
    }

    pub fn with_department(mut self, department: &str) -> Self {
        self.department = department.to_string();
        self
    }

    pub fn with_professor(mut self, professor: &str) -> Self {
        self.professor = professor.to_string();
        self
    }

    pub fn is_enrolled(&self) -> bool {
        self.enrollment_status == EnrollmentStatus::Enrolled
    }
}
