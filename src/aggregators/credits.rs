use std::collections::HashMap;

use crate::models::{Course, RecordId};

/// Credits assumed for a course the registry does not know.
pub const DEFAULT_CREDITS: u32 = 3;

/// Credits-per-course lookup used by the GPA calculation.
///
/// Built from the course list; unknown course ids resolve to the registry's
/// fallback value.
#[derive(Debug, Clone)]
pub struct CreditRegistry {
    credits: HashMap<RecordId, u32>,
    fallback: u32,
}

impl Default for CreditRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_CREDITS)
    }
}

impl CreditRegistry {
    pub fn new(fallback: u32) -> Self {
        Self {
            credits: HashMap::new(),
            fallback,
        }
    }

    pub fn from_courses(courses: &[Course], fallback: u32) -> Self {
        Self {
            credits: courses.iter().map(|c| (c.id, c.credits)).collect(),
            fallback,
        }
    }

    pub fn with_credits(mut self, course_id: RecordId, credits: u32) -> Self {
        self.credits.insert(course_id, credits);
        self
    }

    pub fn credits_for(&self, course_id: RecordId) -> u32 {
        self.credits.get(&course_id).copied().unwrap_or(self.fallback)
    }

    pub fn fallback(&self) -> u32 {
        self.fallback
    }
}
