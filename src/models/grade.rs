use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RecordId;

/// A single graded item. `weight` is the item's fractional share of its
/// course grade and is not validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    #[serde(rename = "Id", alias = "id", default)]
    pub id: RecordId,
    pub course_id: RecordId,
    pub assignment_name: String,
    pub score: f64,
    pub max_score: f64,
    pub weight: f64,
    pub graded_date: DateTime<Utc>,
}

impl Grade {
    pub fn new(course_id: RecordId, assignment_name: &str, score: f64, max_score: f64, weight: f64) -> Self {
        Self {
            id: 0,
            course_id,
            assignment_name: assignment_name.to_string(),
            score,
            max_score,
            weight,
            graded_date: Utc::now(),
        }
    }

    /// Score as a 0–100 percentage. A non-positive `max_score` yields 0.
    pub fn percentage(&self) -> f64 {
        if self.max_score > 0.0 {
            self.score / self.max_score * 100.0
        } else {
            0.0
        }
    }

    /// Score as a 0–1 ratio, used for score ordering.
    pub fn ratio(&self) -> f64 {
        self.percentage() / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        let g = Grade::new(1, "Quiz 1", 45.0, 50.0, 0.1);
        assert!((g.percentage() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentage_zero_max_score() {
        let g = Grade::new(1, "Broken", 10.0, 0.0, 0.1);
        assert_eq!(g.percentage(), 0.0);
    }

    #[test]
    fn test_deserialize_fixture_shape() {
        let json = r#"{
            "Id": 3,
            "courseId": 2,
            "assignmentName": "Midterm",
            "score": 82,
            "maxScore": 100,
            "weight": 0.3,
            "gradedDate": "2024-02-15T10:00:00Z"
        }"#;
        let g: Grade = serde_json::from_str(json).unwrap();
        assert_eq!(g.id, 3);
        assert_eq!(g.course_id, 2);
        assert_eq!(g.score, 82.0);
    }
}
