use std::cmp::Ordering;

use crate::filters::locale_cmp;
use crate::models::{Course, Grade, RecordId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum GradeSort {
    /// Most recently graded first.
    #[default]
    Recent,
    /// By course code.
    Course,
    /// Highest score ratio first.
    Score,
    Assignment,
}

#[derive(Debug, Clone, Default)]
pub struct GradeQuery {
    pub course: Option<RecordId>,
    pub sort: GradeSort,
}

impl GradeQuery {
    /// `courses` resolves course codes for [`GradeSort::Course`]; grades whose
    /// course is unknown go last, in input order.
    pub fn apply(&self, grades: &[Grade], courses: &[Course]) -> Vec<Grade> {
        let mut filtered: Vec<Grade> = grades
            .iter()
            .filter(|g| self.course.is_none_or(|id| g.course_id == id))
            .cloned()
            .collect();

        match self.sort {
            GradeSort::Recent => most_recent_first(&mut filtered),
            GradeSort::Course => {
                let code = |id: RecordId| courses.iter().find(|c| c.id == id).map(|c| c.code.as_str());
                filtered.sort_by(|a, b| match (code(a.course_id), code(b.course_id)) {
                    (Some(x), Some(y)) => locale_cmp(x, y),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                });
            }
            GradeSort::Score => filtered.sort_by(|a, b| b.ratio().total_cmp(&a.ratio())),
            GradeSort::Assignment => {
                filtered.sort_by(|a, b| locale_cmp(&a.assignment_name, &b.assignment_name))
            }
        }

        filtered
    }
}

pub fn most_recent_first(grades: &mut [Grade]) {
    grades.sort_by(|a, b| b.graded_date.cmp(&a.graded_date));
}

/// The `limit` most recently graded items.
pub fn recent(grades: &[Grade], limit: usize) -> Vec<Grade> {
    let mut sorted = grades.to_vec();
    most_recent_first(&mut sorted);
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn grades() -> Vec<Grade> {
        let now = Utc::now();
        let mut list = vec![
            Grade::new(2, "Quiz", 18.0, 20.0, 0.1),
            Grade::new(1, "Essay", 70.0, 100.0, 0.3),
            Grade::new(3, "Lab report", 45.0, 50.0, 0.2),
            Grade::new(1, "Assignment 1", 95.0, 100.0, 0.2),
        ];
        for (i, g) in list.iter_mut().enumerate() {
            g.id = i as u32 + 1;
            g.graded_date = now - Duration::days(i as i64 * 2);
        }
        list
    }

    fn courses() -> Vec<Course> {
        let mut a = Course::new("MA201", "Linear Algebra", 3);
        a.id = 1;
        let mut b = Course::new("CS201", "Data Structures", 4);
        b.id = 2;
        vec![a, b]
    }

    fn ids(list: &[Grade]) -> Vec<RecordId> {
        list.iter().map(|g| g.id).collect()
    }

    #[test]
    fn test_recent_order() {
        let q = GradeQuery::default();
        assert_eq!(ids(&q.apply(&grades(), &courses())), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_course_filter() {
        let q = GradeQuery { course: Some(1), sort: GradeSort::Assignment };
        assert_eq!(ids(&q.apply(&grades(), &courses())), vec![4, 2]);
    }

    #[test]
    fn test_score_descending() {
        let q = GradeQuery { course: None, sort: GradeSort::Score };
        // 0.95, 0.9 (quiz), 0.9 (lab), 0.7 -- ties keep input order
        assert_eq!(ids(&q.apply(&grades(), &courses())), vec![4, 1, 3, 2]);
    }

    #[test]
    fn test_course_code_with_unknown_course() {
        let list = grades();
        let q = GradeQuery { course: None, sort: GradeSort::Course };
        let sorted = q.apply(&list[..2], &courses());
        // CS201 before MA201
        assert_eq!(ids(&sorted), vec![1, 2]);

        let orphan_first = vec![list[2].clone(), list[0].clone()];
        assert_eq!(ids(&q.apply(&orphan_first, &courses())), vec![1, 3]);
    }

    #[test]
    fn test_course_sort_with_many_orphans() {
        let courses: Vec<Course> = (0..40)
            .map(|i| {
                let mut c = Course::new(&format!("C{i:03}"), "Course", 3);
                c.id = i + 1;
                c
            })
            .collect();

        // Interleave known course ids 1..=40 with orphaned ids 101..=140.
        let grades: Vec<Grade> = (0..200u32)
            .map(|i| {
                let course_id = if i % 2 == 0 { 40 - (i * 7) % 40 } else { 101 + i % 40 };
                let mut g = Grade::new(course_id, "item", 1.0, 1.0, 1.0);
                g.id = i + 1;
                g
            })
            .collect();

        let q = GradeQuery { course: None, sort: GradeSort::Course };
        let sorted = q.apply(&grades, &courses);
        assert_eq!(sorted.len(), 200);

        let (known, orphans) = sorted.split_at(100);
        assert!(known.iter().all(|g| g.course_id <= 40));
        assert!(orphans.iter().all(|g| g.course_id > 100));

        let codes: Vec<RecordId> = known.iter().map(|g| g.course_id).collect();
        let mut expected = codes.clone();
        expected.sort();
        assert_eq!(codes, expected);

        // Orphans keep their input order.
        let orphan_ids: Vec<RecordId> = orphans.iter().map(|g| g.id).collect();
        let expected_orphans: Vec<RecordId> = (0..200u32).filter(|i| i % 2 == 1).map(|i| i + 1).collect();
        assert_eq!(orphan_ids, expected_orphans);
    }

    #[test]
    fn test_recent_limit() {
        assert_eq!(ids(&recent(&grades(), 2)), vec![1, 2]);
        assert!(recent(&[], 3).is_empty());
    }
}
