use crate::filters::{locale_cmp, matches_query};
use crate::models::{Course, EnrollmentStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CourseSort {
    #[default]
    Name,
    Code,
    Professor,
    /// Most credits first.
    Credits,
}

/// Filters applied on the course listing.
#[derive(Debug, Clone, Default)]
pub struct CourseQuery {
    /// Matched against name, code and professor.
    pub text: Option<String>,
    pub department: Option<String>,
    pub status: Option<EnrollmentStatus>,
    pub sort: Option<CourseSort>,
}

impl CourseQuery {
    pub fn apply(&self, courses: &[Course]) -> Vec<Course> {
        let mut filtered: Vec<Course> = courses
            .iter()
            .filter(|c| {
                self.text
                    .as_deref()
                    .is_none_or(|q| matches_query(q, &[c.name.as_str(), c.code.as_str(), c.professor.as_str()]))
            })
            .filter(|c| self.department.as_deref().is_none_or(|d| c.department == d))
            .filter(|c| self.status.is_none_or(|s| c.enrollment_status == s))
            .cloned()
            .collect();

        if let Some(sort) = self.sort {
            sort_courses(&mut filtered, sort);
        }

        filtered
    }
}

pub fn sort_courses(courses: &mut [Course], sort: CourseSort) {
    match sort {
        CourseSort::Name => courses.sort_by(|a, b| locale_cmp(&a.name, &b.name)),
        CourseSort::Code => courses.sort_by(|a, b| locale_cmp(&a.code, &b.code)),
        CourseSort::Professor => courses.sort_by(|a, b| locale_cmp(&a.professor, &b.professor)),
        CourseSort::Credits => courses.sort_by(|a, b| b.credits.cmp(&a.credits)),
    }
}
