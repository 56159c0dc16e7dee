//! The portal: every service wired to one backend, plus the page-level
//! views built on top of them.
//!
//! Collection loads that fail are reported through [`or_empty`], which logs
//! the failure and hands back an empty list so the aggregators can carry on
//! with their zero-valued defaults.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::error;

use crate::aggregators::attendance::AttendanceStanding;
use crate::aggregators::gpa::{average_percentage, course_grade_points, grade_distribution};
use crate::aggregators::{
    AttendanceSummary, CreditRegistry, GradeDistribution, gpa_breakdown, letter_grade, overall_rate, per_course_aggregate,
};
use crate::config::PortalConfig;
use crate::filters::assignments::upcoming;
use crate::models::{Announcement, Assignment, Course, RecordId, course_label};
use crate::services::announcements::DEFAULT_RECENT_LIMIT;
use crate::services::{AnnouncementService, AssignmentService, AttendanceService, CourseService, GradeService};
use crate::store::Backend;

/// Logs a failed load and substitutes an empty collection.
pub fn or_empty<T>(result: Result<Vec<T>>, what: &str) -> Vec<T> {
    match result {
        Ok(records) => records,
        Err(e) => {
            error!(error = %e, collection = what, "Failed to load data");
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseOverview {
    pub course_id: RecordId,
    pub code: String,
    pub name: String,
    pub credits: u32,
    /// `None` when no attendance has been recorded for the course.
    pub attendance_rate: Option<f64>,
    pub standing: Option<AttendanceStanding>,
    /// `None` when the course has no grades yet.
    pub grade_points: Option<f64>,
    pub upcoming_assignments: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub gpa: f64,
    pub overall_attendance: f64,
    pub enrolled_courses: usize,
    pub total_credits: u32,
    pub courses: Vec<CourseOverview>,
    pub upcoming_assignments: Vec<Assignment>,
    pub recent_announcements: Vec<Announcement>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseGpaLine {
    pub course_id: RecordId,
    pub course: String,
    pub percentage: f64,
    pub letter: &'static str,
    pub grade_points: f64,
    pub credits: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GpaReport {
    pub gpa: f64,
    pub total_credits: u32,
    /// Unweighted mean over every graded item.
    pub average_percentage: f64,
    pub distribution: GradeDistribution,
    pub courses: Vec<CourseGpaLine>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseAttendanceLine {
    pub course_id: RecordId,
    pub course: String,
    #[serde(flatten)]
    pub summary: AttendanceSummary,
    pub standing: AttendanceStanding,
}

pub struct Portal {
    pub courses: CourseService,
    pub grades: GradeService,
    pub attendance: AttendanceService,
    pub announcements: AnnouncementService,
    pub assignments: AssignmentService,
    default_credits: u32,
}

impl Portal {
    pub fn from_config(config: &PortalConfig) -> Result<Self> {
        let backend = Backend::from_config(config)?;
        Self::from_backend(&backend, config.default_credits)
    }

    pub fn from_backend(backend: &Backend, default_credits: u32) -> Result<Self> {
        Ok(Self {
            courses: CourseService::new(backend.provider()?),
            grades: GradeService::new(backend.provider()?),
            attendance: AttendanceService::new(backend.provider()?),
            announcements: AnnouncementService::new(backend.provider()?),
            assignments: AssignmentService::new(backend.provider()?),
            default_credits,
        })
    }

    pub async fn gpa_report(&self) -> GpaReport {
        let (courses, grades) = tokio::join!(self.courses.get_all(), self.grades.get_all());
        let courses = or_empty(courses, "courses");
        let grades = or_empty(grades, "grades");

        let registry = CreditRegistry::from_courses(&courses, self.default_credits);
        let summary = gpa_breakdown(&grades, &registry);

        GpaReport {
            gpa: summary.gpa,
            total_credits: summary.total_credits,
            average_percentage: average_percentage(&grades),
            distribution: grade_distribution(&grades),
            courses: summary
                .courses
                .into_iter()
                .map(|c| CourseGpaLine {
                    course_id: c.course_id,
                    course: course_label(&courses, c.course_id),
                    percentage: c.percentage,
                    letter: letter_grade(c.percentage),
                    grade_points: c.grade_points,
                    credits: c.credits,
                })
                .collect(),
        }
    }

    pub async fn attendance_by_course(&self) -> Vec<CourseAttendanceLine> {
        let (courses, records) = tokio::join!(self.courses.get_all(), self.attendance.get_all());
        let courses = or_empty(courses, "courses");
        let records = or_empty(records, "attendance");

        per_course_aggregate(&records)
            .into_iter()
            .map(|(course_id, summary)| CourseAttendanceLine {
                course_id,
                course: course_label(&courses, course_id),
                summary,
                standing: AttendanceStanding::from_rate(summary.attendance_rate),
            })
            .collect()
    }

    /// Everything the landing page shows, loaded concurrently.
    #[tracing::instrument(skip(self))]
    pub async fn dashboard(&self, now: DateTime<Utc>) -> Dashboard {
        let (courses, grades, attendance, assignments, announcements) = tokio::join!(
            self.courses.get_all(),
            self.grades.get_all(),
            self.attendance.get_all(),
            self.assignments.get_all(),
            self.announcements.get_recent(DEFAULT_RECENT_LIMIT),
        );
        let all_courses = or_empty(courses, "courses");
        let grades = or_empty(grades, "grades");
        let attendance = or_empty(attendance, "attendance");
        let assignments = or_empty(assignments, "assignments");
        let recent_announcements = or_empty(announcements, "announcements");

        // Credits from every course, waitlisted included; the overview lists
        // enrolled ones only.
        let registry = CreditRegistry::from_courses(&all_courses, self.default_credits);
        let gpa = gpa_breakdown(&grades, &registry).gpa;
        let courses: Vec<Course> = all_courses.into_iter().filter(Course::is_enrolled).collect();
        let attendance_stats = per_course_aggregate(&attendance);
        let upcoming_assignments = upcoming(&assignments, now);

        let overviews = courses
            .iter()
            .map(|course| {
                let stats = attendance_stats.get(&course.id);
                let course_grades: Vec<_> = grades.iter().filter(|g| g.course_id == course.id).collect();
                CourseOverview {
                    course_id: course.id,
                    code: course.code.clone(),
                    name: course.name.clone(),
                    credits: course.credits,
                    attendance_rate: stats.map(|s| s.attendance_rate),
                    standing: stats.map(|s| AttendanceStanding::from_rate(s.attendance_rate)),
                    grade_points: (!course_grades.is_empty())
                        .then(|| course_grade_points(course_grades.iter().copied())),
                    upcoming_assignments: upcoming_assignments
                        .iter()
                        .filter(|a| a.course_id == course.id)
                        .count(),
                }
            })
            .collect();

        Dashboard {
            gpa,
            overall_attendance: overall_rate(&attendance_stats),
            enrolled_courses: courses.len(),
            total_credits: courses.iter().map(|c| c.credits).sum(),
            courses: overviews,
            upcoming_assignments,
            recent_announcements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EnrollmentStatus, Grade};
    use crate::store::MemoryProvider;
    use anyhow::anyhow;
    use std::sync::Arc;

    fn memory_portal(courses: Vec<Course>, grades: Vec<Grade>) -> Portal {
        Portal {
            courses: CourseService::new(Arc::new(MemoryProvider::new(courses).unwrap())),
            grades: GradeService::new(Arc::new(MemoryProvider::new(grades).unwrap())),
            attendance: AttendanceService::new(Arc::new(MemoryProvider::new(Vec::new()).unwrap())),
            announcements: AnnouncementService::new(Arc::new(MemoryProvider::new(Vec::new()).unwrap())),
            assignments: AssignmentService::new(Arc::new(MemoryProvider::new(Vec::new()).unwrap())),
            default_credits: 3,
        }
    }

    #[tokio::test]
    async fn test_dashboard_gpa_counts_waitlisted_credits() {
        let mut seminar = Course::new("HIS 101", "History Seminar", 1);
        seminar.id = 1;
        let mut lab = Course::new("CHEM 210", "Organic Chemistry", 5);
        lab.id = 2;
        lab.enrollment_status = EnrollmentStatus::Waitlisted;

        let portal = memory_portal(
            vec![seminar, lab],
            vec![
                Grade::new(1, "Essay", 98.0, 100.0, 1.0),
                Grade::new(2, "Midterm", 50.0, 100.0, 1.0),
            ],
        );

        let dashboard = portal.dashboard(Utc::now()).await;
        let report = portal.gpa_report().await;

        // (4.0 × 1 + 0.0 × 5) / 6
        assert_eq!(report.gpa, 0.67);
        assert_eq!(dashboard.gpa, report.gpa);
        assert_eq!(dashboard.enrolled_courses, 1);
        assert_eq!(dashboard.total_credits, 1);
        assert_eq!(dashboard.courses.len(), 1);
    }

    #[tokio::test]
    async fn test_gpa_report_includes_average_and_distribution() {
        let portal = memory_portal(
            Vec::new(),
            vec![
                Grade::new(1, "Quiz", 95.0, 100.0, 0.5),
                Grade::new(1, "Exam", 65.0, 100.0, 0.5),
                Grade::new(2, "Lab", 40.0, 50.0, 1.0),
            ],
        );

        let report = portal.gpa_report().await;
        assert_eq!(report.average_percentage, 80.0);
        assert_eq!(report.distribution.a, 1);
        assert_eq!(report.distribution.b, 1);
        assert_eq!(report.distribution.d, 1);
        assert_eq!(report.distribution.f, 0);
    }

    #[test]
    fn test_or_empty_passes_data_through() {
        assert_eq!(or_empty(Ok(vec![1, 2]), "numbers"), vec![1, 2]);
    }

    #[test]
    fn test_or_empty_swallows_errors() {
        let failed: Result<Vec<u8>> = Err(anyhow!("connection refused"));
        assert!(or_empty(failed, "numbers").is_empty());
    }
}
