use crate::filters::matches_query;
use crate::models::{Announcement, Priority, RecordId};

/// Which announcements a course filter admits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CourseScope {
    #[default]
    Any,
    /// Only announcements without a course.
    General,
    /// Announcements for this course plus general ones.
    Course(RecordId),
    /// Announcements for this course only.
    Exact(RecordId),
}

impl CourseScope {
    pub fn admits(&self, announcement: &Announcement) -> bool {
        match *self {
            CourseScope::Any => true,
            CourseScope::General => announcement.is_general(),
            CourseScope::Course(id) => announcement.is_general() || announcement.course_id == Some(id),
            CourseScope::Exact(id) => announcement.course_id == Some(id),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnnouncementFilter {
    /// Matched against title, content and author.
    pub text: Option<String>,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub scope: CourseScope,
}

impl AnnouncementFilter {
    /// Returns matching announcements, newest first.
    pub fn apply(&self, announcements: &[Announcement]) -> Vec<Announcement> {
        let mut filtered: Vec<Announcement> = announcements
            .iter()
            .filter(|a| {
                self.text
                    .as_deref()
                    .is_none_or(|q| matches_query(q, &[a.title.as_str(), a.content.as_str(), a.author.as_str()]))
            })
            .filter(|a| self.category.as_deref().is_none_or(|c| a.category == c))
            .filter(|a| self.priority.is_none_or(|p| a.priority == p))
            .filter(|a| self.scope.admits(a))
            .cloned()
            .collect();

        newest_first(&mut filtered);
        filtered
    }
}

pub fn newest_first(announcements: &mut [Announcement]) {
    announcements.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
