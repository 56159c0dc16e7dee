use anyhow::Result;
use chrono::Utc;
use tracing::info;

use crate::filters::announcements::{AnnouncementFilter, CourseScope, newest_first};
use crate::models::{Announcement, Priority, RecordId};
use crate::store::SharedProvider;

/// Announcements shown on the dashboard when no limit is given.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

pub struct AnnouncementService {
    provider: SharedProvider<Announcement>,
}

impl AnnouncementService {
    pub fn new(provider: SharedProvider<Announcement>) -> Self {
        Self { provider }
    }

    async fn filtered(&self, filter: &AnnouncementFilter) -> Result<Vec<Announcement>> {
        let all = self.provider.list().await?;
        Ok(filter.apply(&all))
    }

    /// Every announcement, newest first.
    pub async fn get_all(&self) -> Result<Vec<Announcement>> {
        self.filtered(&AnnouncementFilter::default()).await
    }

    pub async fn get_by_id(&self, id: RecordId) -> Result<Option<Announcement>> {
        self.provider.get(id).await
    }

    pub async fn get_by_category(&self, category: &str) -> Result<Vec<Announcement>> {
        self.filtered(&AnnouncementFilter {
            category: Some(category.to_string()),
            ..Default::default()
        })
        .await
    }

    pub async fn get_by_priority(&self, priority: Priority) -> Result<Vec<Announcement>> {
        self.filtered(&AnnouncementFilter {
            priority: Some(priority),
            ..Default::default()
        })
        .await
    }

    /// Announcements for the course, plus general ones.
    pub async fn get_by_course(&self, course_id: RecordId) -> Result<Vec<Announcement>> {
        self.filtered(&AnnouncementFilter {
            scope: CourseScope::Course(course_id),
            ..Default::default()
        })
        .await
    }

    pub async fn get_recent(&self, limit: usize) -> Result<Vec<Announcement>> {
        let mut all = self.provider.list().await?;
        newest_first(&mut all);
        all.truncate(limit);
        Ok(all)
    }

    /// Free-text search combined with the given filters; `query` replaces
    /// any text already set on `filters`.
    #[tracing::instrument(skip(self, filters))]
    pub async fn search(&self, query: &str, filters: AnnouncementFilter) -> Result<Vec<Announcement>> {
        let filter = AnnouncementFilter {
            text: Some(query.to_string()),
            ..filters
        };
        self.filtered(&filter).await
    }

    /// Stamps the announcement with the current time before storing it.
    pub async fn create(&self, mut announcement: Announcement) -> Result<Announcement> {
        announcement.timestamp = Utc::now();
        let created = self.provider.insert(announcement).await?;
        info!(id = created.id, title = %created.title, "Announcement posted");
        Ok(created)
    }

    pub async fn update(&self, id: RecordId, announcement: Announcement) -> Result<Option<Announcement>> {
        self.provider.update(id, announcement).await
    }

    pub async fn delete(&self, id: RecordId) -> Result<Option<Announcement>> {
        self.provider.delete(id).await
    }
}
