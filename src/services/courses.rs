use anyhow::Result;
use tracing::info;

use crate::aggregators::CreditRegistry;
use crate::models::{Course, EnrollmentStatus, RecordId};
use crate::store::SharedProvider;

pub struct CourseService {
    provider: SharedProvider<Course>,
}

impl CourseService {
    pub fn new(provider: SharedProvider<Course>) -> Self {
        Self { provider }
    }

    pub async fn get_all(&self) -> Result<Vec<Course>> {
        self.provider.list().await
    }

    pub async fn get_by_id(&self, id: RecordId) -> Result<Option<Course>> {
        self.provider.get(id).await
    }

    pub async fn get_enrolled(&self) -> Result<Vec<Course>> {
        let courses = self.provider.list().await?;
        Ok(courses.into_iter().filter(Course::is_enrolled).collect())
    }

    /// New courses always start out enrolled.
    #[tracing::instrument(skip(self, course), fields(code = %course.code))]
    pub async fn create(&self, mut course: Course) -> Result<Course> {
        course.enrollment_status = EnrollmentStatus::Enrolled;
        let created = self.provider.insert(course).await?;
        info!(id = created.id, "Course created");
        Ok(created)
    }

    pub async fn update(&self, id: RecordId, course: Course) -> Result<Option<Course>> {
        self.provider.update(id, course).await
    }

    pub async fn delete(&self, id: RecordId) -> Result<Option<Course>> {
        self.provider.delete(id).await
    }

    /// Credits per course, falling back to `fallback` for unknown ids.
    pub async fn credit_registry(&self, fallback: u32) -> Result<CreditRegistry> {
        let courses = self.provider.list().await?;
        Ok(CreditRegistry::from_courses(&courses, fallback))
    }
}
