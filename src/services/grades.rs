use anyhow::Result;
use chrono::Utc;
use tracing::info;

use crate::aggregators::{CreditRegistry, GpaSummary, calculate_gpa, gpa_breakdown};
use crate::models::{Grade, RecordId};
use crate::store::SharedProvider;

pub struct GradeService {
    provider: SharedProvider<Grade>,
}

impl GradeService {
    pub fn new(provider: SharedProvider<Grade>) -> Self {
        Self { provider }
    }

    pub async fn get_all(&self) -> Result<Vec<Grade>> {
        self.provider.list().await
    }

    pub async fn get_by_id(&self, id: RecordId) -> Result<Option<Grade>> {
        self.provider.get(id).await
    }

    pub async fn get_by_course(&self, course_id: RecordId) -> Result<Vec<Grade>> {
        let grades = self.provider.list().await?;
        Ok(grades.into_iter().filter(|g| g.course_id == course_id).collect())
    }

    /// Stamps the grade with the current time before storing it.
    #[tracing::instrument(skip(self, grade), fields(course_id = grade.course_id))]
    pub async fn create(&self, mut grade: Grade) -> Result<Grade> {
        grade.graded_date = Utc::now();
        let created = self.provider.insert(grade).await?;
        info!(id = created.id, "Grade recorded");
        Ok(created)
    }

    pub async fn update(&self, id: RecordId, grade: Grade) -> Result<Option<Grade>> {
        self.provider.update(id, grade).await
    }

    pub async fn delete(&self, id: RecordId) -> Result<Option<Grade>> {
        self.provider.delete(id).await
    }

    pub async fn calculate_gpa(&self, credits: &CreditRegistry) -> Result<f64> {
        let grades = self.provider.list().await?;
        Ok(calculate_gpa(&grades, credits))
    }

    pub async fn gpa_breakdown(&self, credits: &CreditRegistry) -> Result<GpaSummary> {
        let grades = self.provider.list().await?;
        Ok(gpa_breakdown(&grades, credits))
    }
}
