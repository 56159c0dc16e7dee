use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::filters::assignments::upcoming;
use crate::models::{Assignment, AssignmentStatus, RecordId};
use crate::store::SharedProvider;

pub struct AssignmentService {
    provider: SharedProvider<Assignment>,
}

impl AssignmentService {
    pub fn new(provider: SharedProvider<Assignment>) -> Self {
        Self { provider }
    }

    pub async fn get_all(&self) -> Result<Vec<Assignment>> {
        self.provider.list().await
    }

    pub async fn get_by_id(&self, id: RecordId) -> Result<Option<Assignment>> {
        self.provider.get(id).await
    }

    pub async fn get_by_course(&self, course_id: RecordId) -> Result<Vec<Assignment>> {
        let all = self.provider.list().await?;
        Ok(all.into_iter().filter(|a| a.course_id == course_id).collect())
    }

    pub async fn get_upcoming(&self, now: DateTime<Utc>) -> Result<Vec<Assignment>> {
        let all = self.provider.list().await?;
        Ok(upcoming(&all, now))
    }

    /// New assignments start pending and unsubmitted.
    pub async fn create(&self, mut assignment: Assignment) -> Result<Assignment> {
        assignment.submitted = false;
        assignment.status = AssignmentStatus::Pending;
        self.provider.insert(assignment).await
    }

    pub async fn update(&self, id: RecordId, assignment: Assignment) -> Result<Option<Assignment>> {
        self.provider.update(id, assignment).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn submit(&self, id: RecordId) -> Result<Option<Assignment>> {
        let Some(mut assignment) = self.provider.get(id).await? else {
            return Ok(None);
        };
        assignment.submitted = true;
        assignment.status = AssignmentStatus::Submitted;

        let submitted = self.provider.update(id, assignment).await?;
        if submitted.is_some() {
            info!("Assignment submitted");
        }
        Ok(submitted)
    }

    pub async fn delete(&self, id: RecordId) -> Result<Option<Assignment>> {
        self.provider.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryProvider;
    use chrono::Duration;
    use std::sync::Arc;

    fn service(now: DateTime<Utc>) -> AssignmentService {
        let mut list = vec![
            Assignment::new(1, "Essay draft", now + Duration::days(3)),
            Assignment::new(1, "Reading log", now - Duration::days(1)),
            Assignment::new(2, "Problem set", now + Duration::days(1)),
        ];
        for (i, a) in list.iter_mut().enumerate() {
            a.id = i as u32 + 1;
        }
        AssignmentService::new(Arc::new(MemoryProvider::new(list).unwrap()))
    }

    #[tokio::test]
    async fn test_upcoming_excludes_past_and_submitted() {
        let now = Utc::now();
        let svc = service(now);

        let titles: Vec<_> = svc.get_upcoming(now).await.unwrap().into_iter().map(|a| a.title).collect();
        assert_eq!(titles, vec!["Problem set", "Essay draft"]);

        svc.submit(3).await.unwrap();
        let titles: Vec<_> = svc.get_upcoming(now).await.unwrap().into_iter().map(|a| a.title).collect();
        assert_eq!(titles, vec!["Essay draft"]);
    }

    #[tokio::test]
    async fn test_submit_sets_status() {
        let svc = service(Utc::now());
        let submitted = svc.submit(1).await.unwrap().unwrap();
        assert!(submitted.submitted);
        assert_eq!(submitted.status, AssignmentStatus::Submitted);
        assert!(svc.submit(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_resets_submission() {
        let svc = service(Utc::now());
        let mut assignment = Assignment::new(2, "Project", Utc::now() + Duration::days(10));
        assignment.submitted = true;
        assignment.status = AssignmentStatus::Graded;

        let created = svc.create(assignment).await.unwrap();
        assert_eq!(created.id, 4);
        assert!(!created.submitted);
        assert_eq!(created.status, AssignmentStatus::Pending);
        assert_eq!(svc.get_by_course(2).await.unwrap().len(), 2);
    }
}
