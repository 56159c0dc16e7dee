use anyhow::Result;
use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::aggregators::{AttendanceSummary, aggregate, per_course_aggregate};
use crate::filters::attendance::within_dates;
use crate::models::{AttendanceRecord, RecordId};
use crate::store::SharedProvider;

pub struct AttendanceService {
    provider: SharedProvider<AttendanceRecord>,
}

impl AttendanceService {
    pub fn new(provider: SharedProvider<AttendanceRecord>) -> Self {
        Self { provider }
    }

    pub async fn get_all(&self) -> Result<Vec<AttendanceRecord>> {
        self.provider.list().await
    }

    pub async fn get_by_id(&self, id: RecordId) -> Result<Option<AttendanceRecord>> {
        self.provider.get(id).await
    }

    pub async fn get_by_course(&self, course_id: RecordId) -> Result<Vec<AttendanceRecord>> {
        let records = self.provider.list().await?;
        Ok(records.into_iter().filter(|r| r.course_id == course_id).collect())
    }

    pub async fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        course: Option<RecordId>,
    ) -> Result<Vec<AttendanceRecord>> {
        let records = self.provider.list().await?;
        Ok(within_dates(&records, start, end, course))
    }

    /// Overall tallies, optionally restricted to one course.
    pub async fn stats(&self, course: Option<RecordId>) -> Result<AttendanceSummary> {
        let records = self.provider.list().await?;
        Ok(aggregate(
            records.iter().filter(|r| course.is_none_or(|id| r.course_id == id)),
        ))
    }

    pub async fn course_stats(&self) -> Result<BTreeMap<RecordId, AttendanceSummary>> {
        let records = self.provider.list().await?;
        Ok(per_course_aggregate(&records))
    }

    pub async fn create(&self, record: AttendanceRecord) -> Result<AttendanceRecord> {
        self.provider.insert(record).await
    }

    pub async fn update(&self, id: RecordId, record: AttendanceRecord) -> Result<Option<AttendanceRecord>> {
        self.provider.update(id, record).await
    }

    pub async fn delete(&self, id: RecordId) -> Result<Option<AttendanceRecord>> {
        self.provider.delete(id).await
    }
}
