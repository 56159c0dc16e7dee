use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::{Map, Value};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, warn};

use super::RecordProvider;
use crate::fetch::{HttpClient, json_request, send_json};
use crate::models::{Announcement, Assignment, AttendanceRecord, Course, Grade, Record, RecordId};

/// Key under which both sides store the record id.
const ID_FIELD: &str = "Id";

/// A record type the remote store knows about.
///
/// `FIELDS` maps local (camelCase) field names to the remote store's column
/// names. Fields not listed keep their name in both directions.
pub trait RemoteRecord: Record {
    const FIELDS: &'static [(&'static str, &'static str)];
}

impl RemoteRecord for Course {
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("name", "Name"),
        ("code", "code_c"),
        ("credits", "credits_c"),
        ("department", "department_c"),
        ("professor", "professor_c"),
        ("schedule", "schedule_c"),
        ("enrollmentStatus", "enrollment_status_c"),
    ];
}

impl RemoteRecord for Grade {
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("assignmentName", "Name"),
        ("courseId", "course_id_c"),
        ("score", "score_c"),
        ("maxScore", "max_score_c"),
        ("weight", "weight_c"),
        ("gradedDate", "graded_date_c"),
    ];
}

impl RemoteRecord for AttendanceRecord {
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("courseId", "course_id_c"),
        ("date", "date_c"),
        ("status", "status_c"),
        ("remarks", "remarks_c"),
    ];
}

impl RemoteRecord for Announcement {
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("title", "Name"),
        ("content", "content_c"),
        ("category", "category_c"),
        ("priority", "priority_c"),
        ("author", "author_c"),
        ("timestamp", "timestamp_c"),
        ("courseId", "course_id_c"),
    ];
}

impl RemoteRecord for Assignment {
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("title", "Name"),
        ("courseId", "course_id_c"),
        ("dueDate", "due_date_c"),
        ("submitted", "submitted_c"),
        ("status", "status_c"),
    ];
}

fn rename_keys(value: Value, rename: impl Fn(&str) -> Option<&'static str>) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| match rename(&k) {
                    Some(renamed) => (renamed.to_string(), v),
                    None => (k, v),
                })
                .collect::<Map<String, Value>>(),
        ),
        other => other,
    }
}

/// Serializes a record into the remote store's field names.
pub fn to_remote<T: RemoteRecord>(record: &T) -> Result<Value> {
    let local = serde_json::to_value(record)?;
    Ok(rename_keys(local, |k| {
        T::FIELDS.iter().find(|(l, _)| *l == k).map(|(_, r)| *r)
    }))
}

/// Decodes a remote row into a record. Unknown remote columns are ignored.
pub fn from_remote<T: RemoteRecord>(value: Value) -> Result<T> {
    let local = rename_keys(value, |k| {
        T::FIELDS.iter().find(|(_, r)| *r == k).map(|(l, _)| *l)
    });
    serde_json::from_value(local).with_context(|| format!("malformed {} record from remote store", T::TABLE))
}

/// Unwraps `{"data": ...}` envelopes; bare payloads pass through.
fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => map.remove("data").unwrap_or(Value::Null),
        other => other,
    }
}

/// [`RecordProvider`] backed by a generic JSON record API.
///
/// Tables live under `{base_url}/tables/{table}/records`, single rows under
/// `.../records/{id}`.
pub struct RemoteProvider<T> {
    client: Arc<dyn HttpClient>,
    base_url: String,
    _record: PhantomData<fn() -> T>,
}

impl<T: RemoteRecord> RemoteProvider<T> {
    pub fn new(client: Arc<dyn HttpClient>, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            _record: PhantomData,
        }
    }

    pub fn collection_url(&self) -> String {
        format!("{}/tables/{}/records", self.base_url, T::TABLE)
    }

    pub fn record_url(&self, id: RecordId) -> String {
        format!("{}/{}", self.collection_url(), id)
    }

    async fn call(&self, method: Method, url: &str, body: Option<&Value>) -> Result<Option<Value>> {
        let req = json_request(method, url, body)?;
        Ok(send_json(self.client.as_ref(), req).await?.map(unwrap_data))
    }

    /// Body for create/update calls; the id is owned by the store.
    fn payload(record: &T) -> Result<Value> {
        let mut body = to_remote(record)?;
        if let Value::Object(map) = &mut body {
            map.remove(ID_FIELD);
        }
        Ok(body)
    }
}

#[async_trait]
impl<T: RemoteRecord> RecordProvider<T> for RemoteProvider<T> {
    #[tracing::instrument(skip(self), fields(table = T::TABLE))]
    async fn list(&self) -> Result<Vec<T>> {
        let url = self.collection_url();
        let rows = match self.call(Method::GET, &url, None).await? {
            Some(Value::Array(rows)) => rows,
            Some(Value::Null) | None => Vec::new(),
            Some(other) => return Err(anyhow!("expected a JSON array from {url}, got {other}")),
        };

        debug!(count = rows.len(), "Remote records fetched");
        rows.into_iter().map(from_remote::<T>).collect()
    }

    #[tracing::instrument(skip(self), fields(table = T::TABLE))]
    async fn get(&self, id: RecordId) -> Result<Option<T>> {
        match self.call(Method::GET, &self.record_url(id), None).await? {
            Some(Value::Null) | None => Ok(None),
            Some(row) => from_remote(row).map(Some),
        }
    }

    #[tracing::instrument(skip(self, record), fields(table = T::TABLE))]
    async fn insert(&self, record: T) -> Result<T> {
        let body = Self::payload(&record)?;
        let created = self
            .call(Method::POST, &self.collection_url(), Some(&body))
            .await?
            .filter(|v| !v.is_null())
            .with_context(|| format!("remote store returned no record for new {} row", T::TABLE))?;
        from_remote(created)
    }

    #[tracing::instrument(skip(self, record), fields(table = T::TABLE))]
    async fn update(&self, id: RecordId, mut record: T) -> Result<Option<T>> {
        let body = Self::payload(&record)?;
        match self.call(Method::PUT, &self.record_url(id), Some(&body)).await? {
            None => Ok(None),
            Some(Value::Null) => {
                record.set_id(id);
                Ok(Some(record))
            }
            Some(row) => from_remote(row).map(Some),
        }
    }

    #[tracing::instrument(skip(self), fields(table = T::TABLE))]
    async fn delete(&self, id: RecordId) -> Result<Option<T>> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        if self.call(Method::DELETE, &self.record_url(id), None).await?.is_none() {
            warn!(id, "Record vanished before it could be deleted");
            return Ok(None);
        }
        Ok(Some(existing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::BasicClient;
    use crate::models::{AttendanceStatus, Priority};
    use chrono::{NaiveDate, TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_course_maps_to_remote_columns() {
        let mut course = Course::new("CS101", "Intro to Programming", 3).with_department("Computer Science");
        course.id = 4;

        let remote = to_remote(&course).unwrap();
        assert_eq!(remote["Id"], 4);
        assert_eq!(remote["Name"], "Intro to Programming");
        assert_eq!(remote["code_c"], "CS101");
        assert_eq!(remote["credits_c"], 3);
        assert_eq!(remote["enrollment_status_c"], "enrolled");
        assert!(remote.get("name").is_none());
    }

    #[test]
    fn test_grade_from_remote_row() {
        let row = json!({
            "Id": 11,
            "Name": "Final Exam",
            "course_id_c": 2,
            "score_c": 88,
            "max_score_c": 100,
            "weight_c": 0.4,
            "graded_date_c": "2024-05-01T09:30:00Z",
            "CreatedOn": "2024-05-01T09:31:00Z"
        });

        let grade: Grade = from_remote(row).unwrap();
        assert_eq!(grade.id, 11);
        assert_eq!(grade.assignment_name, "Final Exam");
        assert_eq!(grade.course_id, 2);
        assert_eq!(grade.weight, 0.4);
        assert_eq!(grade.graded_date, Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_mapping_reverses_for_every_record_type() {
        let now = Utc.with_ymd_and_hms(2024, 4, 2, 12, 0, 0).unwrap();

        let attendance = AttendanceRecord {
            id: 3,
            course_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
            status: AttendanceStatus::Absent,
            remarks: Some("Sick".into()),
        };
        let back: AttendanceRecord = from_remote(to_remote(&attendance).unwrap()).unwrap();
        assert_eq!(back, attendance);

        let announcement = Announcement {
            id: 8,
            title: "Welcome".into(),
            content: "Semester starts".into(),
            category: "general".into(),
            priority: Priority::Medium,
            author: "Dean".into(),
            timestamp: now,
            course_id: None,
        };
        let back: Announcement = from_remote(to_remote(&announcement).unwrap()).unwrap();
        assert_eq!(back, announcement);

        let assignment = Assignment::new(2, "Problem Set 3", now);
        let back: Assignment = from_remote(to_remote(&assignment).unwrap()).unwrap();
        assert_eq!(back, assignment);

        let mut grade = Grade::new(1, "Quiz", 9.0, 10.0, 0.05);
        grade.graded_date = now;
        let back: Grade = from_remote(to_remote(&grade).unwrap()).unwrap();
        assert_eq!(back, grade);
    }

    #[test]
    fn test_malformed_remote_row() {
        let result: Result<Course> = from_remote(json!({ "Id": 1, "Name": "Missing fields" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_unwrap_data_envelope() {
        assert_eq!(unwrap_data(json!({ "data": [1, 2] })), json!([1, 2]));
        assert_eq!(unwrap_data(json!([1, 2])), json!([1, 2]));
        assert_eq!(unwrap_data(json!({ "Id": 1 })), json!({ "Id": 1 }));
    }

    #[test]
    fn test_urls_and_payload() {
        let client: Arc<dyn HttpClient> = Arc::new(BasicClient::new().unwrap());
        let provider = RemoteProvider::<Grade>::new(client, "https://records.example.edu/api/");

        assert_eq!(provider.collection_url(), "https://records.example.edu/api/tables/grades/records");
        assert_eq!(provider.record_url(7), "https://records.example.edu/api/tables/grades/records/7");

        let mut grade = Grade::new(1, "Quiz", 9.0, 10.0, 0.05);
        grade.id = 7;
        let payload = RemoteProvider::<Grade>::payload(&grade).unwrap();
        assert!(payload.get("Id").is_none());
        assert_eq!(payload["Name"], "Quiz");
    }
}
