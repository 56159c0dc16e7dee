use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::Rng;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

use super::RecordProvider;
use crate::models::{Record, RecordId};

/// Artificial delay applied before every provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub min: Duration,
    pub max: Duration,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(200),
            max: Duration::from_millis(500),
        }
    }
}

impl Latency {
    /// Uniformly random delay in `[min, max]`.
    pub fn sample(&self) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..=self.max)
    }

    async fn wait(&self) {
        let delay = self.sample();
        tokio::time::sleep(delay).await;
    }
}

fn following_id(id: RecordId) -> Result<RecordId> {
    id.checked_add(1)
        .with_context(|| format!("record id space exhausted after id {id}"))
}

struct State<T> {
    records: BTreeMap<RecordId, T>,
    next_id: RecordId,
}

/// In-process record store.
///
/// The id counter starts at max(seeded ids)+1 and only moves forward, so ids
/// of deleted records are never handed out again.
pub struct MemoryProvider<T> {
    state: RwLock<State<T>>,
    latency: Option<Latency>,
}

impl<T: Record> MemoryProvider<T> {
    /// Seeds the store. Records without an id (id 0) get one assigned.
    ///
    /// Fails when the seed leaves no id to hand out next.
    pub fn new(records: Vec<T>) -> Result<Self> {
        let max_id = records.iter().map(|r| r.id()).max().unwrap_or(0);
        let mut next_id = following_id(max_id)?;
        let mut map = BTreeMap::new();

        for mut record in records {
            if record.id() == 0 {
                record.set_id(next_id);
                next_id = following_id(next_id)?;
            }
            map.insert(record.id(), record);
        }

        Ok(Self {
            state: RwLock::new(State { records: map, next_id }),
            latency: None,
        })
    }

    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = Some(latency);
        self
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = &self.latency {
            latency.wait().await;
        }
    }
}

#[async_trait]
impl<T: Record> RecordProvider<T> for MemoryProvider<T> {
    async fn list(&self) -> Result<Vec<T>> {
        self.simulate_latency().await;
        let state = self.state.read().await;
        Ok(state.records.values().cloned().collect())
    }

    async fn get(&self, id: RecordId) -> Result<Option<T>> {
        self.simulate_latency().await;
        let state = self.state.read().await;
        Ok(state.records.get(&id).cloned())
    }

    async fn insert(&self, mut record: T) -> Result<T> {
        self.simulate_latency().await;
        let mut state = self.state.write().await;

        let id = state.next_id;
        state.next_id = following_id(id)?;
        record.set_id(id);
        state.records.insert(id, record.clone());

        debug!(table = T::TABLE, id, "Record inserted");
        Ok(record)
    }

    async fn update(&self, id: RecordId, mut record: T) -> Result<Option<T>> {
        self.simulate_latency().await;
        let mut state = self.state.write().await;

        let Some(slot) = state.records.get_mut(&id) else {
            return Ok(None);
        };
        record.set_id(id);
        *slot = record.clone();

        debug!(table = T::TABLE, id, "Record updated");
        Ok(Some(record))
    }

    async fn delete(&self, id: RecordId) -> Result<Option<T>> {
        self.simulate_latency().await;
        let mut state = self.state.write().await;
        let removed = state.records.remove(&id);
        if removed.is_some() {
            debug!(table = T::TABLE, id, "Record deleted");
        }
        Ok(removed)
    }
}
