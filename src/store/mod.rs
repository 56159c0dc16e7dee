//! Record storage behind a single provider contract.
//!
//! [`RecordProvider`] is the async CRUD trait every service talks to.
//! [`MemoryProvider`] keeps records in process, seeded from JSON fixtures.
//! [`RemoteProvider`] talks to a generic JSON record API.
//! [`Backend`] picks one of them from configuration.

mod fixtures;
mod memory;
mod remote;

pub use fixtures::load_fixture;
pub use memory::{Latency, MemoryProvider};
pub use remote::{RemoteProvider, RemoteRecord, from_remote, to_remote};

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::config::{BackendKind, PortalConfig};
use crate::fetch::{ApiKey, BasicClient, HttpClient};
use crate::models::{Record, RecordId};

/// Async CRUD over one record collection.
#[async_trait::async_trait]
pub trait RecordProvider<T: Record>: Send + Sync {
    async fn list(&self) -> Result<Vec<T>>;

    async fn get(&self, id: RecordId) -> Result<Option<T>>;

    /// Stores `record` under a freshly assigned id and returns it.
    async fn insert(&self, record: T) -> Result<T>;

    /// Replaces the record stored under `id`, keeping that id.
    /// Returns `None` when no such record exists.
    async fn update(&self, id: RecordId, record: T) -> Result<Option<T>>;

    /// Removes and returns the record, or `None` if it was not there.
    async fn delete(&self, id: RecordId) -> Result<Option<T>>;
}

pub type SharedProvider<T> = Arc<dyn RecordProvider<T>>;

/// A configured storage backend that hands out providers per record type.
pub enum Backend {
    Fixtures {
        dir: PathBuf,
        latency: Option<Latency>,
    },
    Remote {
        base_url: String,
        client: Arc<dyn HttpClient>,
    },
}

impl Backend {
    pub fn from_config(config: &PortalConfig) -> Result<Self> {
        match config.backend {
            BackendKind::Fixtures => {
                info!(dir = %config.fixtures_dir.display(), latency = config.latency.is_some(), "Using fixture backend");
                Ok(Backend::Fixtures {
                    dir: config.fixtures_dir.clone(),
                    latency: config.latency,
                })
            }
            BackendKind::Remote => {
                let base_url = config
                    .api_url
                    .clone()
                    .context("RECORD_API_URL must be set for the remote backend")?;
                let basic = BasicClient::new()?;
                let client: Arc<dyn HttpClient> = match config.api_key.as_deref() {
                    Some(key) => Arc::new(ApiKey::bearer(basic, key)?),
                    None => Arc::new(basic),
                };
                info!(base_url = %base_url, authenticated = config.api_key.is_some(), "Using remote record backend");
                Ok(Backend::Remote { base_url, client })
            }
        }
    }

    pub fn provider<T: RemoteRecord>(&self) -> Result<SharedProvider<T>> {
        match self {
            Backend::Fixtures { dir, latency } => {
                let records = load_fixture::<T>(dir)?;
                let provider = MemoryProvider::new(records)
                    .with_context(|| format!("failed to seed {} from {}", T::TABLE, dir.display()))?;
                Ok(Arc::new(match latency {
                    Some(latency) => provider.with_latency(*latency),
                    None => provider,
                }))
            }
            Backend::Remote { base_url, client } => {
                Ok(Arc::new(RemoteProvider::<T>::new(client.clone(), base_url)))
            }
        }
    }
}
