use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

use crate::models::Record;

/// Loads `<dir>/<table>.json`, a JSON array of records.
///
/// A missing file yields an empty collection; a malformed one is an error.
pub fn load_fixture<T: Record>(dir: &Path) -> Result<Vec<T>> {
    let path = dir.join(format!("{}.json", T::TABLE));
    if !path.exists() {
        warn!(path = %path.display(), "Fixture file not found, starting empty");
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture {}", path.display()))?;
    let records: Vec<T> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse fixture {}", path.display()))?;

    info!(table = T::TABLE, count = records.len(), "Fixture loaded");
    Ok(records)
}
