//! Portal configuration.
//!
//! Values come from the process environment (after `.env` is loaded by the
//! binary). Command-line flags may override individual fields afterwards.
//!
//! | Variable                  | Default              |
//! |---------------------------|----------------------|
//! | `PORTAL_BACKEND`          | `fixtures`           |
//! | `PORTAL_FIXTURES_DIR`     | `fixtures`           |
//! | `RECORD_API_URL`          | unset                |
//! | `RECORD_API_KEY`          | unset                |
//! | `PORTAL_SIMULATE_LATENCY` | `true`               |
//! | `PORTAL_LATENCY_MIN_MS`   | `200`                |
//! | `PORTAL_LATENCY_MAX_MS`   | `500`                |
//! | `PORTAL_DEFAULT_CREDITS`  | `3`                  |

use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::aggregators::DEFAULT_CREDITS;
use crate::store::Latency;

/// Where records are read from and written to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum BackendKind {
    /// In-memory store seeded from JSON fixture files.
    #[default]
    Fixtures,
    /// Generic remote record API.
    Remote,
}

impl FromStr for BackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixtures" | "fixture" | "local" | "memory" => Ok(BackendKind::Fixtures),
            "remote" => Ok(BackendKind::Remote),
            other => bail!("unknown backend '{other}', expected 'fixtures' or 'remote'"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub backend: BackendKind,
    pub fixtures_dir: PathBuf,
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    /// `None` disables the simulated network delay.
    pub latency: Option<Latency>,
    /// Credits assumed for courses the registry cannot resolve.
    pub default_credits: u32,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Fixtures,
            fixtures_dir: PathBuf::from("fixtures"),
            api_url: None,
            api_key: None,
            latency: Some(Latency::default()),
            default_credits: DEFAULT_CREDITS,
        }
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.trim().parse::<T>().with_context(|| format!("invalid value for {key}: '{v}'")))
        .transpose()
}

impl PortalConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(backend) = lookup("PORTAL_BACKEND").filter(|v| !v.trim().is_empty()) {
            config.backend = backend.parse()?;
        }
        if let Some(dir) = lookup("PORTAL_FIXTURES_DIR").filter(|v| !v.trim().is_empty()) {
            config.fixtures_dir = PathBuf::from(dir);
        }
        config.api_url = lookup("RECORD_API_URL").filter(|v| !v.trim().is_empty());
        config.api_key = lookup("RECORD_API_KEY").filter(|v| !v.trim().is_empty());

        if let Some(credits) = parse_var::<u32>(&lookup, "PORTAL_DEFAULT_CREDITS")? {
            config.default_credits = credits;
        }

        let simulate = parse_var::<bool>(&lookup, "PORTAL_SIMULATE_LATENCY")?.unwrap_or(true);
        config.latency = if simulate {
            let defaults = Latency::default();
            let min = parse_var::<u64>(&lookup, "PORTAL_LATENCY_MIN_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.min);
            let max = parse_var::<u64>(&lookup, "PORTAL_LATENCY_MAX_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.max);
            if min > max {
                bail!("PORTAL_LATENCY_MIN_MS ({min:?}) exceeds PORTAL_LATENCY_MAX_MS ({max:?})");
            }
            Some(Latency { min, max })
        } else {
            None
        };

        Ok(config)
    }
}
