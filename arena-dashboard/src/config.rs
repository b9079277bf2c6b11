//! Dashboard configuration

use anyhow::{Context, Result};
use session_core::{Schedule, SessionHours};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_DECISION_SLOTS: &str = "ARENA_DECISION_SLOTS";
pub const ENV_POLL_MS: &str = "ARENA_POLL_MS";
pub const ENV_SUMMARY_SECS: &str = "ARENA_SUMMARY_SECS";
pub const ENV_FIXTURES: &str = "ARENA_FIXTURES";
pub const ENV_MAX_RUNTIME_SECS: &str = "ARENA_MAX_RUNTIME_SECS";

/// Dashboard configuration
#[derive(Clone, Debug)]
pub struct DashboardConfig {
    pub schedule: Schedule,
    pub session_hours: SessionHours,
    pub poll_interval: Duration,
    pub summary_interval: Duration,
    pub fixtures_path: Option<PathBuf>,
    pub max_runtime: Option<Duration>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            schedule: Schedule::default(),
            session_hours: SessionHours::default(),
            poll_interval: Duration::from_millis(1000),
            summary_interval: Duration::from_secs(60),
            fixtures_path: None,
            max_runtime: None,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns. Blank values count
    /// as unset; malformed values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(slots) = get(ENV_DECISION_SLOTS) {
            config.schedule = slots.parse().with_context(|| {
                format!("{} is not a valid slot list: {:?}", ENV_DECISION_SLOTS, slots)
            })?;
        }

        if let Some(ms) = get(ENV_POLL_MS) {
            config.poll_interval = Duration::from_millis(parse_positive(ENV_POLL_MS, &ms)?);
        }

        if let Some(secs) = get(ENV_SUMMARY_SECS) {
            config.summary_interval = Duration::from_secs(parse_positive(ENV_SUMMARY_SECS, &secs)?);
        }

        config.fixtures_path = get(ENV_FIXTURES).map(PathBuf::from);

        if let Some(secs) = get(ENV_MAX_RUNTIME_SECS) {
            let secs = parse_positive(ENV_MAX_RUNTIME_SECS, &secs)?;
            config.max_runtime = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

fn parse_positive<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr + PartialOrd + Default,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value: T = raw
        .trim()
        .parse()
        .with_context(|| format!("{} must be a positive integer, got {:?}", key, raw))?;
    if value <= T::default() {
        anyhow::bail!("{} must be greater than zero, got {:?}", key, raw);
    }
    Ok(value)
}
