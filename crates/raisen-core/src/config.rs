//! Configuration loading
//!
//! Configuration lives in `<config dir>/raisen/config.toml`
//! (`~/.config/raisen/config.toml` on Linux). Every key is optional.
//!
//! ```toml
//! [dashboard]
//! data_dir = "/srv/raisen/snapshot"
//! activity_limit = 8
//! organization_id = "org-1"
//!
//! [analytics]
//! seed = 42
//! growth_days = 30
//! top_posts = 5
//! utc_offset_minutes = 60
//!
//! [logging]
//! level = "info"
//! ```

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::analytics::DEFAULT_ACTIVITY_LIMIT;
use crate::error::CoreError;

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub analytics: AnalyticsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Snapshot directory; falls back to [`Config::default_data_dir`]
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Recent activity feed length
    #[serde(default = "default_activity_limit")]
    pub activity_limit: usize,

    /// Restrict every view to one tenant
    #[serde(default)]
    pub organization_id: Option<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            activity_limit: default_activity_limit(),
            organization_id: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Seed for simulated series
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Length of the growth curve in days
    #[serde(default = "default_growth_days")]
    pub growth_days: u32,

    /// Size of the top posts leaderboard
    #[serde(default = "default_top_posts")]
    pub top_posts: usize,

    /// Offset used to bucket timestamps into local days and hours
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            growth_days: default_growth_days(),
            top_posts: default_top_posts(),
            utc_offset_minutes: 0,
        }
    }
}

impl AnalyticsConfig {
    /// Timezone for day/hour bucketing; out-of-range offsets fall back to UTC
    pub fn timezone(&self) -> FixedOffset {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| {
                tracing::warn!(
                    offset = self.utc_offset_minutes,
                    "Invalid utc_offset_minutes, using UTC"
                );
                Utc.fix()
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_activity_limit() -> usize {
    DEFAULT_ACTIVITY_LIMIT
}

fn default_seed() -> u64 {
    42
}

fn default_growth_days() -> u32 {
    30
}

fn default_top_posts() -> usize {
    5
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load configuration from the default path, defaults when absent
    pub fn load() -> Result<Self, CoreError> {
        let Some(config_path) = Self::config_path() else {
            return Ok(Config::default());
        };

        if !config_path.exists() {
            tracing::info!(path = %config_path.display(), "No config file found, using defaults");
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content).map_err(|e| CoreError::InvalidConfig {
            message: format!("{}: {}", path.display(), e),
        })
    }

    /// Parse TOML content
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// `<config dir>/raisen/config.toml`
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("raisen").join("config.toml"))
    }

    /// `<data dir>/raisen/snapshot`
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("raisen")
            .join("snapshot")
    }

    /// Configured snapshot directory or the default one
    pub fn data_dir(&self) -> PathBuf {
        self.dashboard
            .data_dir
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }
}
