//! Registry configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use ballot_utils::LogFormat;

use crate::duration::DurationSelector;
use crate::RegistryError;

/// Configuration for a poll registry.
///
/// Can be loaded from a TOML file via [`RegistryConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Seconds behind each duration selector.
    #[serde(default)]
    pub durations: DurationTable,
}

/// Maps each [`DurationSelector`] to a voting-window length in seconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationTable {
    #[serde(default = "default_short")]
    pub short: u64,
    #[serde(default = "default_medium")]
    pub medium: u64,
    #[serde(default = "default_day")]
    pub day: u64,
    #[serde(default = "default_week")]
    pub week: u64,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_short() -> u64 {
    5 * 60
}

fn default_medium() -> u64 {
    30 * 60
}

fn default_day() -> u64 {
    24 * 60 * 60
}

fn default_week() -> u64 {
    7 * 24 * 60 * 60
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl DurationTable {
    /// Window length in seconds for `selector`.
    pub fn secs(&self, selector: DurationSelector) -> u64 {
        match selector {
            DurationSelector::Short => self.short,
            DurationSelector::Medium => self.medium,
            DurationSelector::Day => self.day,
            DurationSelector::Week => self.week,
        }
    }
}

impl Default for DurationTable {
    fn default() -> Self {
        Self {
            short: default_short(),
            medium: default_medium(),
            day: default_day(),
            week: default_week(),
        }
    }
}

impl RegistryConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| RegistryError::Config(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, RegistryError> {
        let config: Self = toml::from_str(s).map_err(|e| RegistryError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, RegistryError> {
        toml::to_string_pretty(self).map_err(|e| RegistryError::Config(e.to_string()))
    }

    /// Every selector must map to a non-empty window.
    pub fn validate(&self) -> Result<(), RegistryError> {
        for selector in DurationSelector::ALL {
            if self.durations.secs(selector) == 0 {
                return Err(RegistryError::Config(format!(
                    "duration for selector '{selector}' must be greater than zero"
                )));
            }
        }
        Ok(())
    }

    /// Install the global tracing subscriber described by this config.
    ///
    /// Returns `false` when a subscriber was already installed.
    pub fn try_init_logging(&self) -> bool {
        ballot_utils::try_init_logging(self.log_format, &self.log_level).is_ok()
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            durations: DurationTable::default(),
        }
    }
}
