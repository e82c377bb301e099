//! Configuration file support.
//!
//! Display and polling settings are read from a TOML file. Every field has a
//! default, so an empty file (or no file at all) yields the stock behaviour.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ErrorContext, GridError, GridResult};
use crate::services::{device_time, ClockFace, PollCadence, TimeFormat};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "IRRIGATION_GRID_CONFIG";

/// File name searched for when no explicit path is given.
pub const CONFIG_FILE_NAME: &str = "irrigation-grid.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub polling: PollingSettings,
}

/// How times are shown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default)]
    pub time_format: TimeFormat,
    /// Seconds the device clock is ahead of the browser clock.
    #[serde(default)]
    pub device_offset_secs: i64,
}

/// Poll and refresh periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollingSettings {
    #[serde(default = "default_status_initial_delay_ms")]
    pub status_initial_delay_ms: u64,
    #[serde(default = "default_status_fast_ms")]
    pub status_fast_ms: u64,
    #[serde(default = "default_status_slow_ms")]
    pub status_slow_ms: u64,
    #[serde(default = "default_schedule_refresh_secs")]
    pub schedule_refresh_secs: u64,
}

fn default_status_initial_delay_ms() -> u64 {
    1000
}

fn default_status_fast_ms() -> u64 {
    1000
}

fn default_status_slow_ms() -> u64 {
    30_000
}

fn default_schedule_refresh_secs() -> u64 {
    60
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            status_initial_delay_ms: default_status_initial_delay_ms(),
            status_fast_ms: default_status_fast_ms(),
            status_slow_ms: default_status_slow_ms(),
            schedule_refresh_secs: default_schedule_refresh_secs(),
        }
    }
}

impl GridConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> GridResult<Self> {
        let config: GridConfig = toml::from_str(content).map_err(|e| {
            GridError::configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> GridResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            GridError::configuration_with_context(
                format!("Failed to read config file: {}", e),
                ErrorContext::new("from_file").with_input(path.display()),
            )
        })?;
        let config = Self::from_toml_str(&content)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Uses the file named by `IRRIGATION_GRID_CONFIG` when set, otherwise
    /// searches the current directory (see [`GridConfig::from_directory`]).
    pub fn from_default_location() -> GridResult<Self> {
        Self::from_directory(Path::new("."))
    }

    /// Load configuration relative to `dir`.
    ///
    /// Searches for `irrigation-grid.toml` in:
    /// 1. The file named by `IRRIGATION_GRID_CONFIG`, which must exist
    /// 2. `dir/irrigation-grid.toml`
    /// 3. `dir/config/irrigation-grid.toml`
    ///
    /// Falls back to the defaults when no file is found.
    pub fn from_directory(dir: &Path) -> GridResult<Self> {
        if let Ok(explicit) = std::env::var(CONFIG_ENV_VAR) {
            if !explicit.trim().is_empty() {
                return Self::from_file(explicit.trim());
            }
        }

        match search_paths(dir).iter().find(|path| path.exists()) {
            Some(path) => Self::from_file(path),
            None => {
                log::info!(
                    "No {} found under {}, using defaults",
                    CONFIG_FILE_NAME,
                    dir.display()
                );
                Ok(Self::default())
            }
        }
    }

    fn validate(&self) -> GridResult<()> {
        let polling = &self.polling;
        let periods = [
            ("status_fast_ms", polling.status_fast_ms),
            ("status_slow_ms", polling.status_slow_ms),
            ("schedule_refresh_secs", polling.schedule_refresh_secs),
        ];
        for (name, value) in periods {
            if value == 0 {
                return Err(GridError::configuration_with_context(
                    format!("'polling.{}' must be greater than zero", name),
                    ErrorContext::new("validate").with_input(value),
                ));
            }
        }
        Ok(())
    }

    /// Device time for the browser's `local` time.
    pub fn device_now(&self, local: NaiveDateTime) -> NaiveDateTime {
        device_time(local, self.display.device_offset_secs)
    }

    /// Header clock at the browser's `local` time, in the configured format.
    pub fn clock_face(&self, local: NaiveDateTime) -> ClockFace {
        ClockFace::at(self.device_now(local), self.display.time_format)
    }

    /// Status poll periods.
    pub fn cadence(&self) -> PollCadence {
        PollCadence {
            initial_delay: Duration::from_millis(self.polling.status_initial_delay_ms),
            fast: Duration::from_millis(self.polling.status_fast_ms),
            slow: Duration::from_millis(self.polling.status_slow_ms),
        }
    }

    pub fn schedule_refresh(&self) -> Duration {
        Duration::from_secs(self.polling.schedule_refresh_secs)
    }
}

/// Paths searched below `dir`, in order.
pub fn search_paths(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join(CONFIG_FILE_NAME),
        dir.join("config").join(CONFIG_FILE_NAME),
    ]
}
