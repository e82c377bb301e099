use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::StationId;

// =========================================================
// /status.json
// =========================================================

/// Path of the station status endpoint.
pub const STATUS_ENDPOINT: &str = "/status.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationState {
    On,
    Off,
}

/// Why a station is in its current state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusReason {
    /// Running a timed program; `remaining` counts down.
    Program,
    Master,
    RainDelay,
    RainSensed,
    SystemOff,
    #[default]
    #[serde(other)]
    Idle,
}

/// One station's live status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub station: StationId,
    pub status: StationState,
    #[serde(default)]
    pub reason: StatusReason,
    /// Seconds left of the current run.
    #[serde(default)]
    pub remaining: f64,
    #[serde(default, rename = "programName")]
    pub program_name: String,
}

impl StatusEntry {
    pub fn is_on(&self) -> bool {
        self.status == StationState::On
    }
}

/// Parse a `/status.json` response body.
pub fn parse_status_json(json: &str) -> Result<Vec<StatusEntry>> {
    serde_json::from_str(json).context("Failed to deserialize station status")
}
