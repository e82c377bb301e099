//! Station status display and the shared status board.
//!
//! The board keeps the latest `/status.json` snapshot behind a lock so the
//! poller can publish while the page renders from it.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::models::{StationId, StationRow};
use crate::routes::{StationState, StatusEntry, StatusReason};
use crate::services::clock::format_duration;

/// Text and CSS classes of a station's status cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDisplay {
    pub text: String,
    pub classes: Vec<String>,
}

impl StatusDisplay {
    pub fn class_attr(&self) -> String {
        self.classes.join(" ")
    }
}

fn state_name(state: StationState) -> &'static str {
    match state {
        StationState::On => "on",
        StationState::Off => "off",
    }
}

/// Status cell contents for one entry.
pub fn status_display(entry: &StatusEntry) -> StatusDisplay {
    let state = state_name(entry.status);
    let mut classes = vec!["stationStatus".to_string(), format!("station_{}", state)];

    let text = match entry.reason {
        StatusReason::Program if entry.is_on() => format_duration(entry.remaining),
        StatusReason::Master => {
            classes.push("master".to_string());
            if entry.is_on() {
                "Master On".to_string()
            } else {
                classes.push("strike".to_string());
                "Master Off".to_string()
            }
        }
        StatusReason::RainDelay => "Rain Delay".to_string(),
        StatusReason::RainSensed => "Rain Sensor".to_string(),
        StatusReason::SystemOff => "Disabled".to_string(),
        StatusReason::Program | StatusReason::Idle => state.to_string(),
    };

    StatusDisplay { text, classes }
}

/// Fast and slow status poll periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollCadence {
    pub initial_delay: Duration,
    /// Used while any station runs a timed program.
    pub fast: Duration,
    pub slow: Duration,
}

impl Default for PollCadence {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            fast: Duration::from_secs(1),
            slow: Duration::from_secs(30),
        }
    }
}

impl PollCadence {
    /// Period until the next poll after receiving `entries`.
    pub fn next_period(&self, entries: &[StatusEntry]) -> Duration {
        if entries
            .iter()
            .any(|entry| entry.reason == StatusReason::Program)
        {
            self.fast
        } else {
            self.slow
        }
    }
}

#[derive(Debug, Default)]
struct BoardState {
    entries: Vec<StatusEntry>,
    updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Latest station status snapshot, shared between the poller and readers.
#[derive(Clone, Default)]
pub struct StatusBoard {
    state: Arc<RwLock<BoardState>>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot.
    pub fn publish(&self, entries: Vec<StatusEntry>) {
        let mut state = self.state.write();
        state.entries = entries;
        state.updated_at = Some(chrono::Utc::now());
    }

    pub fn entries(&self) -> Vec<StatusEntry> {
        self.state.read().entries.clone()
    }

    pub fn updated_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.state.read().updated_at
    }

    /// Stations currently watering.
    pub fn stations_on(&self) -> HashSet<StationId> {
        self.state
            .read()
            .entries
            .iter()
            .filter(|entry| entry.is_on())
            .map(|entry| entry.station)
            .collect()
    }

    /// Status cell per station.
    pub fn displays(&self) -> HashMap<StationId, StatusDisplay> {
        self.state
            .read()
            .entries
            .iter()
            .map(|entry| (entry.station, status_display(entry)))
            .collect()
    }

    /// Grid rows for `stations`, flagged on from the current snapshot.
    pub fn rows(&self, stations: &[StationId]) -> Vec<StationRow> {
        let on = self.stations_on();
        stations
            .iter()
            .map(|id| StationRow::new(*id, on.contains(id)))
            .collect()
    }
}
