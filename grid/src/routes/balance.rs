use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// =========================================================
// /balance.json
// =========================================================

/// Path of the water balance endpoint.
pub const BALANCE_ENDPOINT: &str = "/balance.json";

/// Irrigation contributed by one program on a day, in millimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationRecord {
    pub program_name: String,
    pub irrigation: f64,
}

/// One day of a station's water balance, in millimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceRecord {
    pub total: f64,
    pub eto: f64,
    pub rain: f64,
    #[serde(default)]
    pub intervals: Vec<IrrigationRecord>,
}

/// A station's balance history keyed by Unix timestamp (seconds, as text).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationBalance {
    pub station: String,
    #[serde(default)]
    pub balances: BTreeMap<String, BalanceRecord>,
}

/// Parse a `/balance.json` response body.
pub fn parse_balance_json(json: &str) -> Result<Vec<StationBalance>> {
    serde_json::from_str(json).context("Failed to deserialize water balance series")
}
