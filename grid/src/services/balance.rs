//! Water balance chart data.
//!
//! Each station's `/balance.json` history becomes a [`BalanceSeries`]: points
//! ordered by time, each with the breakdown shown in its hover tooltip.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{ErrorContext, GridError, GridResult};
use crate::routes::{BalanceRecord, StationBalance};
use crate::services::clock::xs_date;

/// One line of a balance tooltip. Values are millimeters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BreakdownRow {
    /// Balance carried over from the previous point.
    Previous(f64),
    /// Evapotranspiration, subtracted.
    Eto(f64),
    /// Rainfall, added.
    Rain(f64),
    /// Water given by one program, added.
    Irrigation { program_name: String, amount: f64 },
    Total(f64),
}

impl BreakdownRow {
    pub fn reason(&self) -> &str {
        match self {
            BreakdownRow::Previous(_) => "Previous",
            BreakdownRow::Eto(_) => "ETo",
            BreakdownRow::Rain(_) => "Rain",
            BreakdownRow::Irrigation { program_name, .. } => program_name.as_str(),
            BreakdownRow::Total(_) => "Total",
        }
    }

    /// Signed value text with one decimal.
    pub fn value_text(&self) -> String {
        match self {
            BreakdownRow::Previous(v) | BreakdownRow::Total(v) => format!("{:.1}", v),
            BreakdownRow::Eto(v) => format!("-{:.1}", v),
            BreakdownRow::Rain(v) => format!("+{:.1}", v),
            BreakdownRow::Irrigation { amount, .. } => format!("+{:.1}", amount),
        }
    }
}

impl fmt::Display for BreakdownRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.reason(), self.value_text())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalancePoint {
    pub timestamp: DateTime<Utc>,
    pub total: f64,
    pub breakdown: Vec<BreakdownRow>,
}

/// Chart series of one station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceSeries {
    pub station: String,
    pub points: Vec<BalancePoint>,
}

fn parse_timestamp(raw: &str, station: &str) -> GridResult<DateTime<Utc>> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or_else(|| {
            GridError::parse_with_context(
                format!("invalid balance timestamp for station '{}'", station),
                ErrorContext::new("balance_series").with_input(raw),
            )
        })
}

fn breakdown(record: &BalanceRecord, previous: Option<f64>) -> Vec<BreakdownRow> {
    let mut rows = Vec::with_capacity(record.intervals.len() + 4);
    if let Some(total) = previous {
        rows.push(BreakdownRow::Previous(total));
    }
    rows.push(BreakdownRow::Eto(record.eto));
    rows.push(BreakdownRow::Rain(record.rain));
    rows.extend(record.intervals.iter().map(|interval| BreakdownRow::Irrigation {
        program_name: interval.program_name.clone(),
        amount: interval.irrigation,
    }));
    rows.push(BreakdownRow::Total(record.total));
    rows
}

impl BalanceSeries {
    /// Build a series from a station's raw history, ordering points by time.
    pub fn from_station(balance: &StationBalance) -> GridResult<Self> {
        let mut records = balance
            .balances
            .iter()
            .map(|(raw, record)| -> GridResult<_> {
                Ok((parse_timestamp(raw, &balance.station)?, record))
            })
            .collect::<GridResult<Vec<_>>>()?;
        // Keys are text, so "900" sorts after "1000" until parsed.
        records.sort_by_key(|(timestamp, _)| *timestamp);

        let mut previous = None;
        let points = records
            .into_iter()
            .map(|(timestamp, record)| {
                let point = BalancePoint {
                    timestamp,
                    total: record.total,
                    breakdown: breakdown(record, previous),
                };
                previous = Some(record.total);
                point
            })
            .collect();

        Ok(Self {
            station: balance.station.clone(),
            points,
        })
    }

    /// Tooltip header of `point`, `"Front lawn @ 2024-06-15"`.
    pub fn tooltip_header(&self, point: &BalancePoint) -> String {
        format!("{} @ {}", self.station, xs_date(point.timestamp.date_naive()))
    }
}

/// A series as plotted: its color stays tied to its position in the feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlottedSeries<'a> {
    pub color: usize,
    pub series: &'a BalanceSeries,
}

/// All stations' series plus which of them are shown.
#[derive(Debug, Clone, Default)]
pub struct BalanceChart {
    series: Vec<BalanceSeries>,
    visible: Vec<bool>,
}

impl BalanceChart {
    /// Build the chart from a `/balance.json` payload; every series starts
    /// visible.
    pub fn from_feed(stations: &[StationBalance]) -> GridResult<Self> {
        let series = stations
            .iter()
            .map(BalanceSeries::from_station)
            .collect::<GridResult<Vec<_>>>()?;
        let visible = vec![true; series.len()];
        Ok(Self { series, visible })
    }

    /// Swap in fresh data, keeping the visibility of series already known.
    pub fn refresh(&mut self, stations: &[StationBalance]) -> GridResult<()> {
        let fresh = Self::from_feed(stations)?;
        let mut visible = fresh.visible;
        for (slot, old) in visible.iter_mut().zip(&self.visible) {
            *slot = *old;
        }
        self.series = fresh.series;
        self.visible = visible;
        Ok(())
    }

    pub fn series(&self) -> &[BalanceSeries] {
        &self.series
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    /// Show or hide series `index`. Returns the new visibility, or `None`
    /// when there is no such series.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let slot = self.visible.get_mut(index)?;
        *slot = !*slot;
        log::debug!("Balance series {} visible: {}", index, *slot);
        Some(*slot)
    }

    pub fn visible_series(&self) -> Vec<PlottedSeries<'_>> {
        self.series
            .iter()
            .zip(&self.visible)
            .enumerate()
            .filter(|(_, (_, shown))| **shown)
            .map(|(color, (series, _))| PlottedSeries { color, series })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::parse_balance_json;

    const FEED: &str = r#"[
        {"station": "Front lawn", "balances": {
            "1718582400": {"total": 1.2, "eto": 3.0, "rain": 0.0,
                           "intervals": [{"program_name": "Lawn", "irrigation": 4.5}]},
            "1718496000": {"total": -0.3, "eto": 4.1, "rain": 2.0, "intervals": []}
        }},
        {"station": "Beds", "balances": {}}
    ]"#;

    fn chart() -> BalanceChart {
        BalanceChart::from_feed(&parse_balance_json(FEED).unwrap()).unwrap()
    }

    #[test]
    fn test_points_sorted_with_previous_rows() {
        let chart = chart();
        let lawn = &chart.series()[0];
        assert_eq!(lawn.points.len(), 2);
        assert!(lawn.points[0].timestamp < lawn.points[1].timestamp);

        let first: Vec<String> = lawn.points[0].breakdown.iter().map(|r| r.to_string()).collect();
        assert_eq!(first, vec!["ETo: -4.1", "Rain: +2.0", "Total: -0.3"]);

        let second: Vec<String> = lawn.points[1].breakdown.iter().map(|r| r.to_string()).collect();
        assert_eq!(
            second,
            vec!["Previous: -0.3", "ETo: -3.0", "Rain: +0.0", "Lawn: +4.5", "Total: 1.2"]
        );
    }

    #[test]
    fn test_tooltip_header() {
        let chart = chart();
        let lawn = &chart.series()[0];
        assert_eq!(lawn.tooltip_header(&lawn.points[0]), "Front lawn @ 2024-06-16");
    }

    #[test]
    fn test_numeric_timestamp_order() {
        let feed = parse_balance_json(
            r#"[{"station": "S", "balances": {
                "900": {"total": 1.0, "eto": 0.0, "rain": 0.0},
                "1000": {"total": 2.0, "eto": 0.0, "rain": 0.0}
            }}]"#,
        )
        .unwrap();
        let series = BalanceSeries::from_station(&feed[0]).unwrap();
        assert_eq!(series.points[0].total, 1.0);
        assert_eq!(series.points[1].total, 2.0);
    }

    #[test]
    fn test_bad_timestamp_is_parse_error() {
        let feed = parse_balance_json(
            r#"[{"station": "S", "balances": {"yesterday": {"total": 1.0, "eto": 0.0, "rain": 0.0}}}]"#,
        )
        .unwrap();
        assert!(matches!(
            BalanceSeries::from_station(&feed[0]),
            Err(GridError::Parse { .. })
        ));
    }

    #[test]
    fn test_toggle_keeps_color_index() {
        let mut chart = chart();
        assert_eq!(chart.visible_series().len(), 2);

        assert_eq!(chart.toggle(0), Some(false));
        let plotted = chart.visible_series();
        assert_eq!(plotted.len(), 1);
        assert_eq!(plotted[0].color, 1);
        assert_eq!(plotted[0].series.station, "Beds");

        assert_eq!(chart.toggle(0), Some(true));
        assert_eq!(chart.toggle(7), None);
    }

    #[test]
    fn test_refresh_preserves_visibility() {
        let mut chart = chart();
        chart.toggle(1);
        let mut feed = parse_balance_json(FEED).unwrap();
        feed.push(StationBalance {
            station: "Hedge".into(),
            balances: Default::default(),
        });
        chart.refresh(&feed).unwrap();

        assert!(chart.is_visible(0));
        assert!(!chart.is_visible(1));
        assert!(chart.is_visible(2));
    }
}
