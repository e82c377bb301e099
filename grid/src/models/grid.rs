//! Output types of the schedule grid render pass.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::interval::{ProgramIndex, StationId};

/// Number of color slots in the program palette.
pub const PALETTE_SIZE: i64 = 10;

/// One hour-wide bucket of a station's day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DaySlice {
    pub station_id: StationId,
    /// Hour of day in `[0, 24)`.
    pub hour: u8,
}

impl DaySlice {
    pub fn new(station_id: StationId, hour: u8) -> Self {
        Self { station_id, hour }
    }

    /// Minute of day at which the slice begins.
    pub fn start_minute(&self) -> f64 {
        f64::from(self.hour) * 60.0
    }
}

/// A station row of the grid as the caller sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationRow {
    pub station_id: StationId,
    /// Whether the station is watering right now (from the status feed).
    pub on: bool,
}

impl StationRow {
    pub fn new(station_id: StationId, on: bool) -> Self {
        Self { station_id, on }
    }
}

/// Color class of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgramClass {
    Manual,
    /// Slot in `[0, PALETTE_SIZE)`.
    Palette(u8),
}

impl ProgramClass {
    /// Palette slot for a program: `(index + 1) mod 10`.
    ///
    /// More than ten programs alias onto the same colors.
    pub fn for_program(index: ProgramIndex) -> Self {
        Self::Palette((index.value() + 1).rem_euclid(PALETTE_SIZE) as u8)
    }
}

impl fmt::Display for ProgramClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => write!(f, "programManual"),
            Self::Palette(slot) => write!(f, "program{}", slot),
        }
    }
}

/// Status class of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerClass {
    Schedule,
    History,
    Blocked,
}

impl fmt::Display for MarkerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Schedule => "schedule",
            Self::History => "history",
            Self::Blocked => "blocked",
        };
        f.write_str(name)
    }
}

/// A clipped, slice-relative rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedSegment {
    /// Left edge as a fraction of the 60-minute slice.
    pub left: f64,
    /// Width as a fraction of the slice, never below the minimum marker width.
    pub width: f64,
    pub program_class: ProgramClass,
    pub marker_class: MarkerClass,
    pub program_name: String,
    pub label: String,
}

impl RenderedSegment {
    /// `"{program}: {label}"`, the hover text of the marker.
    pub fn tooltip(&self) -> String {
        format!("{}: {}", self.program_name, self.label)
    }
}

/// Zero-width "current time" marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NowMarker {
    pub position: f64,
    /// The station is currently watering.
    pub on: bool,
}

/// Everything drawn inside one slice, segments first, then the now marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SliceContent {
    pub segments: Vec<RenderedSegment>,
    pub now: Option<NowMarker>,
}

impl SliceContent {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.now.is_none()
    }
}

/// One legend item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub program_name: String,
    pub class: ProgramClass,
}

/// Program legend deduplicated by program name.
///
/// Entries keep the position of the first time a name was seen; a later
/// interval with the same name overwrites the class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Legend {
    entries: Vec<LegendEntry>,
}

impl Legend {
    pub fn record(&mut self, program_name: &str, class: ProgramClass) {
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.program_name == program_name)
        {
            Some(entry) => entry.class = class,
            None => self.entries.push(LegendEntry {
                program_name: program_name.to_string(),
                class,
            }),
        }
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of a render pass.
///
/// Serialized with `slices` as a list of
/// `{station_id, hour, segments, now}` entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridRender {
    /// Non-empty slices only, ordered by station then hour.
    #[serde(with = "slice_list")]
    pub slices: BTreeMap<DaySlice, SliceContent>,
    pub legend: Legend,
}

/// JSON objects only take string keys, so slices travel as a sequence.
mod slice_list {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{DaySlice, NowMarker, RenderedSegment, SliceContent};
    use crate::models::StationId;

    #[derive(Serialize)]
    struct EntryRef<'a> {
        station_id: StationId,
        hour: u8,
        segments: &'a [RenderedSegment],
        now: Option<NowMarker>,
    }

    #[derive(Deserialize)]
    struct Entry {
        station_id: StationId,
        hour: u8,
        #[serde(default)]
        segments: Vec<RenderedSegment>,
        #[serde(default)]
        now: Option<NowMarker>,
    }

    pub fn serialize<S: Serializer>(
        slices: &BTreeMap<DaySlice, SliceContent>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(slices.iter().map(|(slice, content)| EntryRef {
            station_id: slice.station_id,
            hour: slice.hour,
            segments: &content.segments,
            now: content.now,
        }))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<DaySlice, SliceContent>, D::Error> {
        let entries = Vec::<Entry>::deserialize(deserializer)?;
        Ok(entries
            .into_iter()
            .map(|entry| {
                (
                    DaySlice::new(entry.station_id, entry.hour),
                    SliceContent {
                        segments: entry.segments,
                        now: entry.now,
                    },
                )
            })
            .collect())
    }
}

impl GridRender {
    pub fn slice(&self, station_id: StationId, hour: u8) -> Option<&SliceContent> {
        self.slices.get(&DaySlice::new(station_id, hour))
    }

    /// Segments of a slice, empty when nothing was drawn there.
    pub fn segments(&self, station_id: StationId, hour: u8) -> &[RenderedSegment] {
        self.slice(station_id, hour)
            .map(|content| content.segments.as_slice())
            .unwrap_or(&[])
    }

    pub fn segment_count(&self) -> usize {
        self.slices.values().map(|content| content.segments.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_rotation() {
        assert_eq!(
            ProgramClass::for_program(ProgramIndex::new(0)),
            ProgramClass::Palette(1)
        );
        assert_eq!(
            ProgramClass::for_program(ProgramIndex::new(9)),
            ProgramClass::Palette(0)
        );
        assert_eq!(
            ProgramClass::for_program(ProgramIndex::new(10)),
            ProgramClass::Palette(1)
        );
        // Run-once programs are reported with index -1.
        assert_eq!(
            ProgramClass::for_program(ProgramIndex::new(-1)),
            ProgramClass::Palette(0)
        );
    }

    #[test]
    fn test_class_names() {
        assert_eq!(ProgramClass::Manual.to_string(), "programManual");
        assert_eq!(ProgramClass::Palette(3).to_string(), "program3");
        assert_eq!(MarkerClass::History.to_string(), "history");
        assert_eq!(MarkerClass::Blocked.to_string(), "blocked");
    }

    #[test]
    fn test_legend_dedup_keeps_first_position_last_class() {
        let mut legend = Legend::default();
        legend.record("Lawn", ProgramClass::Palette(1));
        legend.record("Roses", ProgramClass::Palette(2));
        legend.record("Lawn", ProgramClass::Manual);

        assert_eq!(legend.len(), 2);
        assert_eq!(legend.entries()[0].program_name, "Lawn");
        assert_eq!(legend.entries()[0].class, ProgramClass::Manual);
        assert_eq!(legend.entries()[1].program_name, "Roses");
    }

    #[test]
    fn test_slice_ordering() {
        let a = DaySlice::new(StationId::new(0), 23);
        let b = DaySlice::new(StationId::new(1), 0);
        assert!(a < b);
        assert_eq!(b.start_minute(), 0.0);
        assert_eq!(a.start_minute(), 1380.0);
    }

    #[test]
    fn test_render_serializes_slices_as_list() {
        let mut render = GridRender::default();
        render.slices.insert(
            DaySlice::new(StationId::new(2), 7),
            SliceContent {
                segments: vec![RenderedSegment {
                    left: 0.25,
                    width: 0.5,
                    program_class: ProgramClass::Palette(1),
                    marker_class: MarkerClass::Schedule,
                    program_name: "Lawn".into(),
                    label: "07:15 for 30:00".into(),
                }],
                now: Some(NowMarker {
                    position: 0.5,
                    on: true,
                }),
            },
        );
        render.legend.record("Lawn", ProgramClass::Palette(1));

        let json = serde_json::to_value(&render).unwrap();
        let slices = json["slices"].as_array().unwrap();
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0]["station_id"], 2);
        assert_eq!(slices[0]["hour"], 7);
        assert_eq!(slices[0]["segments"][0]["label"], "07:15 for 30:00");
        assert_eq!(slices[0]["now"]["on"], true);

        let back: GridRender = serde_json::from_value(json).unwrap();
        assert_eq!(back, render);
    }

    #[test]
    fn test_empty_render_lookup() {
        let render = GridRender::default();
        assert!(render.segments(StationId::new(0), 5).is_empty());
        assert_eq!(render.segment_count(), 0);
    }
}
