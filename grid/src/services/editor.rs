//! Program interval editor.
//!
//! The editor grid shows one row per day of a program's cycle and lets the
//! user add watering intervals with two clicks on the same row: the first
//! click fixes the start, the second the stop. The committed intervals live in
//! an [`EditableSchedule`], which is what gets posted back to the controller
//! as a JSON array of `[start, end]` pairs.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorContext, GridError, GridResult};
use crate::models::{
    ClockLabel, Draft, EditorCell, GridPointer, IntervalPair, HOURS_PER_DAY, MINUTES_PER_HOUR,
};
use crate::services::snap::snap_to_minute;

/// Intervals of a program being edited, in absolute minutes from the start of
/// the program cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditableSchedule {
    pairs: Vec<IntervalPair>,
}

impl EditableSchedule {
    pub fn new(pairs: Vec<IntervalPair>) -> Self {
        Self { pairs }
    }

    /// Parse the hidden form field value, e.g. `[[360,390],[1800,1830]]`.
    pub fn from_json(json: &str) -> GridResult<Self> {
        let trimmed = json.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(trimmed).map_err(|e| {
            GridError::parse_with_context(
                format!("invalid interval list: {}", e),
                ErrorContext::new("EditableSchedule::from_json").with_input(trimmed),
            )
        })
    }

    /// Serialize for the hidden form field.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.pairs).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn pairs(&self) -> &[IntervalPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn push(&mut self, pair: IntervalPair) {
        self.pairs.push(pair);
    }

    /// Remove the first pair matching both endpoints. Returns whether one was
    /// removed; a missing pair is left alone.
    pub fn delete(&mut self, pair: IntervalPair) -> bool {
        match self.pairs.iter().position(|candidate| *candidate == pair) {
            Some(index) => {
                self.pairs.remove(index);
                true
            }
            None => false,
        }
    }

    /// Lay the intervals out over `(day, hour)` cells.
    ///
    /// Each interval yields one cell per hour it covers; its last cell carries
    /// the delete handle. Empty or inverted pairs are skipped.
    pub fn cells(&self) -> Vec<EditorCell> {
        let mut cells = Vec::new();
        for pair in &self.pairs {
            let (start, end) = (pair.start(), pair.end());
            if end <= start {
                continue;
            }

            let first_cell = start.div_euclid(MINUTES_PER_HOUR);
            let last_cell = (end - 1).div_euclid(MINUTES_PER_HOUR);
            for cell in first_cell..=last_cell {
                let cell_start = cell * MINUTES_PER_HOUR;
                let from = start.max(cell_start);
                let to = end.min(cell_start + MINUTES_PER_HOUR);
                cells.push(EditorCell {
                    day: cell.div_euclid(HOURS_PER_DAY),
                    hour: cell.rem_euclid(HOURS_PER_DAY) as u8,
                    left: (from - cell_start) as f64 / MINUTES_PER_HOUR as f64,
                    width: (to - from) as f64 / MINUTES_PER_HOUR as f64,
                    pair: *pair,
                    deletable: cell == last_cell,
                });
            }
        }
        cells
    }
}

/// Editor interaction state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum EditorState {
    #[default]
    Idle,
    PendingStart(Draft),
}

/// Which end of the interval a hover label previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelRole {
    Start,
    Stop,
}

/// Transient label following the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverLabel {
    pub role: LabelRole,
    pub time: ClockLabel,
    /// Cell-relative pixel position of the pointer.
    pub x: f64,
}

/// What the grid should show after a pointer move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerFeedback {
    /// No draft yet: a provisional start label at the hovered minute.
    StartPreview(HoverLabel),
    /// A draft on this row: its marker now spans `marker_width` pixels.
    DraftExtended {
        marker_width: f64,
        stop: Option<HoverLabel>,
    },
    /// Nothing to update.
    Nothing,
}

/// Result of a click on the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// The click opened a draft.
    Started(Draft),
    /// The click closed the draft; the pair was appended to the schedule.
    Committed(IntervalPair),
    /// The click landed on another row; the draft was dropped.
    Discarded,
}

/// Two-click interval editor over an [`EditableSchedule`].
#[derive(Debug, Clone, Default)]
pub struct IntervalEditor {
    state: EditorState,
    hover: Option<HoverLabel>,
    schedule: EditableSchedule,
}

impl IntervalEditor {
    pub fn new(schedule: EditableSchedule) -> Self {
        Self {
            state: EditorState::Idle,
            hover: None,
            schedule,
        }
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn hover(&self) -> Option<HoverLabel> {
        self.hover
    }

    pub fn schedule(&self) -> &EditableSchedule {
        &self.schedule
    }

    pub fn into_schedule(self) -> EditableSchedule {
        self.schedule
    }

    pub fn pointer_move(&mut self, pointer: GridPointer) -> GridResult<PointerFeedback> {
        self.hover = None;
        let minute = snap_to_minute(pointer.x, pointer.cell_width)?;
        let time = ClockLabel::new(u32::from(pointer.hour), minute);

        let feedback = match self.state {
            EditorState::Idle => {
                if pointer.within_cell() {
                    let label = HoverLabel {
                        role: LabelRole::Start,
                        time,
                        x: pointer.x,
                    };
                    self.hover = Some(label);
                    PointerFeedback::StartPreview(label)
                } else {
                    PointerFeedback::Nothing
                }
            }
            EditorState::PendingStart(draft) if draft.row == pointer.row => {
                let marker_width = (pointer.row_x() - draft.anchor_x).max(0.0);
                let stop = (pointer.within_cell() && marker_width > 0.0).then_some(HoverLabel {
                    role: LabelRole::Stop,
                    time,
                    x: pointer.x,
                });
                self.hover = stop;
                PointerFeedback::DraftExtended { marker_width, stop }
            }
            EditorState::PendingStart(_) => PointerFeedback::Nothing,
        };
        Ok(feedback)
    }

    pub fn click(&mut self, pointer: GridPointer) -> GridResult<ClickOutcome> {
        self.hover = None;
        let minute = snap_to_minute(pointer.x, pointer.cell_width)?;
        let time = ClockLabel::new(u32::from(pointer.hour), minute);

        let outcome = match self.state {
            EditorState::Idle => {
                let draft = Draft {
                    row: pointer.row,
                    start: time,
                    anchor_x: pointer.row_x(),
                };
                self.state = EditorState::PendingStart(draft);
                ClickOutcome::Started(draft)
            }
            EditorState::PendingStart(draft) if draft.row == pointer.row => {
                let offset = draft.row.offset_minutes();
                let pair = IntervalPair::new(
                    offset + draft.start.minute_of_day(),
                    offset + time.minute_of_day(),
                );
                self.schedule.push(pair);
                self.state = EditorState::Idle;
                log::debug!("Committed interval {:?} on day {}", pair, draft.row.day);
                ClickOutcome::Committed(pair)
            }
            EditorState::PendingStart(_) => {
                self.state = EditorState::Idle;
                ClickOutcome::Discarded
            }
        };
        Ok(outcome)
    }

    /// The pointer left a cell: only the hover label goes away.
    pub fn pointer_leave(&mut self) {
        self.hover = None;
    }

    /// Drop an open draft, e.g. when the schedule type changes.
    pub fn cancel_draft(&mut self) {
        self.state = EditorState::Idle;
        self.hover = None;
    }

    /// Delete an interval by identity; an open draft is dropped as the grid
    /// is redrawn.
    pub fn delete(&mut self, pair: IntervalPair) -> bool {
        self.cancel_draft();
        self.schedule.delete(pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GridRow;

    const WIDTH: f64 = 120.0;

    /// Pointer at `minute` of `hour` on a 120px cell (2px per minute).
    fn at(day: u32, hour: u8, minute: u32) -> GridPointer {
        GridPointer::new(GridRow::new(day), hour, f64::from(minute) * 2.0, WIDTH)
    }

    #[test]
    fn test_two_clicks_same_row_commit() {
        let mut editor = IntervalEditor::default();
        let started = editor.click(at(1, 0, 30)).unwrap();
        assert!(matches!(started, ClickOutcome::Started(d) if d.start == ClockLabel::new(0, 30)));

        let committed = editor.click(at(1, 1, 30)).unwrap();
        assert_eq!(
            committed,
            ClickOutcome::Committed(IntervalPair::new(1440 + 30, 1440 + 90))
        );
        assert_eq!(editor.state(), EditorState::Idle);
        assert_eq!(editor.schedule().pairs(), &[IntervalPair::new(1470, 1530)]);
    }

    #[test]
    fn test_second_click_other_row_discards() {
        let mut editor = IntervalEditor::default();
        editor.click(at(0, 5, 0)).unwrap();
        let outcome = editor.click(at(1, 6, 0)).unwrap();
        assert_eq!(outcome, ClickOutcome::Discarded);
        assert_eq!(editor.state(), EditorState::Idle);
        assert!(editor.schedule().is_empty());
    }

    #[test]
    fn test_idle_move_previews_start() {
        let mut editor = IntervalEditor::default();
        let feedback = editor.pointer_move(at(0, 7, 15)).unwrap();
        match feedback {
            PointerFeedback::StartPreview(label) => {
                assert_eq!(label.role, LabelRole::Start);
                assert_eq!(label.time.to_string(), "07:15");
            }
            other => panic!("unexpected feedback {:?}", other),
        }
        assert!(editor.hover().is_some());
    }

    #[test]
    fn test_idle_move_outside_cell_shows_nothing() {
        let mut editor = IntervalEditor::default();
        let pointer = GridPointer::new(GridRow::new(0), 7, -4.0, WIDTH);
        assert_eq!(editor.pointer_move(pointer).unwrap(), PointerFeedback::Nothing);
        assert!(editor.hover().is_none());
    }

    #[test]
    fn test_draft_extends_on_same_row() {
        let mut editor = IntervalEditor::default();
        editor.click(at(0, 2, 0)).unwrap();

        match editor.pointer_move(at(0, 3, 10)).unwrap() {
            PointerFeedback::DraftExtended { marker_width, stop } => {
                assert_eq!(marker_width, WIDTH + 20.0);
                let stop = stop.unwrap();
                assert_eq!(stop.role, LabelRole::Stop);
                assert_eq!(stop.time, ClockLabel::new(3, 10));
            }
            other => panic!("unexpected feedback {:?}", other),
        }
    }

    #[test]
    fn test_draft_behind_anchor_has_no_stop_label() {
        let mut editor = IntervalEditor::default();
        editor.click(at(0, 2, 30)).unwrap();
        match editor.pointer_move(at(0, 2, 10)).unwrap() {
            PointerFeedback::DraftExtended { marker_width, stop } => {
                assert_eq!(marker_width, 0.0);
                assert!(stop.is_none());
            }
            other => panic!("unexpected feedback {:?}", other),
        }
    }

    #[test]
    fn test_draft_ignores_other_rows() {
        let mut editor = IntervalEditor::default();
        editor.click(at(0, 2, 0)).unwrap();
        assert_eq!(
            editor.pointer_move(at(1, 4, 0)).unwrap(),
            PointerFeedback::Nothing
        );
        assert!(matches!(editor.state(), EditorState::PendingStart(_)));
    }

    #[test]
    fn test_pointer_leave_keeps_draft() {
        let mut editor = IntervalEditor::default();
        editor.click(at(0, 2, 0)).unwrap();
        editor.pointer_move(at(0, 2, 40)).unwrap();
        assert!(editor.hover().is_some());

        editor.pointer_leave();
        assert!(editor.hover().is_none());
        assert!(matches!(editor.state(), EditorState::PendingStart(_)));
    }

    #[test]
    fn test_degenerate_width_is_an_error() {
        let mut editor = IntervalEditor::default();
        let pointer = GridPointer::new(GridRow::new(0), 0, 1.0, 0.0);
        assert!(editor.click(pointer).is_err());
        assert_eq!(editor.state(), EditorState::Idle);
    }

    #[test]
    fn test_delete_first_match_only() {
        let mut schedule = EditableSchedule::new(vec![
            IntervalPair::new(100, 200),
            IntervalPair::new(300, 400),
            IntervalPair::new(100, 200),
        ]);
        assert!(schedule.delete(IntervalPair::new(100, 200)));
        assert_eq!(
            schedule.pairs(),
            &[IntervalPair::new(300, 400), IntervalPair::new(100, 200)]
        );
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut schedule = EditableSchedule::new(vec![IntervalPair::new(300, 400)]);
        assert!(!schedule.delete(IntervalPair::new(100, 200)));
        assert_eq!(schedule.len(), 1);
    }

    #[test]
    fn test_editor_delete_drops_draft() {
        let mut editor =
            IntervalEditor::new(EditableSchedule::new(vec![IntervalPair::new(100, 200)]));
        editor.click(at(0, 1, 0)).unwrap();
        assert!(editor.delete(IntervalPair::new(100, 200)));
        assert_eq!(editor.state(), EditorState::Idle);
        assert!(editor.schedule().is_empty());
    }

    #[test]
    fn test_json_field_roundtrip_and_empty() {
        let schedule = EditableSchedule::from_json("[[360, 390], [1800, 1830]]").unwrap();
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.to_json(), "[[360,390],[1800,1830]]");
        assert!(EditableSchedule::from_json("  ").unwrap().is_empty());
        assert!(matches!(
            EditableSchedule::from_json("[[1]]"),
            Err(GridError::Parse { .. })
        ));
    }

    #[test]
    fn test_cells_within_one_hour() {
        let cells = EditableSchedule::new(vec![IntervalPair::new(75, 105)]).cells();
        assert_eq!(cells.len(), 1);
        assert_eq!((cells[0].day, cells[0].hour), (0, 1));
        assert_eq!(cells[0].left, 0.25);
        assert_eq!(cells[0].width, 0.5);
        assert!(cells[0].deletable);
    }

    #[test]
    fn test_cells_wrap_across_midnight() {
        // Day 0 23:30 to day 1 00:45
        let cells = EditableSchedule::new(vec![IntervalPair::new(1410, 1485)]).cells();
        assert_eq!(cells.len(), 2);
        assert_eq!((cells[0].day, cells[0].hour), (0, 23));
        assert_eq!(cells[0].left, 0.5);
        assert_eq!(cells[0].width, 0.5);
        assert!(!cells[0].deletable);
        assert_eq!((cells[1].day, cells[1].hour), (1, 0));
        assert_eq!(cells[1].left, 0.0);
        assert_eq!(cells[1].width, 0.75);
        assert!(cells[1].deletable);
    }

    #[test]
    fn test_cells_ending_on_the_hour() {
        let cells = EditableSchedule::new(vec![IntervalPair::new(60, 180)]).cells();
        assert_eq!(cells.len(), 2);
        assert!(cells.iter().all(|c| c.width == 1.0));
        assert_eq!(cells[1].hour, 2);
    }

    #[test]
    fn test_cells_skip_inverted_pairs() {
        let schedule = EditableSchedule::new(vec![IntervalPair::new(90, 30), IntervalPair::new(5, 5)]);
        assert!(schedule.cells().is_empty());
    }
}
