pub mod balance;
pub mod clock;
pub mod editor;
pub mod poller;
pub mod schedule_view;
pub mod slices;
pub mod snap;
pub mod status;

pub use balance::{BalanceChart, BalancePoint, BalanceSeries, BreakdownRow, PlottedSeries};
pub use clock::{
    countdown, date_string, device_time, format_duration, from_clock, schedule_heading, to_clock,
    xs_date, ClockFace, Countdown, TimeFormat,
};
pub use editor::{
    ClickOutcome, EditableSchedule, EditorState, HoverLabel, IntervalEditor, LabelRole,
    PointerFeedback,
};
pub use poller::{StatusPoller, StatusSource};
pub use schedule_view::ScheduleView;
pub use slices::{render_slices, MIN_SEGMENT_WIDTH};
pub use snap::{snap_to_minute, steps_for_width};
pub use status::{status_display, PollCadence, StatusBoard, StatusDisplay};
