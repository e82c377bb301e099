//! # Irrigation Grid
//!
//! Schedule grid model for an irrigation controller's web interface.
//!
//! The controller reports scheduled and logged watering runs per station. This
//! crate turns them into the hour-by-hour schedule grid, drives the
//! two-click interval editor used to define custom schedules, and prepares the
//! station status and water balance panels shown next to it.
//!
//! ## Features
//!
//! - **Grid Rendering**: Clip runs into per-hour slices with program colors,
//!   history/blocked markers, a legend and the current-time marker
//! - **Interval Editing**: Pixel to minute snapping and a two-click
//!   create/delete state machine producing `[start, end]` minute pairs
//! - **Status Polling**: A cancellable tokio task whose period follows the
//!   station state
//! - **Water Balance**: Time-ordered balance series with tooltip breakdowns
//!
//! ## Architecture
//!
//! - [`models`]: Domain value types (intervals, slices, segments, editor pairs)
//! - [`services`]: Rendering, editing, formatting and polling logic
//! - [`routes`]: Wire types of the controller's JSON endpoints
//! - [`config`]: TOML configuration
//! - [`error`]: Crate error type
//!
//! The crate performs no I/O of its own apart from reading its configuration
//! file; fetching JSON is left to the embedding application through
//! [`services::StatusSource`] and the `parse_*` functions in [`routes`].

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

pub use config::GridConfig;
pub use error::{ErrorContext, GridError, GridResult};
pub use models::{
    GridRender, IntervalPair, RenderedSegment, StationId, StationRow, TimeInterval,
};
pub use services::{render_slices, snap_to_minute, IntervalEditor, ScheduleView};
