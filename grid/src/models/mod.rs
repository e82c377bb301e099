pub mod editor;
pub mod grid;
pub mod interval;
pub mod macros;
pub mod time;

pub use editor::*;
pub use grid::*;
pub use interval::*;
pub use time::*;
