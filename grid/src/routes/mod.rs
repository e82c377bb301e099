//! Wire types of the controller's JSON endpoints.
//!
//! Each submodule mirrors one endpoint: the raw payload as the controller
//! sends it, plus the conversion into the crate's models.

pub mod balance;
pub mod log_feed;
pub mod status;

pub use balance::*;
pub use log_feed::*;
pub use status::*;
