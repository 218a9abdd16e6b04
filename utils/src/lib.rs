//! Shared utilities for the ballot workspace.

pub mod logging;
pub mod time;

pub use logging::{try_init_logging, LogFormat};
pub use time::format_remaining;
