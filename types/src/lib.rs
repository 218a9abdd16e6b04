//! Fundamental types for the ballot workspace.
//!
//! This crate defines the types shared by every other crate in the workspace:
//! timestamps, the clock abstraction, and the poll and participant identifiers.

pub mod clock;
pub mod participant;
pub mod poll_id;
pub mod time;

pub use clock::{Clock, SystemClock};
pub use participant::ParticipantId;
pub use poll_id::PollId;
pub use time::Timestamp;
