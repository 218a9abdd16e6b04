//! Poll registry.
//!
//! The registry is the factory and directory for polls: it validates
//! creation requests, opens a [`PollLedger`] for each accepted one, and keeps
//! an append-only list of every poll it has created. Voting goes straight to
//! the ledger; the registry never sits between a voter and a poll.
//!
//! A registry is an ordinary value with its own clock and configuration, so
//! any number of independent registries can coexist.

pub mod config;
pub mod duration;
pub mod error;
pub mod registry;
pub mod validate;

pub use ballot_ledger::{LedgerError, PollLedger, PollOption, PollSnapshot, PollStatus};
pub use config::{DurationTable, RegistryConfig};
pub use duration::DurationSelector;
pub use error::RegistryError;
pub use registry::{PollIds, PollRegistry, RegistrySummary};
