//! Per-poll ledger.
//!
//! A [`PollLedger`] is the whole record of one poll: its description, a fixed
//! option list, the participants who have voted, and the running tallies.
//! The poll is open while `now < closes_at` and closed from then on; the
//! state is derived from the clock on every access, never stored.

pub mod error;
pub mod ledger;
pub mod option;
pub mod snapshot;
pub mod validate;

pub use error::{DefinitionError, LedgerError};
pub use ledger::{PollLedger, PollStatus};
pub use option::PollOption;
pub use snapshot::PollSnapshot;
