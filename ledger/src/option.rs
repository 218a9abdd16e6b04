//! A selectable choice within a poll.

use serde::{Deserialize, Serialize};

/// One option and the votes it has received so far.
///
/// Values of this type are copies taken from a ledger; later votes do not
/// change a copy already handed out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    pub name: String,
    pub vote_count: u64,
}
