//! Registry-assigned poll identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one poll within a registry.
///
/// Ids are handed out sequentially, starting at zero, by the registry that
/// created the poll, and are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PollId(u64);

impl PollId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PollId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "poll-{}", self.0)
    }
}
