//! Duration selectors offered when creating a poll.

use crate::error::RegistryError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of voting-window lengths a poll can be created with.
///
/// Each selector has a small numeric code used by front ends. The number of
/// seconds behind each selector comes from [`crate::DurationTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationSelector {
    /// Code 1, five minutes by default.
    Short,
    /// Code 2, thirty minutes by default.
    Medium,
    /// Code 3, one day by default.
    Day,
    /// Code 4, one week by default.
    Week,
}

impl DurationSelector {
    pub const ALL: [DurationSelector; 4] = [Self::Short, Self::Medium, Self::Day, Self::Week];

    pub fn code(&self) -> u8 {
        match self {
            Self::Short => 1,
            Self::Medium => 2,
            Self::Day => 3,
            Self::Week => 4,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Day => "day",
            Self::Week => "week",
        }
    }
}

impl TryFrom<u8> for DurationSelector {
    type Error = RegistryError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| {
            RegistryError::InvalidDuration(format!("unknown duration selector {code}, expected 1-4"))
        })
    }
}

impl fmt::Display for DurationSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
