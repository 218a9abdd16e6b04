//! Rules a poll definition must satisfy before a ledger exists for it.
//!
//! [`crate::PollLedger::new`] runs all of them, so no ledger can hold fewer
//! than [`MIN_OPTIONS`] options, a blank description or an empty window.

use std::collections::HashSet;

use ballot_types::Timestamp;

use crate::error::DefinitionError;

/// Fewest options a poll may have.
pub const MIN_OPTIONS: usize = 2;

/// Blank descriptions (empty or whitespace only) are rejected.
pub fn description(description: &str) -> Result<(), DefinitionError> {
    if description.trim().is_empty() {
        return Err(DefinitionError::EmptyDescription);
    }
    Ok(())
}

/// Options must number at least [`MIN_OPTIONS`], none blank, none repeated.
///
/// Names are compared exactly; `"Red"` and `"red"` are different options.
pub fn options<S: AsRef<str>>(options: &[S]) -> Result<(), DefinitionError> {
    if options.len() < MIN_OPTIONS {
        return Err(DefinitionError::InvalidOptions(format!(
            "need at least {MIN_OPTIONS} options, got {}",
            options.len()
        )));
    }

    let mut seen = HashSet::with_capacity(options.len());
    for (index, name) in options.iter().enumerate() {
        let name: &str = name.as_ref();
        if name.trim().is_empty() {
            return Err(DefinitionError::InvalidOptions(format!(
                "option {index} is empty"
            )));
        }
        if !seen.insert(name) {
            return Err(DefinitionError::InvalidOptions(format!(
                "duplicate option {name:?}"
            )));
        }
    }
    Ok(())
}

/// The window `[opened_at, closes_at)` must contain at least one second.
pub fn window(opened_at: Timestamp, closes_at: Timestamp) -> Result<(), DefinitionError> {
    if closes_at <= opened_at {
        return Err(DefinitionError::EmptyWindow {
            opened_at,
            closes_at,
        });
    }
    Ok(())
}
