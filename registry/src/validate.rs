//! Input checks for poll creation.
//!
//! Run before any lock is taken, in a fixed order: description, options,
//! then duration. The first failing check decides the error. The
//! description and option rules are the ledger's own, so a request that
//! passes here is one [`PollLedger::new`](ballot_ledger::PollLedger::new)
//! accepts.

use ballot_ledger::validate as rules;

use crate::RegistryError;

pub use ballot_ledger::validate::MIN_OPTIONS;

/// Blank descriptions (empty or whitespace only) are rejected.
pub fn description(description: &str) -> Result<String, RegistryError> {
    rules::description(description)?;
    Ok(description.to_owned())
}

/// Options must number at least [`MIN_OPTIONS`], none blank, none repeated.
///
/// Names are kept exactly as given; comparison for duplicates is exact.
pub fn options<S: AsRef<str>>(options: &[S]) -> Result<Vec<String>, RegistryError> {
    rules::options(options)?;
    Ok(options.iter().map(|s| s.as_ref().to_owned()).collect())
}

/// Custom windows are given in whole minutes and must be non-empty.
pub fn custom_minutes(minutes: u64) -> Result<u64, RegistryError> {
    if minutes == 0 {
        return Err(RegistryError::InvalidDuration(
            "custom duration must be at least one minute".to_string(),
        ));
    }
    minutes.checked_mul(60).ok_or_else(|| {
        RegistryError::InvalidDuration(format!("custom duration of {minutes} minutes is too long"))
    })
}
