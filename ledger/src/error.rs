use ballot_types::{ParticipantId, Timestamp};
use thiserror::Error;

/// Why a vote was rejected.
///
/// Every variant is deterministic: resubmitting the same vote fails the
/// same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("voting window has closed")]
    VotingClosed,

    #[error("option index {index} out of range: poll has {count} options")]
    InvalidOption { index: usize, count: usize },

    #[error("participant {0} has already voted in this poll")]
    AlreadyVoted(ParticipantId),
}

/// Why a poll definition cannot become a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("poll description must not be empty")]
    EmptyDescription,

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("voting window must close after it opens: opened {opened_at}, closes {closes_at}")]
    EmptyWindow {
        opened_at: Timestamp,
        closes_at: Timestamp,
    },
}
