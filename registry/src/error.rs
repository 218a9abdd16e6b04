use ballot_ledger::DefinitionError;
use thiserror::Error;

/// Why a poll could not be created, or a registry configured.
///
/// The creation variants are input errors: the caller fixes the input and
/// tries again. They are never worth retrying unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("poll description must not be empty")]
    InvalidDescription,

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    #[error("config error: {0}")]
    Config(String),
}

impl From<DefinitionError> for RegistryError {
    fn from(e: DefinitionError) -> Self {
        match e {
            DefinitionError::EmptyDescription => RegistryError::InvalidDescription,
            DefinitionError::InvalidOptions(reason) => RegistryError::InvalidOptions(reason),
            DefinitionError::EmptyWindow { .. } => RegistryError::InvalidDuration(e.to_string()),
        }
    }
}
