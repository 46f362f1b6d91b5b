//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid session name '{0}': use 1-64 characters from [A-Za-z0-9._-], starting with a letter or digit")]
    InvalidSessionName(String),

    #[error("Invalid task id '{0}': use 1-64 characters from [A-Za-z0-9._-], starting with a letter or digit")]
    InvalidTaskId(String),

    #[error("Empty prompt")]
    EmptyPrompt,
}

impl DomainError {
    /// Whether the error stems from a caller-supplied identifier
    pub fn is_identifier_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidSessionName(_) | DomainError::InvalidTaskId(_)
        )
    }
}
