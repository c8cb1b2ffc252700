//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Identifier is empty or malformed
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Language id outside the catalogue
    #[error("Invalid language id: {0}")]
    InvalidLanguage(u32),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
