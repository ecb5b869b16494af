//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::path::PathId;

/// Domain errors represent violations of the option tree / identifier contract.
/// They are programmer or data errors and are surfaced to the caller immediately.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("no option reachable for identifier: {0}")]
    NotFound(PathId),

    #[error("navigation stack is empty: already at root level")]
    EmptyStack,

    #[error("invalid identifier '{id}': {reason}")]
    InvalidIdentifier { id: String, reason: String },
}

impl DomainError {
    pub(crate) fn invalid(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
