use thiserror::Error;

use crate::domain::order::{RepositoryError, ValidationError};

// ============================================================================
// Use Case Errors
// ============================================================================
//
// Each variant keeps the original error untouched so adapters can map the
// kind to their own status codes. Notification failures never appear here.
//
// ============================================================================

#[derive(Debug, Error)]
pub enum UseCaseError {
    /// Caller input broke an order rule
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Saving the order failed
    #[error("persistence failed: {0}")]
    Persistence(#[source] RepositoryError),

    /// Reading orders failed
    #[error("retrieval failed: {0}")]
    Retrieval(#[source] RepositoryError),
}

impl UseCaseError {
    pub fn kind(&self) -> &'static str {
        match self {
            UseCaseError::Validation(_) => "validation",
            UseCaseError::Persistence(_) => "persistence",
            UseCaseError::Retrieval(_) => "retrieval",
        }
    }
}
