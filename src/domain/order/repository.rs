use async_trait::async_trait;
use thiserror::Error;

use super::entity::Order;

// ============================================================================
// Order Repository - Storage Port
// ============================================================================
//
// Implementations must be safe to call concurrently from many requests and
// must return `list` in a stable order (insertion order for the bundled
// implementations). Callers never re-sort.
//
// ============================================================================

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Order already exists: {id}")]
    Duplicate { id: String },

    #[error("Order not found: {id}")]
    NotFound { id: String },

    /// Stored row could not be rebuilt into a valid order
    #[error("Corrupt order record: {0}")]
    Corrupt(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl RepositoryError {
    pub fn duplicate(id: impl Into<String>) -> Self {
        Self::Duplicate { id: id.into() }
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a new order
    async fn save(&self, order: &Order) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &str) -> Result<Order, RepositoryError>;

    /// All orders in storage order
    async fn list(&self) -> Result<Vec<Order>, RepositoryError>;

    async fn count(&self) -> Result<u64, RepositoryError>;
}
