// ============================================================================
// Order Domain - Business Logic for the Order Entity
// ============================================================================
//
// This module contains ALL Order-specific code:
// - Entity (Order with derived final price)
// - Errors (ValidationError, Violation)
// - Events (OrderCreated)
// - Repository port (OrderRepository, RepositoryError)
//
// Nothing here knows about HTTP, SQL or message brokers.
//
// ============================================================================

pub mod entity;
pub mod errors;
pub mod events;
pub mod repository;

// Re-export for convenience
pub use entity::*;
pub use errors::*;
pub use events::*;
pub use repository::*;
