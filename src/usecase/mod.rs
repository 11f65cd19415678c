// ============================================================================
// Use Case Layer
// ============================================================================
//
// Transport-agnostic operations exposed to every adapter:
// - CreateOrderUseCase: validate, save, notify
// - ListOrdersUseCase: read all orders
//
// Depends only on the domain ports (OrderRepository, EventDispatcher).
//
// ============================================================================

pub mod create_order;
pub mod dto;
pub mod error;
pub mod list_orders;

pub use create_order::CreateOrderUseCase;
pub use dto::{OrderInputDto, OrderOutputDto};
pub use error::UseCaseError;
pub use list_orders::ListOrdersUseCase;
