use std::sync::Arc;

use crate::domain::order::{Order, OrderCreated, OrderRepository};
use crate::events::{DispatchError, EventDispatcher, EventEnvelope};

use super::dto::{OrderInputDto, OrderOutputDto};
use super::error::UseCaseError;

// ============================================================================
// CreateOrder Use Case
// ============================================================================
//
// Orchestrates: Input → Order (validated) → Repository → OrderCreated
//
// The event is raised only after a successful save, at most once, and its
// outcome never changes the result returned to the caller.
//
// ============================================================================

pub struct CreateOrderUseCase {
    repository: Arc<dyn OrderRepository>,
    dispatcher: Arc<dyn EventDispatcher<OrderCreated>>,
}

impl CreateOrderUseCase {
    pub fn new(
        repository: Arc<dyn OrderRepository>,
        dispatcher: Arc<dyn EventDispatcher<OrderCreated>>,
    ) -> Self {
        Self { repository, dispatcher }
    }

    pub async fn execute(&self, input: OrderInputDto) -> Result<OrderOutputDto, UseCaseError> {
        let order = Order::new(input.id, input.price, input.tax)?;

        self.repository
            .save(&order)
            .await
            .map_err(UseCaseError::Persistence)?;

        tracing::info!(
            order_id = %order.id(),
            final_price = %order.final_price(),
            "Order saved"
        );

        let output = OrderOutputDto::from(&order);

        let event = EventEnvelope::new(OrderCreated::from(&output))
            .with_metadata("order_id", order.id());
        let outcome = self.dispatcher.dispatch(&event).await;
        discard_dispatch_outcome(order.id(), outcome);

        Ok(output)
    }
}

/// Post-commit notification is best-effort: the save already happened, so a
/// failed dispatch is logged and dropped here instead of reaching the caller.
fn discard_dispatch_outcome(order_id: &str, outcome: Result<(), DispatchError>) {
    if let Err(e) = outcome {
        tracing::warn!(
            order_id = %order_id,
            error = %e,
            "OrderCreated notification failed; order remains saved"
        );
    }
}
