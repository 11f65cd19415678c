use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

use crate::domain::order::OrderCreated;
use crate::events::{serialize_event, EventEnvelope, EventHandler};
use crate::metrics::Metrics;
use crate::utils::{retry_with_backoff, RetryConfig, RetryResult};

use super::redpanda::MessagePublisher;

// ============================================================================
// OrderCreated Publisher
// ============================================================================
//
// Event handler that forwards OrderCreated envelopes to a broker topic,
// keyed by order id. Retries with exponential backoff live here, not in
// the dispatcher or the use case.
//
// ============================================================================

pub const HANDLER_NAME: &str = "order-created-publisher";

pub struct OrderCreatedPublisher {
    publisher: Arc<dyn MessagePublisher>,
    topic: String,
    retry: RetryConfig,
    metrics: Arc<Metrics>,
}

impl OrderCreatedPublisher {
    pub fn new(publisher: Arc<dyn MessagePublisher>, topic: impl Into<String>, metrics: Arc<Metrics>) -> Self {
        Self {
            publisher,
            topic: topic.into(),
            retry: RetryConfig::default(),
            metrics,
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

#[async_trait]
impl EventHandler<OrderCreated> for OrderCreatedPublisher {
    fn name(&self) -> &str {
        HANDLER_NAME
    }

    async fn handle(&self, event: &EventEnvelope<OrderCreated>) -> anyhow::Result<()> {
        let payload = serialize_event(event)?;
        let key = event.payload.id.as_str();
        let started = Instant::now();

        let result = retry_with_backoff(self.retry.clone(), |attempt| {
            self.metrics.record_retry_attempt("order_created_publish", attempt);
            self.publisher.publish(&self.topic, key, &payload)
        })
        .await;

        let elapsed = started.elapsed().as_secs_f64();

        if let Some(state) = self.publisher.circuit_state().await {
            self.metrics.update_circuit_breaker_state(state.as_gauge());
        }

        match result {
            RetryResult::Success(()) => {
                self.metrics.record_retry_outcome("order_created_publish", true);
                self.metrics.record_publish(&self.topic, elapsed, true);
                tracing::debug!(
                    order_id = %event.payload.id,
                    topic = %self.topic,
                    "OrderCreated published"
                );
                Ok(())
            }
            RetryResult::Failed(e) => {
                self.metrics.record_retry_outcome("order_created_publish", false);
                self.metrics.record_publish(&self.topic, elapsed, false);
                Err(e.context(format!("publishing order {} to {}", event.payload.id, self.topic)))
            }
        }
    }
}
