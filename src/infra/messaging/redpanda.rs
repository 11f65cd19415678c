use async_trait::async_trait;
use rdkafka::{
    config::ClientConfig,
    producer::{FutureProducer, FutureRecord},
    util::Timeout,
};
use anyhow::Result;
use std::time::Duration;
use crate::utils::{CircuitBreaker, CircuitBreakerConfig, CircuitBreakerError, CircuitState};

const SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Anything that can put a keyed payload on a topic
#[async_trait]
pub trait MessagePublisher: Send + Sync {
    async fn publish(&self, topic: &str, key: &str, payload: &str) -> Result<()>;

    /// Breaker state for publishers that have one
    async fn circuit_state(&self) -> Option<CircuitState> {
        None
    }
}

/// Kafka-protocol producer (Redpanda) guarded by a circuit breaker.
///
/// Opens after 5 consecutive send failures, probes again after 30s and
/// needs 3 successful sends to close.
pub struct RedpandaClient {
    producer: FutureProducer,
    circuit_breaker: CircuitBreaker,
}

impl RedpandaClient {
    pub fn new(brokers: &str) -> Result<Self> {
        Self::with_circuit_breaker(
            brokers,
            CircuitBreakerConfig {
                failure_threshold: 5,
                timeout: Duration::from_secs(30),
                success_threshold: 3,
            },
        )
    }

    pub fn with_circuit_breaker(brokers: &str, breaker: CircuitBreakerConfig) -> Result<Self> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("client.id", "order-system")
            .set("message.timeout.ms", SEND_TIMEOUT.as_millis().to_string())
            .set("acks", "all")
            .create()
            .map_err(|e| anyhow::anyhow!("Failed to create Redpanda producer: {}", e))?;

        tracing::info!(brokers = %brokers, "Redpanda producer created");

        Ok(Self {
            producer,
            circuit_breaker: CircuitBreaker::new(breaker),
        })
    }
}

#[async_trait]
impl MessagePublisher for RedpandaClient {
    async fn publish(&self, topic: &str, key: &str, payload: &str) -> Result<()> {
        let sent = self
            .circuit_breaker
            .call(async {
                let record = FutureRecord::to(topic).key(key).payload(payload);
                self.producer
                    .send(record, Timeout::After(SEND_TIMEOUT))
                    .await
                    .map(|_delivery| ())
                    .map_err(|(e, _)| anyhow::anyhow!("Kafka send error: {}", e))
            })
            .await;

        match sent {
            Ok(()) => {
                tracing::debug!(topic = %topic, key = %key, "Published to Redpanda");
                Ok(())
            }
            Err(CircuitBreakerError::CircuitOpen) => {
                tracing::error!(topic = %topic, "Circuit breaker open - Redpanda unavailable");
                Err(anyhow::anyhow!("Circuit breaker open for Redpanda"))
            }
            Err(CircuitBreakerError::OperationFailed(e)) => {
                tracing::error!(error = %e, topic = %topic, key = %key, "Failed to publish to Redpanda");
                Err(e)
            }
        }
    }

    async fn circuit_state(&self) -> Option<CircuitState> {
        Some(self.circuit_breaker.get_state().await)
    }
}
