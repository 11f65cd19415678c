// Private module declaration
mod server;

use prometheus::{
    HistogramOpts, HistogramVec, IntCounter, IntCounterVec,
    IntGauge, Opts, Registry,
};

// Re-export for public API
pub use server::{health_handler, metrics_handler};

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides metrics for:
// - Order creation and listing outcomes
// - OrderCreated publishing (throughput, latency, failures)
// - Retry attempts and outcomes
// - Circuit breaker state
//
// All metrics are registered with Prometheus and can be scraped via /metrics
// ============================================================================

/// Central metrics registry for the entire application
pub struct Metrics {
    registry: Registry,

    // Order Metrics
    pub orders_created: IntCounter,
    pub order_create_failures: IntCounterVec,
    pub orders_listed: IntCounter,
    pub order_list_failures: IntCounter,

    // Publishing Metrics
    pub events_published: IntCounterVec,
    pub events_publish_failures: IntCounterVec,
    pub event_publish_duration: HistogramVec,

    // Retry Metrics
    pub retry_attempts_total: IntCounterVec,
    pub retry_success: IntCounterVec,
    pub retry_failure: IntCounterVec,

    // Circuit Breaker Metrics
    pub circuit_breaker_state: IntGauge,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        // Order Metrics
        let orders_created = IntCounter::new(
            "orders_created_total",
            "Total orders created",
        )?;
        registry.register(Box::new(orders_created.clone()))?;

        let order_create_failures = IntCounterVec::new(
            Opts::new("order_create_failures_total", "Order creations rejected or failed"),
            &["kind"],
        )?;
        registry.register(Box::new(order_create_failures.clone()))?;

        let orders_listed = IntCounter::new(
            "orders_listed_total",
            "Total successful order list requests",
        )?;
        registry.register(Box::new(orders_listed.clone()))?;

        let order_list_failures = IntCounter::new(
            "order_list_failures_total",
            "Order list requests that failed",
        )?;
        registry.register(Box::new(order_list_failures.clone()))?;

        // Publishing Metrics
        let events_published = IntCounterVec::new(
            Opts::new("events_published_total", "Events published to the broker"),
            &["topic"],
        )?;
        registry.register(Box::new(events_published.clone()))?;

        let events_publish_failures = IntCounterVec::new(
            Opts::new("events_publish_failures_total", "Events that could not be published"),
            &["topic"],
        )?;
        registry.register(Box::new(events_publish_failures.clone()))?;

        let event_publish_duration = HistogramVec::new(
            HistogramOpts::new("event_publish_duration_seconds", "Event publish duration including retries")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["topic"],
        )?;
        registry.register(Box::new(event_publish_duration.clone()))?;

        // Retry Metrics
        let retry_attempts_total = IntCounterVec::new(
            Opts::new("retry_attempts_total", "Total retry attempts"),
            &["operation", "attempt"],
        )?;
        registry.register(Box::new(retry_attempts_total.clone()))?;

        let retry_success = IntCounterVec::new(
            Opts::new("retry_success_total", "Total successful retries"),
            &["operation"],
        )?;
        registry.register(Box::new(retry_success.clone()))?;

        let retry_failure = IntCounterVec::new(
            Opts::new("retry_failure_total", "Total failed retries after all attempts"),
            &["operation"],
        )?;
        registry.register(Box::new(retry_failure.clone()))?;

        // Circuit Breaker Metrics
        let circuit_breaker_state = IntGauge::new(
            "circuit_breaker_state",
            "Circuit breaker state (0=Closed, 1=Open, 2=HalfOpen)",
        )?;
        registry.register(Box::new(circuit_breaker_state.clone()))?;

        Ok(Self {
            registry,
            orders_created,
            order_create_failures,
            orders_listed,
            order_list_failures,
            events_published,
            events_publish_failures,
            event_publish_duration,
            retry_attempts_total,
            retry_success,
            retry_failure,
            circuit_breaker_state,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_order_created(&self) {
        self.orders_created.inc();
    }

    /// `kind` is the use case error kind (validation, persistence)
    pub fn record_order_create_failure(&self, kind: &str) {
        self.order_create_failures.with_label_values(&[kind]).inc();
    }

    pub fn record_order_list(&self, success: bool) {
        if success {
            self.orders_listed.inc();
        } else {
            self.order_list_failures.inc();
        }
    }

    /// Helper to record a broker publish
    pub fn record_publish(&self, topic: &str, duration_secs: f64, success: bool) {
        if success {
            self.events_published.with_label_values(&[topic]).inc();
        } else {
            self.events_publish_failures.with_label_values(&[topic]).inc();
        }
        self.event_publish_duration.with_label_values(&[topic]).observe(duration_secs);
    }

    /// Helper to record retry attempt
    pub fn record_retry_attempt(&self, operation: &str, attempt: u32) {
        self.retry_attempts_total.with_label_values(&[operation, &attempt.to_string()]).inc();
    }

    /// Helper to record retry outcome
    pub fn record_retry_outcome(&self, operation: &str, success: bool) {
        if success {
            self.retry_success.with_label_values(&[operation]).inc();
        } else {
            self.retry_failure.with_label_values(&[operation]).inc();
        }
    }

    /// Helper to update circuit breaker state
    pub fn update_circuit_breaker_state(&self, state: u8) {
        self.circuit_breaker_state.set(state as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        metrics.record_order_created();
        assert!(!metrics.registry.gather().is_empty());
    }

    #[test]
    fn test_record_order_outcomes() {
        let metrics = Metrics::new().unwrap();
        metrics.record_order_created();
        metrics.record_order_created();
        metrics.record_order_create_failure("validation");
        metrics.record_order_list(true);
        metrics.record_order_list(false);

        assert_eq!(metrics.orders_created.get(), 2);
        assert_eq!(metrics.order_create_failures.with_label_values(&["validation"]).get(), 1);
        assert_eq!(metrics.orders_listed.get(), 1);
        assert_eq!(metrics.order_list_failures.get(), 1);
    }

    #[test]
    fn test_record_publish() {
        let metrics = Metrics::new().unwrap();
        metrics.record_publish("order-events", 0.05, true);

        let gathered = metrics.registry.gather();
        let published = gathered.iter().find(|m| m.name() == "events_published_total").unwrap();
        assert_eq!(published.metric[0].counter.value, Some(1.0));
    }

    #[test]
    fn test_record_retry() {
        let metrics = Metrics::new().unwrap();
        metrics.record_retry_attempt("order_created_publish", 1);
        metrics.record_retry_attempt("order_created_publish", 2);
        metrics.record_retry_outcome("order_created_publish", true);

        let gathered = metrics.registry.gather();
        let attempts = gathered.iter().find(|m| m.name() == "retry_attempts_total").unwrap();
        assert_eq!(attempts.metric.len(), 2); // Two different attempt labels
    }

    #[test]
    fn test_circuit_breaker_metrics() {
        let metrics = Metrics::new().unwrap();
        metrics.update_circuit_breaker_state(1); // Open

        assert_eq!(metrics.circuit_breaker_state.get(), 1);
    }
}
