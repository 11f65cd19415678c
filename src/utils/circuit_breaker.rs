use std::sync::Arc;
use tokio::sync::Mutex;
use std::time::{Duration, Instant};

// ============================================================================
// Circuit Breaker
// ============================================================================
//
// Stops calling a failing dependency for a while instead of piling up
// timeouts on every request.
//
// States:
// - Closed: calls pass through, consecutive failures are counted
// - Open: calls fail fast until `timeout` has elapsed
// - HalfOpen: calls pass through; `success_threshold` successes close the
//   circuit, any failure reopens it
//
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

impl CircuitState {
    /// Value exported on the circuit_breaker_state gauge
    pub fn as_gauge(&self) -> u8 {
        match self {
            CircuitState::Closed => 0,
            CircuitState::Open => 1,
            CircuitState::HalfOpen => 2,
        }
    }
}

#[derive(Clone, Debug)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures before opening circuit
    pub failure_threshold: u32,
    /// Time to stay open before probing again
    pub timeout: Duration,
    /// Successes needed to close circuit from half-open
    pub success_threshold: u32,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            timeout: Duration::from_secs(60),
            success_threshold: 2,
        }
    }
}

struct Inner {
    state: CircuitState,
    failure_count: u32,
    success_count: u32,
    opened_at: Option<Instant>,
}

impl Inner {
    fn transition(&mut self, to: CircuitState) {
        if self.state != to {
            tracing::info!(from = ?self.state, to = ?to, "Circuit breaker state change");
        }
        self.state = to;
        self.success_count = 0;
        match to {
            CircuitState::Open => self.opened_at = Some(Instant::now()),
            CircuitState::Closed => {
                self.failure_count = 0;
                self.opened_at = None;
            }
            CircuitState::HalfOpen => {}
        }
    }
}

#[derive(Clone)]
pub struct CircuitBreaker {
    inner: Arc<Mutex<Inner>>,
    config: CircuitBreakerConfig,
}

impl CircuitBreaker {
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state: CircuitState::Closed,
                failure_count: 0,
                success_count: 0,
                opened_at: None,
            })),
            config,
        }
    }

    /// Run `operation` unless the circuit is open
    pub async fn call<F, T, E>(&self, operation: F) -> Result<T, CircuitBreakerError<E>>
    where
        F: std::future::Future<Output = Result<T, E>>,
    {
        {
            let mut inner = self.inner.lock().await;
            if inner.state == CircuitState::Open {
                let cooled_down = inner
                    .opened_at
                    .map(|at| at.elapsed() >= self.config.timeout)
                    .unwrap_or(true);
                if !cooled_down {
                    return Err(CircuitBreakerError::CircuitOpen);
                }
                inner.transition(CircuitState::HalfOpen);
            }
        }

        let result = operation.await;

        let mut inner = self.inner.lock().await;
        match result {
            Ok(value) => {
                match inner.state {
                    CircuitState::HalfOpen => {
                        inner.success_count += 1;
                        if inner.success_count >= self.config.success_threshold {
                            inner.transition(CircuitState::Closed);
                        }
                    }
                    // Another caller may have opened it meanwhile; leave that decision alone
                    CircuitState::Closed | CircuitState::Open => inner.failure_count = 0,
                }
                Ok(value)
            }
            Err(err) => {
                inner.failure_count += 1;
                match inner.state {
                    CircuitState::Closed if inner.failure_count >= self.config.failure_threshold => {
                        tracing::warn!(failures = inner.failure_count, "Circuit breaker opening");
                        inner.transition(CircuitState::Open);
                    }
                    CircuitState::HalfOpen => {
                        tracing::warn!("Failure while half-open, reopening circuit");
                        inner.transition(CircuitState::Open);
                    }
                    _ => {}
                }
                Err(CircuitBreakerError::OperationFailed(err))
            }
        }
    }

    pub async fn get_state(&self) -> CircuitState {
        self.inner.lock().await.state
    }
}

#[derive(Debug)]
pub enum CircuitBreakerError<E> {
    CircuitOpen,
    OperationFailed(E),
}

impl<E: std::fmt::Display> std::fmt::Display for CircuitBreakerError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CircuitBreakerError::CircuitOpen => write!(f, "Circuit breaker is open"),
            CircuitBreakerError::OperationFailed(e) => write!(f, "Operation failed: {}", e),
        }
    }
}

impl<E: std::error::Error> std::error::Error for CircuitBreakerError<E> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn breaker(failures: u32, timeout_ms: u64, successes: u32) -> CircuitBreaker {
        CircuitBreaker::new(CircuitBreakerConfig {
            failure_threshold: failures,
            timeout: Duration::from_millis(timeout_ms),
            success_threshold: successes,
        })
    }

    async fn fail(cb: &CircuitBreaker) {
        let _ = cb.call(async { Err::<(), _>("broker down") }).await;
    }

    #[tokio::test]
    async fn test_opens_after_threshold_and_fails_fast() {
        let cb = breaker(3, 10_000, 1);

        for _ in 0..3 {
            fail(&cb).await;
        }
        assert_eq!(cb.get_state().await, CircuitState::Open);

        let result = cb.call(async { Ok::<_, &str>("sent") }).await;
        assert!(matches!(result, Err(CircuitBreakerError::CircuitOpen)));
    }

    #[tokio::test]
    async fn test_success_resets_consecutive_failures() {
        let cb = breaker(3, 10_000, 1);

        fail(&cb).await;
        fail(&cb).await;
        cb.call(async { Ok::<_, &str>(()) }).await.unwrap();
        fail(&cb).await;
        fail(&cb).await;

        assert_eq!(cb.get_state().await, CircuitState::Closed);
    }

    #[tokio::test]
    async fn test_half_open_closes_after_successes() {
        let cb = breaker(1, 50, 2);
        fail(&cb).await;
        assert_eq!(cb.get_state().await, CircuitState::Open);

        tokio::time::sleep(Duration::from_millis(80)).await;

        cb.call(async { Ok::<_, &str>(()) }).await.unwrap();
        assert_eq!(cb.get_state().await, CircuitState::HalfOpen);

        cb.call(async { Ok::<_, &str>(()) }).await.unwrap();
        assert_eq!(cb.get_state().await, CircuitState::Closed);
    }

    #[tokio::test]
    async fn test_half_open_failure_reopens() {
        let cb = breaker(1, 50, 2);
        fail(&cb).await;
        tokio::time::sleep(Duration::from_millis(80)).await;

        fail(&cb).await;

        assert_eq!(cb.get_state().await, CircuitState::Open);
        let result = cb.call(async { Ok::<_, &str>(()) }).await;
        assert!(matches!(result, Err(CircuitBreakerError::CircuitOpen)));
    }

    #[test]
    fn test_gauge_values() {
        assert_eq!(CircuitState::Closed.as_gauge(), 0);
        assert_eq!(CircuitState::Open.as_gauge(), 1);
        assert_eq!(CircuitState::HalfOpen.as_gauge(), 2);
    }
}
