use async_trait::async_trait;
use futures_util::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use super::envelope::EventEnvelope;

// ============================================================================
// Event Dispatcher - Named Events to Registered Handlers
// ============================================================================
//
// Handlers are registered per event name at wiring time. Dispatch fans an
// envelope out to every handler registered under its `event_type`, runs
// them concurrently and waits for all of them. No retries happen here;
// a handler that wants retries does them itself.
//
// ============================================================================

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Handler '{handler}' already registered for event '{event_type}'")]
    HandlerAlreadyRegistered { event_type: String, handler: String },

    #[error("Handlers failed for event '{event_type}': {}", .handlers.join(", "))]
    HandlersFailed { event_type: String, handlers: Vec<String> },
}

/// Reacts to dispatched events. `name` identifies the handler within an event.
#[async_trait]
pub trait EventHandler<E>: Send + Sync {
    fn name(&self) -> &str;

    async fn handle(&self, event: &EventEnvelope<E>) -> anyhow::Result<()>;
}

#[async_trait]
pub trait EventDispatcher<E: Send + Sync + 'static>: Send + Sync {
    async fn register(
        &self,
        event_type: &str,
        handler: Arc<dyn EventHandler<E>>,
    ) -> Result<(), DispatchError>;

    async fn dispatch(&self, event: &EventEnvelope<E>) -> Result<(), DispatchError>;

    async fn has(&self, event_type: &str, handler_name: &str) -> bool;

    /// Returns true when a handler was removed
    async fn remove(&self, event_type: &str, handler_name: &str) -> bool;

    async fn clear(&self);
}

type HandlerMap<E> = HashMap<String, Vec<Arc<dyn EventHandler<E>>>>;

/// In-process dispatcher
pub struct InMemoryEventDispatcher<E> {
    handlers: RwLock<HandlerMap<E>>,
}

impl<E> InMemoryEventDispatcher<E> {
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }
}

impl<E> Default for InMemoryEventDispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Send + Sync + 'static> EventDispatcher<E> for InMemoryEventDispatcher<E> {
    async fn register(
        &self,
        event_type: &str,
        handler: Arc<dyn EventHandler<E>>,
    ) -> Result<(), DispatchError> {
        let mut handlers = self.handlers.write().await;
        let registered = handlers.entry(event_type.to_string()).or_default();

        if registered.iter().any(|h| h.name() == handler.name()) {
            return Err(DispatchError::HandlerAlreadyRegistered {
                event_type: event_type.to_string(),
                handler: handler.name().to_string(),
            });
        }

        tracing::debug!(
            event_type = %event_type,
            handler = %handler.name(),
            "Registered event handler"
        );
        registered.push(handler);
        Ok(())
    }

    async fn dispatch(&self, event: &EventEnvelope<E>) -> Result<(), DispatchError> {
        // Snapshot so handlers never run under the lock
        let handlers: Vec<Arc<dyn EventHandler<E>>> = {
            let map = self.handlers.read().await;
            match map.get(&event.event_type) {
                Some(list) => list.clone(),
                None => Vec::new(),
            }
        };

        if handlers.is_empty() {
            tracing::debug!(event_type = %event.event_type, "No handlers registered");
            return Ok(());
        }

        let results = join_all(handlers.iter().map(|h| h.handle(event))).await;

        let mut failed = Vec::new();
        for (handler, result) in handlers.iter().zip(results) {
            if let Err(e) = result {
                tracing::error!(
                    event_id = %event.event_id,
                    event_type = %event.event_type,
                    handler = %handler.name(),
                    error = %e,
                    "Event handler failed"
                );
                failed.push(handler.name().to_string());
            }
        }

        if failed.is_empty() {
            tracing::debug!(
                event_id = %event.event_id,
                event_type = %event.event_type,
                handler_count = handlers.len(),
                "Event dispatched"
            );
            Ok(())
        } else {
            Err(DispatchError::HandlersFailed {
                event_type: event.event_type.clone(),
                handlers: failed,
            })
        }
    }

    async fn has(&self, event_type: &str, handler_name: &str) -> bool {
        let handlers = self.handlers.read().await;
        handlers
            .get(event_type)
            .map(|list| list.iter().any(|h| h.name() == handler_name))
            .unwrap_or(false)
    }

    async fn remove(&self, event_type: &str, handler_name: &str) -> bool {
        let mut handlers = self.handlers.write().await;
        let Some(list) = handlers.get_mut(event_type) else {
            return false;
        };

        let before = list.len();
        list.retain(|h| h.name() != handler_name);
        let removed = list.len() != before;

        if list.is_empty() {
            handlers.remove(event_type);
        }
        removed
    }

    async fn clear(&self) {
        self.handlers.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct CountingHandler {
        name: String,
        calls: AtomicU32,
        fail: bool,
    }

    impl CountingHandler {
        fn new(name: &str) -> Arc<Self> {
            Arc::new(Self { name: name.to_string(), calls: AtomicU32::new(0), fail: false })
        }

        fn failing(name: &str) -> Arc<Self> {
            Arc::new(Self { name: name.to_string(), calls: AtomicU32::new(0), fail: true })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EventHandler<String> for CountingHandler {
        fn name(&self) -> &str {
            &self.name
        }

        async fn handle(&self, _event: &EventEnvelope<String>) -> anyhow::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("handler {} failed", self.name);
            }
            Ok(())
        }
    }

    fn envelope(name: &str) -> EventEnvelope<String> {
        EventEnvelope::named(name, "payload".to_string())
    }

    #[tokio::test]
    async fn test_register_and_has() {
        let dispatcher = InMemoryEventDispatcher::<String>::new();
        dispatcher.register("OrderCreated", CountingHandler::new("a")).await.unwrap();

        assert!(dispatcher.has("OrderCreated", "a").await);
        assert!(!dispatcher.has("OrderCreated", "b").await);
        assert!(!dispatcher.has("OrderShipped", "a").await);
    }

    #[tokio::test]
    async fn test_duplicate_registration_rejected() {
        let dispatcher = InMemoryEventDispatcher::<String>::new();
        dispatcher.register("OrderCreated", CountingHandler::new("a")).await.unwrap();

        let err = dispatcher
            .register("OrderCreated", CountingHandler::new("a"))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::HandlerAlreadyRegistered { .. }));

        // Same name under a different event is fine
        dispatcher.register("OrderShipped", CountingHandler::new("a")).await.unwrap();
    }

    #[tokio::test]
    async fn test_dispatch_reaches_only_matching_handlers() {
        let dispatcher = InMemoryEventDispatcher::<String>::new();
        let created_a = CountingHandler::new("a");
        let created_b = CountingHandler::new("b");
        let other = CountingHandler::new("c");

        dispatcher.register("OrderCreated", created_a.clone()).await.unwrap();
        dispatcher.register("OrderCreated", created_b.clone()).await.unwrap();
        dispatcher.register("Other", other.clone()).await.unwrap();

        dispatcher.dispatch(&envelope("OrderCreated")).await.unwrap();

        assert_eq!(created_a.calls(), 1);
        assert_eq!(created_b.calls(), 1);
        assert_eq!(other.calls(), 0);
    }

    #[tokio::test]
    async fn test_dispatch_without_handlers_is_ok() {
        let dispatcher = InMemoryEventDispatcher::<String>::new();
        assert!(dispatcher.dispatch(&envelope("OrderCreated")).await.is_ok());
    }

    #[tokio::test]
    async fn test_failed_handler_reported_others_still_run() {
        let dispatcher = InMemoryEventDispatcher::<String>::new();
        let ok = CountingHandler::new("ok");
        let bad = CountingHandler::failing("bad");

        dispatcher.register("OrderCreated", bad.clone()).await.unwrap();
        dispatcher.register("OrderCreated", ok.clone()).await.unwrap();

        let err = dispatcher.dispatch(&envelope("OrderCreated")).await.unwrap_err();
        match err {
            DispatchError::HandlersFailed { event_type, handlers } => {
                assert_eq!(event_type, "OrderCreated");
                assert_eq!(handlers, vec!["bad".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }

        assert_eq!(ok.calls(), 1);
        assert_eq!(bad.calls(), 1);
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let dispatcher = InMemoryEventDispatcher::<String>::new();
        let a = CountingHandler::new("a");
        dispatcher.register("OrderCreated", a.clone()).await.unwrap();
        dispatcher.register("OrderCreated", CountingHandler::new("b")).await.unwrap();

        assert!(dispatcher.remove("OrderCreated", "a").await);
        assert!(!dispatcher.remove("OrderCreated", "a").await);
        assert!(!dispatcher.has("OrderCreated", "a").await);
        assert!(dispatcher.has("OrderCreated", "b").await);

        dispatcher.dispatch(&envelope("OrderCreated")).await.unwrap();
        assert_eq!(a.calls(), 0);

        dispatcher.clear().await;
        assert!(!dispatcher.has("OrderCreated", "b").await);
    }
}
