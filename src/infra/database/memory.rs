//! In-memory order store
//!
//! Used for tests and for running without a database.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::order::{Order, OrderRepository, RepositoryError};

#[derive(Default)]
struct Inner {
    /// Insertion order
    orders: Vec<Order>,
    index: HashMap<String, usize>,
}

/// Insertion-ordered, concurrency-safe order store
#[derive(Default)]
pub struct InMemoryOrderRepository {
    inner: RwLock<Inner>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().await;

        if inner.index.contains_key(order.id()) {
            return Err(RepositoryError::duplicate(order.id()));
        }

        let position = inner.orders.len();
        inner.index.insert(order.id().to_string(), position);
        inner.orders.push(order.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Order, RepositoryError> {
        let inner = self.inner.read().await;
        inner
            .index
            .get(id)
            .map(|&position| inner.orders[position].clone())
            .ok_or_else(|| RepositoryError::not_found(id))
    }

    async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        Ok(self.inner.read().await.orders.clone())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(self.inner.read().await.orders.len() as u64)
    }
}
