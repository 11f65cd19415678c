use std::sync::Arc;

use crate::domain::order::OrderRepository;

use super::dto::OrderOutputDto;
use super::error::UseCaseError;

// ============================================================================
// ListOrders Use Case
// ============================================================================

pub struct ListOrdersUseCase {
    repository: Arc<dyn OrderRepository>,
}

impl ListOrdersUseCase {
    pub fn new(repository: Arc<dyn OrderRepository>) -> Self {
        Self { repository }
    }

    /// Orders in the repository's own order; an empty store yields an empty list
    pub async fn execute(&self) -> Result<Vec<OrderOutputDto>, UseCaseError> {
        let orders = self
            .repository
            .list()
            .await
            .map_err(UseCaseError::Retrieval)?;

        tracing::debug!(count = orders.len(), "Listed orders");

        Ok(orders.iter().map(OrderOutputDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{Order, RepositoryError};
    use crate::infra::database::InMemoryOrderRepository;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    struct BrokenRepository;

    #[async_trait]
    impl OrderRepository for BrokenRepository {
        async fn save(&self, _order: &Order) -> Result<(), RepositoryError> {
            Err(RepositoryError::Database("down".to_string()))
        }

        async fn find_by_id(&self, id: &str) -> Result<Order, RepositoryError> {
            Err(RepositoryError::not_found(id))
        }

        async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
            Err(RepositoryError::Database("down".to_string()))
        }

        async fn count(&self) -> Result<u64, RepositoryError> {
            Err(RepositoryError::Database("down".to_string()))
        }
    }

    #[tokio::test]
    async fn test_empty_store_returns_empty_list() {
        let use_case = ListOrdersUseCase::new(Arc::new(InMemoryOrderRepository::new()));

        let orders = use_case.execute().await.unwrap();

        assert!(orders.is_empty());
    }

    #[tokio::test]
    async fn test_list_preserves_storage_order() {
        let repository = Arc::new(InMemoryOrderRepository::new());
        repository.save(&Order::new("O1", dec!(100), dec!(10)).unwrap()).await.unwrap();
        repository.save(&Order::new("O2", dec!(50), dec!(5)).unwrap()).await.unwrap();

        let use_case = ListOrdersUseCase::new(repository);
        let orders = use_case.execute().await.unwrap();

        assert_eq!(
            orders,
            vec![
                OrderOutputDto {
                    id: "O1".to_string(),
                    price: dec!(100),
                    tax: dec!(10),
                    final_price: dec!(110),
                },
                OrderOutputDto {
                    id: "O2".to_string(),
                    price: dec!(50),
                    tax: dec!(5),
                    final_price: dec!(55),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_list_does_not_sort() {
        let repository = Arc::new(InMemoryOrderRepository::new());
        for id in ["Z9", "A1", "M5"] {
            repository.save(&Order::new(id, dec!(1), dec!(0)).unwrap()).await.unwrap();
        }

        let orders = ListOrdersUseCase::new(repository).execute().await.unwrap();
        let ids: Vec<&str> = orders.iter().map(|o| o.id.as_str()).collect();

        assert_eq!(ids, vec!["Z9", "A1", "M5"]);
    }

    #[tokio::test]
    async fn test_retrieval_error_propagates() {
        let use_case = ListOrdersUseCase::new(Arc::new(BrokenRepository));

        let err = use_case.execute().await.unwrap_err();

        assert!(matches!(err, UseCaseError::Retrieval(RepositoryError::Database(_))));
        assert_eq!(err.kind(), "retrieval");
    }
}
