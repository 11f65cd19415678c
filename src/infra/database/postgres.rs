//! PostgreSQL order store.
//!
//! Uses dynamic queries (`sqlx::query`) so the crate builds without a
//! DATABASE_URL at compile time.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use crate::domain::order::{Order, OrderRepository, RepositoryError};

// NUMERIC(20, 4) holds Order's MAX_SCALE and twice MAX_AMOUNT without rounding
const CREATE_ORDERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS orders (
    seq BIGSERIAL NOT NULL,
    id VARCHAR(255) PRIMARY KEY,
    price NUMERIC(20, 4) NOT NULL,
    tax NUMERIC(20, 4) NOT NULL,
    final_price NUMERIC(20, 4) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)";

pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a pool of `max_connections` to `database_url`
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        tracing::info!(max_connections, "Connected to PostgreSQL");
        Ok(Self::new(pool))
    }

    /// Create the orders table when missing
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(CREATE_ORDERS_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Rebuild an order from a row. Goes through `Order::new`, so a stored
/// final_price that disagrees with price + tax is reported as corrupt.
fn order_from_row(row: &PgRow) -> Result<Order, RepositoryError> {
    let id: String = row.try_get("id")?;
    let price: Decimal = row.try_get("price")?;
    let tax: Decimal = row.try_get("tax")?;
    let stored_final: Decimal = row.try_get("final_price")?;

    let order = Order::new(id.clone(), price, tax)
        .map_err(|e| RepositoryError::Corrupt(format!("order {id}: {e}")))?;

    if order.final_price() != stored_final {
        return Err(RepositoryError::Corrupt(format!(
            "order {id}: stored final_price {stored_final} != {}",
            order.final_price()
        )));
    }

    Ok(order)
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        RepositoryError::Database(err.to_string())
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO orders (id, price, tax, final_price) VALUES ($1, $2, $3, $4)",
        )
        .bind(order.id())
        .bind(order.price())
        .bind(order.tax())
        .bind(order.final_price())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                tracing::debug!(order_id = %order.id(), "Inserted order row");
                Ok(())
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(RepositoryError::duplicate(order.id()))
            }
            Err(e) => {
                tracing::error!(order_id = %order.id(), error = %e, "Failed to insert order");
                Err(e.into())
            }
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Order, RepositoryError> {
        let row = sqlx::query("SELECT id, price, tax, final_price FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| RepositoryError::not_found(id))?;

        order_from_row(&row)
    }

    async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query("SELECT id, price, tax, final_price FROM orders ORDER BY seq")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(order_from_row).collect()
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?
            .try_get(0)?;

        Ok(count.max(0) as u64)
    }
}
