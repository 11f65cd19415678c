use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use order_system::config::{Config, StorageConfig};
use order_system::domain::order::{OrderCreated, OrderRepository};
use order_system::events::{DomainEvent, EventDispatcher, InMemoryEventDispatcher};
use order_system::infra::database::{InMemoryOrderRepository, PgOrderRepository};
use order_system::infra::messaging::{OrderCreatedPublisher, RedpandaClient};
use order_system::infra::web::{self as http, AppState};
use order_system::metrics::Metrics;
use order_system::usecase::{CreateOrderUseCase, ListOrdersUseCase};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,order_system=debug"))
        )
        .init();

    tracing::info!("🚀 Starting order system");

    let config = Config::from_env()?;

    // === 1. Storage ===
    let repository: Arc<dyn OrderRepository> = match &config.storage {
        StorageConfig::Memory => {
            tracing::info!("Using in-memory order storage");
            Arc::new(InMemoryOrderRepository::new())
        }
        StorageConfig::Postgres { database_url, max_connections } => {
            tracing::info!("Connecting to PostgreSQL...");
            let repo = PgOrderRepository::connect(database_url, *max_connections).await?;
            repo.ensure_schema().await?;
            Arc::new(repo)
        }
    };
    let existing = repository.count().await?;
    tracing::info!(orders = existing, "Order storage ready");

    // === 2. Metrics ===
    let metrics = Arc::new(Metrics::new()?);
    tracing::info!("📊 Metrics registry created with {} metrics", metrics.registry().gather().len());

    // === 3. Event dispatcher + broker publishing ===
    let dispatcher = Arc::new(InMemoryEventDispatcher::<OrderCreated>::new());
    match &config.redpanda {
        Some(redpanda) => {
            let client = Arc::new(RedpandaClient::new(&redpanda.brokers)?);
            let publisher = OrderCreatedPublisher::new(client, redpanda.topic.clone(), metrics.clone());
            dispatcher
                .register(OrderCreated::event_type(), Arc::new(publisher))
                .await?;
            tracing::info!(topic = %redpanda.topic, "OrderCreated events will be published");
        }
        None => {
            tracing::warn!("ORDERS_REDPANDA_BROKERS not set; OrderCreated events are not published");
        }
    }

    // === 4. Use cases ===
    let state = web::Data::new(AppState {
        create_order: CreateOrderUseCase::new(repository.clone(), dispatcher.clone()),
        list_orders: ListOrdersUseCase::new(repository.clone()),
    });
    let metrics_data = web::Data::new(metrics.clone());

    // === 5. HTTP ===
    tracing::info!(
        "🌐 Listening on http://{}:{} (POST/GET /order, /metrics, /health)",
        config.http.host,
        config.http.port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(metrics_data.clone())
            .configure(http::configure)
    })
    .bind((config.http.host.as_str(), config.http.port))?
    .run()
    .await?;

    tracing::info!("👋 Order system stopped");
    Ok(())
}
