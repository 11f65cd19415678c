// ============================================================================
// HTTP Adapter (actix-web)
// ============================================================================
//
// Translates JSON requests into use case DTOs and use case results into
// status codes:
// - validation error  -> 400
// - persistence error -> 500
// - retrieval error   -> 500
//
// ============================================================================

mod handlers;

use actix_web::web;

use crate::metrics::{health_handler, metrics_handler};
use crate::usecase::{CreateOrderUseCase, ListOrdersUseCase};

pub struct AppState {
    pub create_order: CreateOrderUseCase,
    pub list_orders: ListOrdersUseCase,
}

/// Mount order, metrics and health routes. Expects `web::Data<AppState>`
/// and `web::Data<Arc<Metrics>>` as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/order", web::post().to(handlers::create_order))
        .route("/order", web::get().to(handlers::list_orders))
        .route("/metrics", web::get().to(metrics_handler))
        .route("/health", web::get().to(health_handler));
}
