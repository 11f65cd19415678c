use actix_web::{web, HttpResponse};
use serde_json::json;
use std::sync::Arc;

use crate::metrics::Metrics;
use crate::usecase::{OrderInputDto, UseCaseError};

use super::AppState;

/// POST /order
pub async fn create_order(
    state: web::Data<AppState>,
    metrics: web::Data<Arc<Metrics>>,
    body: web::Json<OrderInputDto>,
) -> HttpResponse {
    let input = body.into_inner();
    let order_id = input.id.clone();

    match state.create_order.execute(input).await {
        Ok(output) => {
            metrics.record_order_created();
            HttpResponse::Created().json(output)
        }
        Err(e) => {
            metrics.record_order_create_failure(e.kind());
            tracing::warn!(order_id = %order_id, kind = e.kind(), error = %e, "Create order failed");
            error_response(&e)
        }
    }
}

/// GET /order
pub async fn list_orders(
    state: web::Data<AppState>,
    metrics: web::Data<Arc<Metrics>>,
) -> HttpResponse {
    match state.list_orders.execute().await {
        Ok(orders) => {
            metrics.record_order_list(true);
            HttpResponse::Ok().json(orders)
        }
        Err(e) => {
            metrics.record_order_list(false);
            tracing::error!(error = %e, "List orders failed");
            error_response(&e)
        }
    }
}

fn error_response(err: &UseCaseError) -> HttpResponse {
    match err {
        UseCaseError::Validation(v) => {
            let violations: Vec<&str> = v.violations().iter().map(|x| x.as_str()).collect();
            HttpResponse::BadRequest().json(json!({
                "error": err.to_string(),
                "violations": violations,
            }))
        }
        UseCaseError::Persistence(_) | UseCaseError::Retrieval(_) => {
            HttpResponse::InternalServerError().json(json!({
                "error": err.to_string(),
            }))
        }
    }
}
