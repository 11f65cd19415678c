use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order::{Order, OrderCreated};

// ============================================================================
// Use Case DTOs
// ============================================================================
//
// Transport-neutral shapes crossing the use case boundary. Adapters build
// the input and render the output in whatever wire format they speak.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderInputDto {
    pub id: String,
    pub price: Decimal,
    pub tax: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderOutputDto {
    pub id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub final_price: Decimal,
}

impl From<&Order> for OrderOutputDto {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id().to_string(),
            price: order.price(),
            tax: order.tax(),
            final_price: order.final_price(),
        }
    }
}

impl From<&OrderOutputDto> for OrderCreated {
    fn from(dto: &OrderOutputDto) -> Self {
        Self {
            id: dto.id.clone(),
            price: dto.price,
            tax: dto.tax,
            final_price: dto.final_price,
        }
    }
}
