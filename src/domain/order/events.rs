use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::events::DomainEvent;
use super::entity::Order;

// ============================================================================
// Order Events - Domain Events for Order Entity
// ============================================================================

/// Order Created - raised once an order has been durably saved
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderCreated {
    pub id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub final_price: Decimal,
}

impl DomainEvent for OrderCreated {
    fn event_type() -> &'static str { "OrderCreated" }
    fn event_version() -> i32 { 1 }
}

impl From<&Order> for OrderCreated {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id().to_string(),
            price: order.price(),
            tax: order.tax(),
            final_price: order.final_price(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_created_mirrors_order() {
        let order = Order::new("O1", dec!(100), dec!(10)).unwrap();
        let event = OrderCreated::from(&order);

        assert_eq!(event.id, "O1");
        assert_eq!(event.price, dec!(100));
        assert_eq!(event.tax, dec!(10));
        assert_eq!(event.final_price, dec!(110));
        assert_eq!(OrderCreated::event_type(), "OrderCreated");
    }

    #[test]
    fn test_order_created_serializes_numbers() {
        let order = Order::new("O2", dec!(50), dec!(5)).unwrap();
        let json = serde_json::to_value(OrderCreated::from(&order)).unwrap();

        assert_eq!(json["id"], "O2");
        assert_eq!(json["final_price"], serde_json::json!(55.0));
    }
}
