mod order_created_publisher;
mod redpanda;

pub use order_created_publisher::{OrderCreatedPublisher, HANDLER_NAME as ORDER_CREATED_PUBLISHER};
pub use redpanda::{MessagePublisher, RedpandaClient};
