// ============================================================================
// Order System
// ============================================================================
//
// Layers, inside out:
// - domain/   - Order entity, validation, OrderCreated, repository port
// - events/   - envelope + dispatcher abstractions
// - usecase/  - CreateOrder / ListOrders, transport-agnostic
// - infra/    - storage, broker and HTTP adapters
//
// ============================================================================

pub mod config;
pub mod domain;
pub mod events;
pub mod infra;
pub mod metrics;
pub mod usecase;
pub mod utils;
