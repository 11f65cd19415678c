// ============================================================================
// Infrastructure Adapters
// ============================================================================
//
// - database/  - OrderRepository implementations (in-memory, PostgreSQL)
// - messaging/ - broker client and the OrderCreated publishing handler
// - web/       - actix-web routes over the use cases
//
// ============================================================================

pub mod database;
pub mod messaging;
pub mod web;
