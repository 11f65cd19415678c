// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Entities, their rules, the events they raise and the storage ports they
// need. Completely separate from transport and infrastructure code.
//
// ============================================================================

pub mod order;
