// ============================================================================
// Event Infrastructure
// ============================================================================
//
// Generic, reusable event plumbing. Domain-specific payloads live in
// src/domain/.
//
// ============================================================================

mod dispatcher;
mod envelope;

pub use dispatcher::{DispatchError, EventDispatcher, EventHandler, InMemoryEventDispatcher};
pub use envelope::{serialize_event, DomainEvent, EventEnvelope};
