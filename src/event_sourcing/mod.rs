// ============================================================================
// Event Sourcing Infrastructure
// ============================================================================
//
// Generic event envelope and in-memory journal.
// Domain-specific events live in src/domain/
//
// ============================================================================

mod event;
mod journal;

pub use event::{DomainEvent, EventEnvelope, serialize_event};
pub use journal::EventJournal;
