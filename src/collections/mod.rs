// ============================================================================
// Sequence Containers
// ============================================================================
//
// FIFO admission queue and LIFO incident backlog. Ordering only;
// the transition rules that couple them live in the DispatchLedger.
//
// ============================================================================

mod queue;
mod stack;

pub use queue::AdmissionQueue;
pub use stack::IncidentBacklog;
