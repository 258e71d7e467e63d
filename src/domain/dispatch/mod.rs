// ============================================================================
// Dispatch Domain - Orders, Incidents and the Dispatch Ledger
// ============================================================================
//
// - Value objects (OrderId, IncidentId, statuses, IncidentKind)
// - Records (Order, Incident)
// - Events (OrderRegistered, OrderDispatched, ...)
// - Errors (DispatchError)
// - Snapshot (SnapshotView, LedgerSummary)
// - Ledger (DispatchLedger with the transition rules)
//
// ============================================================================

pub mod value_objects;
pub mod records;
pub mod events;
pub mod errors;
pub mod snapshot;
pub mod ledger;

// Re-export for convenience
pub use value_objects::*;
pub use records::*;
pub use events::*;
pub use errors::*;
pub use snapshot::*;
pub use ledger::*;
