// ============================================================================
// Actors Module
// ============================================================================
//
// Message-based surface over the dispatch ledger for multiple callers.
// Business rules stay in the DispatchLedger; the actor only serializes access.
//
// ============================================================================

mod ledger_actor;

pub use ledger_actor::{
    DispatchNext, ExportHistory, GetHistory, GetSnapshot, LedgerActor, ProcessNextIncident, RegisterIncident,
    RegisterOrder,
};
