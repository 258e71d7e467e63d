//! In-memory order dispatch tracker.
//!
//! Orders are admitted to a FIFO queue, dispatched in arrival order, and may
//! receive one return or cancellation incident. Incidents wait in a LIFO
//! backlog; processing one closes its order. [`DispatchLedger`] owns all of
//! that state, and [`actors::LedgerActor`] puts it behind a mailbox for
//! multiple callers.

pub mod actors;
pub mod collections;
pub mod config;
pub mod domain;
pub mod event_sourcing;
pub mod metrics;

pub use config::LedgerConfig;
pub use domain::dispatch::{
    DispatchError, DispatchLedger, ErrorCategory, Incident, IncidentId, IncidentKind,
    IncidentStatus, LedgerSummary, Order, OrderId, OrderStatus, SnapshotView,
};
pub use metrics::LedgerMetrics;
