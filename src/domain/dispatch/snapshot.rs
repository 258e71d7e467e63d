use serde::{Deserialize, Serialize};
use std::fmt;

use super::value_objects::{IncidentId, OrderId};

/// Read-only aggregate view of the ledger at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotView {
    pub pending_order_count: usize,
    /// Front of the admission queue first
    pub pending_orders: Vec<String>,

    pub dispatched_order_count: usize,
    /// Dispatch order
    pub dispatched_orders: Vec<String>,
    pub last_dispatched: Option<OrderId>,

    pub pending_incident_count: usize,
    /// Top of the backlog first
    pub pending_incidents: Vec<String>,

    pub processed_incident_count: usize,
    /// Processing order
    pub processed_incidents: Vec<String>,
    pub last_processed: Option<IncidentId>,
}

/// Counts only; what a caller prints on exit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub pending_orders: usize,
    pub dispatched_orders: usize,
    pub pending_incidents: usize,
    pub processed_incidents: usize,
}

impl SnapshotView {
    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            pending_orders: self.pending_order_count,
            dispatched_orders: self.dispatched_order_count,
            pending_incidents: self.pending_incident_count,
            processed_incidents: self.processed_incident_count,
        }
    }
}

fn write_section(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    count: usize,
    lines: &[String],
    empty: &str,
) -> fmt::Result {
    writeln!(f, "{}: {}", title, count)?;
    if lines.is_empty() {
        writeln!(f, "  {}", empty)?;
    }
    for line in lines {
        writeln!(f, "  {}", line)?;
    }
    Ok(())
}

fn or_none<T: fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map_or_else(|| "none".to_string(), ToString::to_string)
}

impl fmt::Display for SnapshotView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_section(f, "Pending orders", self.pending_order_count, &self.pending_orders, "No pending orders")?;
        write_section(f, "Dispatched orders", self.dispatched_order_count, &self.dispatched_orders, "No dispatched orders")?;
        writeln!(f, "Last dispatched: {}", or_none(&self.last_dispatched))?;
        write_section(f, "Pending incidents", self.pending_incident_count, &self.pending_incidents, "No pending incidents")?;
        write_section(f, "Processed incidents", self.processed_incident_count, &self.processed_incidents, "No processed incidents")?;
        write!(f, "Last processed: {}", or_none(&self.last_processed))
    }
}

impl fmt::Display for LedgerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pending={} dispatched={} pending_incidents={} processed_incidents={}",
            self.pending_orders, self.dispatched_orders, self.pending_incidents, self.processed_incidents
        )
    }
}
