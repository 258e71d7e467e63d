use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::value_objects::{IncidentId, IncidentKind, IncidentStatus, OrderId, OrderStatus};

// ============================================================================
// Dispatch Records
// ============================================================================
//
// Identity and customer data are fixed at creation. Status only moves
// through DispatchLedger transitions, so it is crate-private.
//
// ============================================================================

const DISPLAY_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

fn local_timestamp(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format(DISPLAY_TIMESTAMP).to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub box_count: u32,
    pub created_at: DateTime<Utc>,
    pub(crate) status: OrderStatus,
}

impl Order {
    pub(crate) fn new(
        order_id: OrderId,
        customer_first_name: String,
        customer_last_name: String,
        box_count: u32,
    ) -> Self {
        Self {
            order_id,
            customer_first_name,
            customer_last_name,
            box_count,
            created_at: Utc::now(),
            status: OrderStatus::Pending,
        }
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} - Boxes:{} - {} - Status:{}",
            self.order_id,
            self.customer_first_name,
            self.customer_last_name,
            self.box_count,
            local_timestamp(&self.created_at),
            self.status,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub incident_id: IncidentId,
    pub kind: IncidentKind,
    /// Non-owning reference; the ledger owns the order
    pub order_id: OrderId,
    pub reason: String,
    pub created_at: DateTime<Utc>,
    pub(crate) status: IncidentStatus,
}

impl Incident {
    pub(crate) fn new(
        incident_id: IncidentId,
        kind: IncidentKind,
        order_id: OrderId,
        reason: String,
    ) -> Self {
        Self {
            incident_id,
            kind,
            order_id,
            reason,
            created_at: Utc::now(),
            status: IncidentStatus::Pending,
        }
    }

    pub fn status(&self) -> IncidentStatus {
        self.status
    }
}

impl fmt::Display for Incident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] Kind:{} - Order:{} - Reason:{} - {} - Status:{}",
            self.incident_id,
            self.kind,
            self.order_id,
            self.reason,
            local_timestamp(&self.created_at),
            self.status,
        )
    }
}
