use serde::{Deserialize, Serialize};

use crate::event_sourcing::DomainEvent;
use super::value_objects::{IncidentId, IncidentKind, OrderId};

// ============================================================================
// Dispatch Events - Facts recorded by the ledger
// ============================================================================

/// Dispatch Event - Union type for all ledger events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum DispatchEvent {
    OrderRegistered(OrderRegistered),
    OrderDispatched(OrderDispatched),
    IncidentRegistered(IncidentRegistered),
    IncidentProcessed(IncidentProcessed),
}

impl DispatchEvent {
    /// Name used as the envelope's event type
    pub fn name(&self) -> &'static str {
        match self {
            DispatchEvent::OrderRegistered(_) => OrderRegistered::event_type(),
            DispatchEvent::OrderDispatched(_) => OrderDispatched::event_type(),
            DispatchEvent::IncidentRegistered(_) => IncidentRegistered::event_type(),
            DispatchEvent::IncidentProcessed(_) => IncidentProcessed::event_type(),
        }
    }
}

impl DomainEvent for DispatchEvent {
    fn event_type() -> &'static str { "DispatchEvent" }
}

// ============================================================================
// Individual Event Types
// ============================================================================

/// Order Registered - order admitted to the queue
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderRegistered {
    pub order_id: OrderId,
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub box_count: u32,
}

impl DomainEvent for OrderRegistered {
    fn event_type() -> &'static str { "OrderRegistered" }
}

/// Order Dispatched - order left the admission queue
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderDispatched {
    pub order_id: OrderId,
}

impl DomainEvent for OrderDispatched {
    fn event_type() -> &'static str { "OrderDispatched" }
}

/// Incident Registered - return or cancellation opened against an order
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct IncidentRegistered {
    pub incident_id: IncidentId,
    pub kind: IncidentKind,
    pub order_id: OrderId,
    pub reason: String,
}

impl DomainEvent for IncidentRegistered {
    fn event_type() -> &'static str { "IncidentRegistered" }
}

/// Incident Processed - incident resolved and its order closed
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct IncidentProcessed {
    pub incident_id: IncidentId,
    pub order_id: OrderId,
}

impl DomainEvent for IncidentProcessed {
    fn event_type() -> &'static str { "IncidentProcessed" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let event = DispatchEvent::OrderDispatched(OrderDispatched {
            order_id: OrderId::new("Order-0001"),
        });
        assert_eq!(event.name(), "OrderDispatched");
    }

    #[test]
    fn test_event_is_tagged_in_json() {
        let event = DispatchEvent::IncidentProcessed(IncidentProcessed {
            incident_id: IncidentId::new("ab12cd34"),
            order_id: OrderId::new("Order-0001"),
        });

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "IncidentProcessed");
        assert_eq!(json["data"]["order_id"], "Order-0001");
    }
}
