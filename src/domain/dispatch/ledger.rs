use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::collections::{AdmissionQueue, IncidentBacklog};
use crate::config::LedgerConfig;
use crate::event_sourcing::{EventEnvelope, EventJournal};
use crate::metrics::LedgerMetrics;

use super::errors::{DispatchError, ErrorCategory};
use super::events::*;
use super::records::{Incident, Order};
use super::snapshot::SnapshotView;
use super::value_objects::{IncidentId, IncidentKind, IncidentStatus, OrderId, OrderStatus};

// ============================================================================
// Dispatch Ledger - Order / Incident State Machine
// ============================================================================
//
// Sole owner of the admission queue, the incident backlog and the keyed
// maps of dispatched orders and processed incidents.
//
// Every operation validates first and mutates last: a failed call leaves
// no trace in any collection, counter or the journal.
//
// ============================================================================

const MAX_INCIDENT_ID_ATTEMPTS: u32 = 64;

pub struct DispatchLedger {
    config: LedgerConfig,

    pending_orders: AdmissionQueue<Order>,
    dispatched: HashMap<OrderId, Order>,
    dispatch_sequence: Vec<OrderId>,
    last_dispatched: Option<OrderId>,

    pending_incidents: IncidentBacklog<Incident>,
    processed: HashMap<IncidentId, Incident>,
    processing_sequence: Vec<IncidentId>,
    last_processed: Option<IncidentId>,

    next_order_number: u64,
    journal: EventJournal<DispatchEvent>,
    metrics: Option<Arc<LedgerMetrics>>,
}

impl Default for DispatchLedger {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

impl DispatchLedger {
    pub fn new(config: LedgerConfig) -> Self {
        let config = config.normalized();
        let next_order_number = config.first_order_number;

        Self {
            config,
            pending_orders: AdmissionQueue::new(),
            dispatched: HashMap::new(),
            dispatch_sequence: Vec::new(),
            last_dispatched: None,
            pending_incidents: IncidentBacklog::new(),
            processed: HashMap::new(),
            processing_sequence: Vec::new(),
            last_processed: None,
            next_order_number,
            journal: EventJournal::new(),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<LedgerMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    /// Admit a new order at the tail of the queue with status PENDING
    pub fn register_order(
        &mut self,
        first_name: &str,
        last_name: &str,
        box_count: i64,
    ) -> Result<Order, DispatchError> {
        let first_name = first_name.trim();
        let last_name = last_name.trim();

        if first_name.is_empty() {
            return Err(self.rejected("register_order", DispatchError::EmptyFirstName));
        }
        if last_name.is_empty() {
            return Err(self.rejected("register_order", DispatchError::EmptyLastName));
        }
        let boxes = match u32::try_from(box_count) {
            Ok(n) if n > 0 => n,
            _ => return Err(self.rejected("register_order", DispatchError::InvalidBoxCount(box_count))),
        };

        let order_id = self.next_order_id();
        let order = Order::new(order_id.clone(), first_name.to_string(), last_name.to_string(), boxes);

        self.record(
            &order_id,
            DispatchEvent::OrderRegistered(OrderRegistered {
                order_id: order_id.clone(),
                customer_first_name: order.customer_first_name.clone(),
                customer_last_name: order.customer_last_name.clone(),
                box_count: boxes,
            }),
        );
        self.pending_orders.enqueue(order.clone());

        tracing::info!(
            order_id = %order_id,
            box_count = boxes,
            pending = self.pending_orders.len(),
            "Order registered"
        );
        self.observe(|m, ledger| {
            m.orders_registered.inc();
            m.set_depths(ledger.pending_orders.len(), ledger.pending_incidents.len());
        });

        Ok(order)
    }

    /// Dispatch the oldest pending order
    pub fn dispatch_next(&mut self) -> Result<Order, DispatchError> {
        let Some(mut order) = self.pending_orders.dequeue() else {
            return Err(self.rejected("dispatch_next", DispatchError::EmptyQueue));
        };

        order.status = OrderStatus::Dispatched;
        let order_id = order.order_id.clone();

        self.record(
            &order_id,
            DispatchEvent::OrderDispatched(OrderDispatched { order_id: order_id.clone() }),
        );
        self.dispatched.insert(order_id.clone(), order.clone());
        self.dispatch_sequence.push(order_id.clone());
        self.last_dispatched = Some(order_id.clone());

        tracing::info!(
            order_id = %order_id,
            pending = self.pending_orders.len(),
            dispatched = self.dispatched.len(),
            "Order dispatched"
        );
        self.observe(|m, ledger| {
            m.orders_dispatched.inc();
            m.set_depths(ledger.pending_orders.len(), ledger.pending_incidents.len());
        });

        Ok(order)
    }

    /// Open a return or cancellation against a dispatched order
    pub fn register_incident(
        &mut self,
        kind: IncidentKind,
        order_id: &OrderId,
        reason: &str,
    ) -> Result<Incident, DispatchError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(self.rejected("register_incident", DispatchError::EmptyReason));
        }

        let status = match self.dispatched.get(order_id) {
            Some(order) => order.status,
            None => {
                return Err(self.rejected("register_incident", DispatchError::OrderNotFound(order_id.clone())))
            }
        };
        match status {
            OrderStatus::Dispatched => {}
            OrderStatus::Closed => {
                return Err(self.rejected("register_incident", DispatchError::OrderAlreadyClosed(order_id.clone())))
            }
            OrderStatus::Returned | OrderStatus::Cancelled | OrderStatus::Pending => {
                return Err(self.rejected("register_incident", DispatchError::IncidentAlreadyOpen(order_id.clone())))
            }
        }

        let incident_id = match self.next_incident_id() {
            Ok(id) => id,
            Err(e) => return Err(self.rejected("register_incident", e)),
        };
        let incident = Incident::new(incident_id.clone(), kind, order_id.clone(), reason.to_string());

        self.record(
            order_id,
            DispatchEvent::IncidentRegistered(IncidentRegistered {
                incident_id: incident_id.clone(),
                kind,
                order_id: order_id.clone(),
                reason: incident.reason.clone(),
            }),
        );
        if let Some(order) = self.dispatched.get_mut(order_id) {
            order.status = kind.resulting_order_status();
        }
        self.pending_incidents.push(incident.clone());

        tracing::info!(
            incident_id = %incident_id,
            order_id = %order_id,
            kind = %kind,
            backlog = self.pending_incidents.len(),
            "Incident registered"
        );
        self.observe(|m, ledger| {
            m.incidents_registered.with_label_values(&[kind.as_str()]).inc();
            m.set_depths(ledger.pending_orders.len(), ledger.pending_incidents.len());
        });

        Ok(incident)
    }

    /// Process the most recently registered incident and close its order
    pub fn process_next_incident(&mut self) -> Result<(Incident, Order), DispatchError> {
        let Some(mut incident) = self.pending_incidents.pop() else {
            return Err(self.rejected("process_next_incident", DispatchError::EmptyBacklog));
        };
        let incident_id = incident.incident_id.clone();
        let order_id = incident.order_id.clone();

        let order = match self.dispatched.get_mut(&order_id) {
            Some(order) => {
                order.status = OrderStatus::Closed;
                order.clone()
            }
            None => {
                // Put it back so the failed call leaves the backlog as it was
                self.pending_incidents.push(incident);
                return Err(self.rejected(
                    "process_next_incident",
                    DispatchError::InternalConsistency { incident_id, order_id },
                ));
            }
        };

        incident.status = IncidentStatus::Processed;
        let kind = incident.kind;

        self.processed.insert(incident_id.clone(), incident.clone());
        self.processing_sequence.push(incident_id.clone());
        self.last_processed = Some(incident_id.clone());
        self.record(
            &order_id,
            DispatchEvent::IncidentProcessed(IncidentProcessed {
                incident_id: incident_id.clone(),
                order_id: order_id.clone(),
            }),
        );

        tracing::info!(
            incident_id = %incident_id,
            order_id = %order_id,
            backlog = self.pending_incidents.len(),
            "Incident processed, order closed"
        );
        self.observe(|m, ledger| {
            m.incidents_processed.with_label_values(&[kind.as_str()]).inc();
            m.set_depths(ledger.pending_orders.len(), ledger.pending_incidents.len());
        });

        Ok((incident, order))
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn snapshot(&self) -> SnapshotView {
        SnapshotView {
            pending_order_count: self.pending_orders.len(),
            pending_orders: self.pending_orders.list_all(),
            dispatched_order_count: self.dispatched.len(),
            dispatched_orders: self.dispatched_in_order().map(ToString::to_string).collect(),
            last_dispatched: self.last_dispatched.clone(),
            pending_incident_count: self.pending_incidents.len(),
            pending_incidents: self.pending_incidents.list_all(),
            processed_incident_count: self.processed.len(),
            processed_incidents: self.processed_in_order().map(ToString::to_string).collect(),
            last_processed: self.last_processed.clone(),
        }
    }

    /// Dispatched order by id (pending orders are not addressable)
    pub fn order(&self, order_id: &OrderId) -> Option<&Order> {
        self.dispatched.get(order_id)
    }

    /// Processed incident by id
    pub fn incident(&self, incident_id: &IncidentId) -> Option<&Incident> {
        self.processed.get(incident_id)
    }

    pub fn peek_next_order(&self) -> Option<&Order> {
        self.pending_orders.peek()
    }

    pub fn peek_next_incident(&self) -> Option<&Incident> {
        self.pending_incidents.peek()
    }

    pub fn pending_order_count(&self) -> usize {
        self.pending_orders.len()
    }

    pub fn pending_incident_count(&self) -> usize {
        self.pending_incidents.len()
    }

    pub fn last_dispatched(&self) -> Option<&OrderId> {
        self.last_dispatched.as_ref()
    }

    pub fn last_processed(&self) -> Option<&IncidentId> {
        self.last_processed.as_ref()
    }

    pub fn history(&self) -> &[EventEnvelope<DispatchEvent>] {
        self.journal.events()
    }

    /// Journaled events about one order, oldest first
    pub fn order_history(&self, order_id: &OrderId) -> Vec<EventEnvelope<DispatchEvent>> {
        self.journal.events_for(order_id.as_str()).cloned().collect()
    }

    /// Whole history as JSON lines
    pub fn export_history(&self) -> anyhow::Result<String> {
        self.journal.to_json_lines()
    }

    pub fn journal(&self) -> &EventJournal<DispatchEvent> {
        &self.journal
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn dispatched_in_order(&self) -> impl Iterator<Item = &Order> {
        self.dispatch_sequence.iter().filter_map(|id| self.dispatched.get(id))
    }

    fn processed_in_order(&self) -> impl Iterator<Item = &Incident> {
        self.processing_sequence.iter().filter_map(|id| self.processed.get(id))
    }

    fn next_order_id(&mut self) -> OrderId {
        let id = OrderId::new(self.config.format_order_id(self.next_order_number));
        self.next_order_number += 1;
        id
    }

    /// Draw a fresh token; gives up after `MAX_INCIDENT_ID_ATTEMPTS` collisions
    fn next_incident_id(&self) -> Result<IncidentId, DispatchError> {
        for _ in 0..MAX_INCIDENT_ID_ATTEMPTS {
            let token = Uuid::new_v4().simple().to_string();
            let id = IncidentId::new(&token[..self.config.incident_id_len]);
            let taken = self.processed.contains_key(&id)
                || self.pending_incidents.iter().any(|i| i.incident_id == id);
            if !taken {
                return Ok(id);
            }
            tracing::debug!(incident_id = %id, "Incident id collision, regenerating");
        }
        Err(DispatchError::IncidentIdsExhausted {
            attempts: MAX_INCIDENT_ID_ATTEMPTS,
        })
    }

    fn record(&mut self, order_id: &OrderId, event: DispatchEvent) {
        let name = event.name();
        self.journal.append(order_id.as_str(), name, event);
    }

    fn observe(&self, f: impl FnOnce(&LedgerMetrics, &Self)) {
        if let Some(metrics) = &self.metrics {
            f(metrics, self);
        }
    }

    /// Log and count a failed operation, handing the error back to the caller
    fn rejected(&self, operation: &'static str, err: DispatchError) -> DispatchError {
        let category = err.category();
        match category {
            ErrorCategory::Empty => tracing::debug!(operation, "{}", err),
            ErrorCategory::Internal => tracing::error!(operation, error = %err, "Ledger consistency fault"),
            _ => tracing::warn!(operation, category = category.as_str(), "Rejected: {}", err),
        }
        self.observe(|m, _| m.record_rejection(operation, category));
        err
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
