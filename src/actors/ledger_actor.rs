use actix::prelude::*;

use crate::domain::dispatch::{
    DispatchError, DispatchEvent, DispatchLedger, Incident, IncidentKind, Order, OrderId,
    SnapshotView,
};
use crate::event_sourcing::EventEnvelope;

// ============================================================================
// Actor Messages
// ============================================================================

#[derive(Message)]
#[rtype(result = "Result<Order, DispatchError>")]
pub struct RegisterOrder {
    pub first_name: String,
    pub last_name: String,
    pub box_count: i64,
}

#[derive(Message)]
#[rtype(result = "Result<Order, DispatchError>")]
pub struct DispatchNext;

#[derive(Message)]
#[rtype(result = "Result<Incident, DispatchError>")]
pub struct RegisterIncident {
    pub kind: IncidentKind,
    pub order_id: OrderId,
    pub reason: String,
}

#[derive(Message)]
#[rtype(result = "Result<(Incident, Order), DispatchError>")]
pub struct ProcessNextIncident;

#[derive(Message)]
#[rtype(result = "SnapshotView")]
pub struct GetSnapshot;

/// Journaled events, optionally narrowed to one order
#[derive(Message)]
#[rtype(result = "Vec<EventEnvelope<DispatchEvent>>")]
pub struct GetHistory {
    pub order_id: Option<OrderId>,
}

#[derive(Message)]
#[rtype(result = "anyhow::Result<String>")]
pub struct ExportHistory;

// ============================================================================
// Ledger Actor - Serializes callers in front of one ledger
// ============================================================================
//
// The mailbox handles one message at a time, so every mutation runs to
// completion before the next command or snapshot is served.
//
// ============================================================================

pub struct LedgerActor {
    ledger: DispatchLedger,
}

impl LedgerActor {
    pub fn new(ledger: DispatchLedger) -> Self {
        Self { ledger }
    }
}

impl Actor for LedgerActor {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        tracing::info!("LedgerActor started");
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        tracing::info!(summary = %self.ledger.snapshot().summary(), "LedgerActor stopped");
    }
}

// ============================================================================
// Message Handlers
// ============================================================================

impl Handler<RegisterOrder> for LedgerActor {
    type Result = Result<Order, DispatchError>;

    fn handle(&mut self, msg: RegisterOrder, _: &mut Self::Context) -> Self::Result {
        self.ledger.register_order(&msg.first_name, &msg.last_name, msg.box_count)
    }
}

impl Handler<DispatchNext> for LedgerActor {
    type Result = Result<Order, DispatchError>;

    fn handle(&mut self, _: DispatchNext, _: &mut Self::Context) -> Self::Result {
        self.ledger.dispatch_next()
    }
}

impl Handler<RegisterIncident> for LedgerActor {
    type Result = Result<Incident, DispatchError>;

    fn handle(&mut self, msg: RegisterIncident, _: &mut Self::Context) -> Self::Result {
        self.ledger.register_incident(msg.kind, &msg.order_id, &msg.reason)
    }
}

impl Handler<ProcessNextIncident> for LedgerActor {
    type Result = Result<(Incident, Order), DispatchError>;

    fn handle(&mut self, _: ProcessNextIncident, _: &mut Self::Context) -> Self::Result {
        self.ledger.process_next_incident()
    }
}

impl Handler<GetSnapshot> for LedgerActor {
    type Result = MessageResult<GetSnapshot>;

    fn handle(&mut self, _: GetSnapshot, _: &mut Self::Context) -> Self::Result {
        MessageResult(self.ledger.snapshot())
    }
}

impl Handler<GetHistory> for LedgerActor {
    type Result = MessageResult<GetHistory>;

    fn handle(&mut self, msg: GetHistory, _: &mut Self::Context) -> Self::Result {
        match msg.order_id {
            Some(order_id) => MessageResult(self.ledger.order_history(&order_id)),
            None => MessageResult(self.ledger.history().to_vec()),
        }
    }
}

impl Handler<ExportHistory> for LedgerActor {
    type Result = anyhow::Result<String>;

    fn handle(&mut self, _: ExportHistory, _: &mut Self::Context) -> Self::Result {
        self.ledger.export_history()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dispatch::OrderStatus;

    fn start() -> Addr<LedgerActor> {
        LedgerActor::new(DispatchLedger::default()).start()
    }

    #[actix::test]
    async fn test_actor_runs_full_lifecycle() {
        let addr = start();

        let order = addr
            .send(RegisterOrder {
                first_name: "Ana".into(),
                last_name: "Lopez".into(),
                box_count: 5,
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(order.order_id.as_str(), "Order-0001");

        addr.send(DispatchNext).await.unwrap().unwrap();
        addr.send(RegisterIncident {
            kind: IncidentKind::Return,
            order_id: order.order_id.clone(),
            reason: "damaged box".into(),
        })
        .await
        .unwrap()
        .unwrap();

        let (incident, closed) = addr.send(ProcessNextIncident).await.unwrap().unwrap();
        assert_eq!(incident.order_id, order.order_id);
        assert_eq!(closed.status(), OrderStatus::Closed);

        let snapshot = addr.send(GetSnapshot).await.unwrap();
        assert_eq!(snapshot.processed_incident_count, 1);
        assert_eq!(addr.send(GetHistory { order_id: None }).await.unwrap().len(), 4);

        let order_events = addr
            .send(GetHistory { order_id: Some(order.order_id.clone()) })
            .await
            .unwrap();
        assert!(order_events.iter().all(|e| e.aggregate_id == "Order-0001"));

        let export = addr.send(ExportHistory).await.unwrap().unwrap();
        assert_eq!(export.lines().count(), 4);
    }

    #[actix::test]
    async fn test_actor_reports_empty_outcomes() {
        let addr = start();

        let dispatched = addr.send(DispatchNext).await.unwrap();
        assert_eq!(dispatched, Err(DispatchError::EmptyQueue));

        let processed = addr.send(ProcessNextIncident).await.unwrap();
        assert_eq!(processed, Err(DispatchError::EmptyBacklog));
    }

    #[actix::test]
    async fn test_concurrent_callers_get_unique_ids() {
        let addr = start();

        let sends: Vec<_> = (0..10)
            .map(|i| {
                addr.send(RegisterOrder {
                    first_name: "Caller".into(),
                    last_name: format!("N{}", i),
                    box_count: 1,
                })
            })
            .collect();

        let mut ids = Vec::new();
        for send in sends {
            ids.push(send.await.unwrap().unwrap().order_id);
        }
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        ids.dedup();

        assert_eq!(ids.len(), 10);
        assert_eq!(addr.send(GetSnapshot).await.unwrap().pending_order_count, 10);
    }
}
