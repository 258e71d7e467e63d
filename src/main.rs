use actix::prelude::*;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use quick_dispatch::actors::{
    DispatchNext, ExportHistory, GetHistory, GetSnapshot, LedgerActor, ProcessNextIncident, RegisterIncident,
    RegisterOrder,
};
use quick_dispatch::{DispatchLedger, IncidentKind, LedgerConfig, LedgerMetrics, OrderId};

#[actix::main]
async fn main() -> anyhow::Result<()> {
    // Structured logging, INFO by default; override with RUST_LOG
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,quick_dispatch=debug"))
        )
        .init();

    tracing::info!("🚀 Starting quick dispatch demo");

    let metrics = Arc::new(LedgerMetrics::new()?);
    let ledger = DispatchLedger::new(LedgerConfig::default()).with_metrics(metrics.clone());
    let ledger = LedgerActor::new(ledger).start();

    // === 1. Admit and dispatch two orders ===
    for (first, last, boxes) in [("Ana", "Lopez", 5), ("Luis", "Perez", 2)] {
        let order = ledger
            .send(RegisterOrder {
                first_name: first.to_string(),
                last_name: last.to_string(),
                box_count: boxes,
            })
            .await??;
        tracing::info!("✅ Registered {}", order);
    }

    let first = ledger.send(DispatchNext).await??;
    let second = ledger.send(DispatchNext).await??;
    tracing::info!("🚚 Dispatched {} then {}", first.order_id, second.order_id);

    // Empty queue is an expected outcome, not a failure
    if let Err(e) = ledger.send(DispatchNext).await? {
        tracing::info!("⚠️ {}", e);
    }

    // === 2. Open incidents against both, then against an unknown order ===
    ledger
        .send(RegisterIncident {
            kind: IncidentKind::Return,
            order_id: first.order_id.clone(),
            reason: "damaged box".to_string(),
        })
        .await??;
    ledger
        .send(RegisterIncident {
            kind: "CANCELACIÓN".parse()?,
            order_id: second.order_id.clone(),
            reason: "customer cancelled".to_string(),
        })
        .await??;

    if let Err(e) = ledger
        .send(RegisterIncident {
            kind: IncidentKind::Cancellation,
            order_id: OrderId::new("Order-9999"),
            reason: "no reason".to_string(),
        })
        .await?
    {
        tracing::info!("⚠️ {}", e);
    }

    // === 3. Drain the backlog (most recent incident first) ===
    loop {
        match ledger.send(ProcessNextIncident).await? {
            Ok((incident, order)) => {
                tracing::info!("✅ Processed {}", incident);
                tracing::info!("📦 Closed {}", order);
            }
            Err(e) if e.is_no_work() => break,
            Err(e) => return Err(e.into()),
        }
    }

    // === 4. Report ===
    let snapshot = ledger.send(GetSnapshot).await?;
    tracing::info!("System status\n{}", snapshot);

    let first_history = ledger
        .send(GetHistory { order_id: Some(first.order_id.clone()) })
        .await?;
    for envelope in &first_history {
        tracing::info!(
            order_id = %first.order_id,
            sequence = envelope.sequence_number,
            "📜 {}",
            envelope.event_type
        );
    }
    tracing::debug!("History\n{}", ledger.send(ExportHistory).await??);
    tracing::debug!("Metrics\n{}", metrics.render()?);

    tracing::info!(summary = %snapshot.summary(), "👋 Demo complete");

    Ok(())
}
