use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

use crate::domain::dispatch::ErrorCategory;

// ============================================================================
// Metrics Module - Prometheus metrics for the dispatch ledger
// ============================================================================
//
// Provides metrics for:
// - Orders registered and dispatched
// - Incidents registered and processed, by kind
// - Rejected operations, by operation and error category
// - Queue and backlog depth
//
// Rendered in the Prometheus text format via `render()`.
// ============================================================================

pub struct LedgerMetrics {
    registry: Registry,

    // Order Metrics
    pub orders_registered: IntCounter,
    pub orders_dispatched: IntCounter,

    // Incident Metrics
    pub incidents_registered: IntCounterVec,
    pub incidents_processed: IntCounterVec,

    // Rejections
    pub rejections: IntCounterVec,

    // Depth Gauges
    pub pending_orders: IntGauge,
    pub pending_incidents: IntGauge,
}

impl LedgerMetrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let orders_registered = IntCounter::new(
            "dispatch_orders_registered_total",
            "Total orders admitted to the queue",
        )?;
        registry.register(Box::new(orders_registered.clone()))?;

        let orders_dispatched = IntCounter::new(
            "dispatch_orders_dispatched_total",
            "Total orders dispatched",
        )?;
        registry.register(Box::new(orders_dispatched.clone()))?;

        let incidents_registered = IntCounterVec::new(
            Opts::new("dispatch_incidents_registered_total", "Total incidents opened"),
            &["kind"],
        )?;
        registry.register(Box::new(incidents_registered.clone()))?;

        let incidents_processed = IntCounterVec::new(
            Opts::new("dispatch_incidents_processed_total", "Total incidents processed"),
            &["kind"],
        )?;
        registry.register(Box::new(incidents_processed.clone()))?;

        let rejections = IntCounterVec::new(
            Opts::new("dispatch_rejections_total", "Ledger operations that returned an error"),
            &["operation", "category"],
        )?;
        registry.register(Box::new(rejections.clone()))?;

        let pending_orders = IntGauge::new(
            "dispatch_pending_orders",
            "Orders waiting in the admission queue",
        )?;
        registry.register(Box::new(pending_orders.clone()))?;

        let pending_incidents = IntGauge::new(
            "dispatch_pending_incidents",
            "Incidents waiting in the backlog",
        )?;
        registry.register(Box::new(pending_incidents.clone()))?;

        Ok(Self {
            registry,
            orders_registered,
            orders_dispatched,
            incidents_registered,
            incidents_processed,
            rejections,
            pending_orders,
            pending_incidents,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_rejection(&self, operation: &str, category: ErrorCategory) {
        self.rejections.with_label_values(&[operation, category.as_str()]).inc();
    }

    pub fn set_depths(&self, pending_orders: usize, pending_incidents: usize) {
        self.pending_orders.set(pending_orders as i64);
        self.pending_incidents.set(pending_incidents as i64);
    }

    /// Current values in the Prometheus text exposition format
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = LedgerMetrics::new().unwrap();
        assert!(!metrics.registry().gather().is_empty());
    }

    #[test]
    fn test_record_rejection() {
        let metrics = LedgerMetrics::new().unwrap();
        metrics.record_rejection("dispatch_next", ErrorCategory::Empty);
        metrics.record_rejection("dispatch_next", ErrorCategory::Empty);

        assert_eq!(metrics.rejections.with_label_values(&["dispatch_next", "empty"]).get(), 2);
    }

    #[test]
    fn test_depth_gauges() {
        let metrics = LedgerMetrics::new().unwrap();
        metrics.set_depths(3, 1);

        assert_eq!(metrics.pending_orders.get(), 3);
        assert_eq!(metrics.pending_incidents.get(), 1);
    }

    #[test]
    fn test_render_text_format() {
        let metrics = LedgerMetrics::new().unwrap();
        metrics.orders_registered.inc();

        let text = metrics.render().unwrap();
        assert!(text.contains("dispatch_orders_registered_total 1"));
        assert!(text.contains("# TYPE dispatch_pending_orders gauge"));
    }
}
