// ============================================================================
// Ledger Configuration
// ============================================================================
//
// Controls identifier generation. Counters themselves are owned by each
// DispatchLedger instance.
//
// ============================================================================

const MIN_INCIDENT_ID_LEN: usize = 8;
const MAX_INCIDENT_ID_LEN: usize = 32;

#[derive(Clone, Debug, PartialEq)]
pub struct LedgerConfig {
    /// Prefix of generated order ids (`Order` → `Order-0001`)
    pub order_id_prefix: String,
    /// Zero-padding width of the order counter
    pub order_id_width: usize,
    /// Length of the random incident token (hex digits of a v4 UUID)
    pub incident_id_len: usize,
    /// Counter value assigned to the first order
    pub first_order_number: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            order_id_prefix: "Order".to_string(),
            order_id_width: 4,
            incident_id_len: 8,
            first_order_number: 1,
        }
    }
}

impl LedgerConfig {
    /// Wider ids for high-volume desks
    pub fn wide() -> Self {
        Self {
            order_id_width: 8,
            incident_id_len: 12,
            ..Self::default()
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.order_id_prefix = prefix.into();
        self
    }

    /// Clamp out-of-range values into something usable
    pub fn normalized(mut self) -> Self {
        self.order_id_width = self.order_id_width.max(1);
        self.incident_id_len = self.incident_id_len.clamp(MIN_INCIDENT_ID_LEN, MAX_INCIDENT_ID_LEN);
        self
    }

    pub fn format_order_id(&self, number: u64) -> String {
        format!(
            "{}-{:0width$}",
            self.order_id_prefix,
            number,
            width = self.order_id_width
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order_id_format() {
        let config = LedgerConfig::default();
        assert_eq!(config.format_order_id(1), "Order-0001");
        assert_eq!(config.format_order_id(12345), "Order-12345");
    }

    #[test]
    fn test_wide_preset() {
        let config = LedgerConfig::wide().with_prefix("PO");
        assert_eq!(config.format_order_id(42), "PO-00000042");
        assert_eq!(config.incident_id_len, 12);
    }

    #[test]
    fn test_normalized_clamps_lengths() {
        let config = LedgerConfig {
            order_id_width: 0,
            incident_id_len: 100,
            ..LedgerConfig::default()
        }
        .normalized();

        assert_eq!(config.order_id_width, 1);
        assert_eq!(config.incident_id_len, 32);
    }

    #[test]
    fn test_normalized_raises_short_incident_ids() {
        let config = LedgerConfig {
            incident_id_len: 1,
            ..LedgerConfig::default()
        }
        .normalized();

        assert_eq!(config.incident_id_len, 8);
    }
}
