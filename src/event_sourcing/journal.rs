use anyhow::Result;

use super::event::{serialize_event, DomainEvent, EventEnvelope};

// ============================================================================
// Event Journal - In-memory, append-only event history
// ============================================================================
//
// Responsibilities:
// 1. Append events with a monotonically increasing sequence number
// 2. Read back the full history or the history of a single record
// 3. Export the history as JSON lines
//
// ============================================================================

#[derive(Debug, Clone)]
pub struct EventJournal<E: DomainEvent> {
    events: Vec<EventEnvelope<E>>,
    last_sequence: i64,
}

impl<E: DomainEvent> Default for EventJournal<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: DomainEvent> EventJournal<E> {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            last_sequence: 0,
        }
    }

    /// Append one event; returns the assigned sequence number
    pub fn append(
        &mut self,
        aggregate_id: impl Into<String>,
        event_type: &str,
        event: E,
    ) -> i64 {
        self.last_sequence += 1;
        let envelope = EventEnvelope::new(
            aggregate_id,
            self.last_sequence,
            event_type,
            event,
        );

        tracing::trace!(
            sequence = envelope.sequence_number,
            aggregate_id = %envelope.aggregate_id,
            event_type = %envelope.event_type,
            "Journaled event"
        );

        self.events.push(envelope);
        self.last_sequence
    }

    pub fn events(&self) -> &[EventEnvelope<E>] {
        &self.events
    }

    pub fn events_for<'a>(&'a self, aggregate_id: &'a str) -> impl Iterator<Item = &'a EventEnvelope<E>> + 'a {
        self.events.iter().filter(move |e| e.aggregate_id == aggregate_id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last_sequence(&self) -> i64 {
        self.last_sequence
    }

    /// One JSON document per line, oldest first
    pub fn to_json_lines(&self) -> Result<String> {
        let mut out = String::new();
        for envelope in &self.events {
            out.push_str(&serialize_event(envelope)?);
            out.push('\n');
        }
        Ok(out)
    }
}
