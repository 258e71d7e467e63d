use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::DispatchError;

// ============================================================================
// Dispatch Value Objects
// ============================================================================

/// Human-readable order identifier, e.g. `Order-0001`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque incident identifier (short random token)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IncidentId(String);

impl IncidentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IncidentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Order lifecycle: Pending → Dispatched → (Returned | Cancelled) → Closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Dispatched,
    Returned,
    Cancelled,
    Closed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Dispatched => "DISPATCHED",
            OrderStatus::Returned => "RETURNED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncidentStatus {
    Pending,
    Processed,
}

impl IncidentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncidentStatus::Pending => "PENDING",
            IncidentStatus::Processed => "PROCESSED",
        }
    }
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of incident was raised against a dispatched order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncidentKind {
    Return,
    Cancellation,
}

impl IncidentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncidentKind::Return => "RETURN",
            IncidentKind::Cancellation => "CANCELLATION",
        }
    }

    /// Status the referenced order moves to when this incident is opened
    pub fn resulting_order_status(&self) -> OrderStatus {
        match self {
            IncidentKind::Return => OrderStatus::Returned,
            IncidentKind::Cancellation => OrderStatus::Cancelled,
        }
    }
}

impl fmt::Display for IncidentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the English tokens and the bilingual desk tokens
/// (`DEVOLUCIÓN` / `CANCELACIÓN`, accent optional), case-insensitive.
impl FromStr for IncidentKind {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "RETURN" | "DEVOLUCIÓN" | "DEVOLUCION" => Ok(IncidentKind::Return),
            "CANCELLATION" | "CANCELACIÓN" | "CANCELACION" => Ok(IncidentKind::Cancellation),
            _ => Err(DispatchError::UnknownIncidentKind(s.to_string())),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
