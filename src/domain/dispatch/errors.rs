use super::value_objects::{IncidentId, OrderId};

// ============================================================================
// Dispatch Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DispatchError {
    #[error("Customer first name cannot be empty")]
    EmptyFirstName,

    #[error("Customer last name cannot be empty")]
    EmptyLastName,

    #[error("Box count must be between 1 and {max}, got {0}", max = u32::MAX)]
    InvalidBoxCount(i64),

    #[error("Incident reason cannot be empty")]
    EmptyReason,

    #[error("Unknown incident kind: {0}")]
    UnknownIncidentKind(String),

    #[error("Order does not exist or has not been dispatched: {0}")]
    OrderNotFound(OrderId),

    #[error("Order is already closed: {0}")]
    OrderAlreadyClosed(OrderId),

    #[error("Order already has an open incident: {0}")]
    IncidentAlreadyOpen(OrderId),

    #[error("No pending orders")]
    EmptyQueue,

    #[error("No pending incidents")]
    EmptyBacklog,

    #[error("No free incident id after {attempts} attempts")]
    IncidentIdsExhausted { attempts: u32 },

    #[error("Incident {incident_id} references order {order_id} missing from the dispatched orders")]
    InternalConsistency {
        incident_id: IncidentId,
        order_id: OrderId,
    },
}

/// Coarse classification used by callers and metrics labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    AlreadyClosed,
    Conflict,
    Empty,
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Validation => "validation",
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::AlreadyClosed => "already_closed",
            ErrorCategory::Conflict => "conflict",
            ErrorCategory::Empty => "empty",
            ErrorCategory::Internal => "internal",
        }
    }
}

impl DispatchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DispatchError::EmptyFirstName
            | DispatchError::EmptyLastName
            | DispatchError::InvalidBoxCount(_)
            | DispatchError::EmptyReason
            | DispatchError::UnknownIncidentKind(_) => ErrorCategory::Validation,
            DispatchError::OrderNotFound(_) => ErrorCategory::NotFound,
            DispatchError::OrderAlreadyClosed(_) => ErrorCategory::AlreadyClosed,
            DispatchError::IncidentAlreadyOpen(_) => ErrorCategory::Conflict,
            DispatchError::EmptyQueue | DispatchError::EmptyBacklog => ErrorCategory::Empty,
            DispatchError::IncidentIdsExhausted { .. }
            | DispatchError::InternalConsistency { .. } => ErrorCategory::Internal,
        }
    }

    /// Nothing pending; an expected outcome rather than a failure
    pub fn is_no_work(&self) -> bool {
        self.category() == ErrorCategory::Empty
    }
}
