// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Each domain has its own subdirectory with:
// - Value objects
// - Records
// - Events
// - Errors
// - The state machine that owns the records
//
// This layer does not depend on the actor or metrics plumbing beyond an
// optional metrics handle.
//
// ============================================================================

pub mod dispatch;
