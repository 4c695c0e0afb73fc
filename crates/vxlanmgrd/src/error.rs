//! Error types for the overlay reconciler.
//!
//! Most failures at the hardware boundary are absorbed where they occur (a
//! missing provider degrades calls to no-ops, a non-success status is logged
//! and never retried). What surfaces from an entry point is only the class of
//! failure the notification mechanism is contractually required to treat as
//! fatal: an internal-consistency violation that indicates a missed prior
//! event.

use thiserror::Error;

/// Result type for reconciliation entry points.
pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Unrecoverable reconciliation failures.
///
/// An `Err` from an entry point means the tracked state and the hardware
/// program can no longer be assumed consistent; continuing risks permanent
/// divergence. The caller must abort rather than dispatch further passes.
#[derive(Debug, Clone, Error)]
pub enum ReconcileError {
    /// A live port reached the delete path without ever having been seeded
    /// by the port-add path.
    #[error("deleted port '{port}' was never tracked; a port-add notification was missed")]
    UntrackedPort { port: String },
}

impl ReconcileError {
    /// Creates an untracked-port error.
    pub fn untracked_port(port: impl Into<String>) -> Self {
        ReconcileError::UntrackedPort { port: port.into() }
    }
}
