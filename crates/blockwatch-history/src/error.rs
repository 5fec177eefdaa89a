//! Error types for the `blockwatch-history` crate.
//!
//! Only construction can fail. Event handling and queries never return
//! errors: unresolvable cells and unexpected payloads are suppressed where
//! they occur.

/// Errors raised while building history components.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HistoryError {
    /// The per-cell history capacity must be a positive integer.
    #[error("history capacity must be positive, got {0}")]
    InvalidCapacity(i64),

    /// Query limits must satisfy `1 <= default_limit` and `1 <= max_limit`.
    #[error("invalid query limits: default {default_limit}, max {max_limit}")]
    InvalidQueryLimits {
        /// Configured default.
        default_limit: u32,
        /// Configured maximum.
        max_limit: u32,
    },
}
