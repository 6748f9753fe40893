//! Error types and result utilities for transient detection operations.

use thiserror::Error;

/// Convenience type alias for results that may contain TransientError
pub type TransientResult<T> = Result<T, TransientError>;

/// Error types that can occur during transient detection operations.
#[derive(Error, Debug)]
pub enum TransientError {
    /// Error that occurs when diagnostics are requested for a transient that
    /// was never detected.
    ///
    /// Contains the requested transient index. Valid indices run from zero up
    /// to (but not including) the transient count of the analysis queried.
    #[error("Peak and valley info doesn't exist for transient {0}")]
    UnknownTransient(usize),

    /// Error that occurs when invalid parameters are provided to an operation.
    ///
    /// This includes cases like non-positive level steps, negative ratios,
    /// out-of-range windowing percentages, etc.
    #[error("Invalid parameter error: {0}")]
    InvalidParameter(String),

    /// Error that occurs when buffer lengths don't match expected values.
    ///
    /// This happens when interleaving channels of unequal length, etc.
    #[error("Dimension mismatch error: {0}")]
    DimensionMismatch(String),
}
