//! Error types for monitor operations

use thiserror::Error;

/// Errors that can occur during monitor operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MonitorError {
    /// Sample value is NaN, infinite or outside `[0.0, 1.0]`, or the
    /// configuration is malformed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Status was queried before any sample was recorded
    #[error("Monitor is uninitialized: no samples recorded yet")]
    Uninitialized,
}
