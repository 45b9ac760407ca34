//! Error types for advisor operations

use thiserror::Error;

/// Errors that can occur during consensus operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdvisorError {
    /// Malformed perspective set or configuration
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
