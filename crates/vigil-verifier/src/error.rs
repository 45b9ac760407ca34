//! Verifier error types

use thiserror::Error;

/// Errors that can occur during verification
///
/// Missing or unresolvable evidence is never an error; it lowers confidence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifierError {
    /// Claim kind is empty or not one of the known kinds
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
