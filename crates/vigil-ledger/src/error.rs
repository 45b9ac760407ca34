//! Error types for ledger operations

use thiserror::Error;

/// Errors that can occur during ledger operations
///
/// `check` never fails; absence of a match is simply no warning.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Unknown lesson key
    #[error("Lesson not found: {0}")]
    NotFound(String),

    /// Malformed catalog (duplicate or empty keys, empty triggers)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Failed to read a catalog file
    #[error("Failed to read lesson catalog: {0}")]
    CatalogRead(#[from] std::io::Error),

    /// Failed to parse a catalog file
    #[error("Failed to parse lesson catalog: {0}")]
    CatalogParse(#[from] toml::de::Error),
}
