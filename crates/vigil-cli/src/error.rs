//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Engine configuration could not be loaded
    #[error(transparent)]
    EngineConfig(#[from] vigil_engine::ConfigError),

    /// Engine operation failed
    #[error(transparent)]
    Engine(#[from] vigil_engine::EngineError),

    /// Lesson lookup failed
    #[error(transparent)]
    Ledger(#[from] vigil_ledger::LedgerError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
