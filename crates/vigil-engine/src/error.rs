//! Error types for the engine facade

use crate::ConfigError;
use thiserror::Error;
use vigil_advisor::AdvisorError;
use vigil_ledger::LedgerError;
use vigil_monitor::MonitorError;
use vigil_verifier::VerifierError;

/// Errors surfaced by [`Safeguards`](crate::Safeguards)
///
/// Each variant wraps the error of the component that raised it.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Engine configuration could not be loaded or is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Evidence verifier rejected its input
    #[error("Verifier error: {0}")]
    Verifier(#[from] VerifierError),

    /// Pattern ledger error
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Signal monitor error
    #[error("Monitor error: {0}")]
    Monitor(#[from] MonitorError),

    /// Consensus advisor error
    #[error("Advisor error: {0}")]
    Advisor(#[from] AdvisorError),
}
