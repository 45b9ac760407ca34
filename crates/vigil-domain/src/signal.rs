//! Signal samples fed to the monitor

use serde::{Deserialize, Serialize};

/// What a monitored scalar measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    /// Health metric, 1.0 is fully coherent
    #[default]
    Coherence,

    /// Load metric, 1.0 is maximum strain
    Strain,
}

impl SignalKind {
    /// Convert a raw sample into strain
    ///
    /// Coherence is the complement of strain.
    pub fn to_strain(&self, value: f64) -> f64 {
        match self {
            SignalKind::Coherence => 1.0 - value,
            SignalKind::Strain => value,
        }
    }

    /// Get the signal kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Coherence => "coherence",
            SignalKind::Strain => "strain",
        }
    }
}

impl std::str::FromStr for SignalKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "coherence" => Ok(SignalKind::Coherence),
            "strain" => Ok(SignalKind::Strain),
            other => Err(format!("Invalid signal kind: {}", other)),
        }
    }
}

/// A single observation of the monitored signal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalSample {
    /// Observed value in `[0.0, 1.0]`
    pub value: f64,

    /// Caller-supplied timestamp (milliseconds since Unix epoch by convention)
    pub timestamp: u64,
}

impl SignalSample {
    /// Create a new sample
    pub fn new(value: f64, timestamp: u64) -> Self {
        Self { value, timestamp }
    }
}
