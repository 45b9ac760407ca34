//! Coarse health classification of the coherence signal

use serde::Serialize;
use std::fmt;
use vigil_domain::Phase;

/// Health band of a single coherence reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    /// Coherence at or above 0.95
    Healthy,

    /// Coherence in `[0.85, 0.95)`
    Degraded,

    /// Coherence in `[0.70, 0.85)`
    Critical,

    /// Coherence below 0.70; the signal has stopped being informative
    Silent,
}

impl HealthState {
    /// Classify a coherence reading
    pub fn from_coherence(coherence: f64) -> Self {
        if coherence >= 0.95 {
            HealthState::Healthy
        } else if coherence >= 0.85 {
            HealthState::Degraded
        } else if coherence >= 0.70 {
            HealthState::Critical
        } else {
            HealthState::Silent
        }
    }

    /// Get the state name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthState::Healthy => "healthy",
            HealthState::Degraded => "degraded",
            HealthState::Critical => "critical",
            HealthState::Silent => "silent",
        }
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the whole window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    /// Samples currently held in the window
    pub samples: usize,

    /// Mean coherence over the window, `None` when empty
    pub average_coherence: Option<f64>,

    /// Health of the latest sample
    pub current: Option<HealthState>,

    /// Phase of the latest sample
    pub phase: Option<Phase>,

    /// Drift alerts raised since the monitor was created
    pub drift_alerts: usize,
}
