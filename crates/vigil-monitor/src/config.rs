//! Configuration for the signal monitor

use crate::MonitorError;
use serde::{Deserialize, Serialize};
use vigil_domain::SignalKind;

/// Configuration for the signal monitor
///
/// # Examples
///
/// ```
/// use vigil_monitor::MonitorConfig;
///
/// let config = MonitorConfig::default();
/// assert_eq!(config.coherence_floor, 0.95);
///
/// let config = MonitorConfig::strict();
/// assert_eq!(config.drift_consecutive_limit, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Whether samples measure coherence or strain
    /// Default: coherence
    pub signal_kind: SignalKind,

    /// Samples kept in the sliding window (oldest evicted first)
    /// Default: 100
    pub window_capacity: usize,

    /// Samples used for trend and recent mean
    /// Default: 5
    pub trend_window: usize,

    /// Newest-minus-oldest differences within this band count as stable
    /// Default: 0.01
    pub flat_tolerance: f64,

    /// Coherence below this value counts toward a drift alert
    /// Default: 0.95
    pub coherence_floor: f64,

    /// Drift alert fires once the sub-floor run exceeds this many samples
    /// Default: 2
    pub drift_consecutive_limit: usize,

    /// Mean coherence over a full trend window below this value raises a
    /// declining warning
    /// Default: 0.90
    pub declining_mean_floor: f64,

    /// Distance past a phase boundary required before switching phase
    /// Default: 0.0 (pure range lookup)
    pub hysteresis: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            signal_kind: SignalKind::Coherence,
            window_capacity: 100,
            trend_window: 5,
            flat_tolerance: 0.01,
            coherence_floor: 0.95,
            drift_consecutive_limit: 2,
            declining_mean_floor: 0.90,
            hysteresis: 0.0,
        }
    }
}

impl MonitorConfig {
    /// Early warning: higher floor, alert on the second sub-floor sample
    pub fn strict() -> Self {
        Self {
            coherence_floor: 0.97,
            drift_consecutive_limit: 1,
            declining_mean_floor: 0.93,
            flat_tolerance: 0.005,
            ..Self::default()
        }
    }

    /// Tolerant of noisy signals: lower floor, longer runs, some hysteresis
    pub fn lenient() -> Self {
        Self {
            coherence_floor: 0.90,
            drift_consecutive_limit: 4,
            declining_mean_floor: 0.85,
            flat_tolerance: 0.02,
            hysteresis: 0.02,
            ..Self::default()
        }
    }

    /// Configuration for a strain signal with otherwise default settings
    pub fn strain() -> Self {
        Self {
            signal_kind: SignalKind::Strain,
            ..Self::default()
        }
    }

    /// Reject configurations the monitor cannot run with
    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.window_capacity == 0 {
            return Err(invalid("window_capacity must be at least 1"));
        }
        if self.trend_window < 2 {
            return Err(invalid("trend_window must be at least 2"));
        }
        if !(0.0..=1.0).contains(&self.coherence_floor) {
            return Err(invalid("coherence_floor must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.declining_mean_floor) {
            return Err(invalid("declining_mean_floor must be within [0, 1]"));
        }
        if !self.flat_tolerance.is_finite() || self.flat_tolerance < 0.0 {
            return Err(invalid("flat_tolerance must be a non-negative number"));
        }
        if !(0.0..0.5).contains(&self.hysteresis) {
            return Err(invalid("hysteresis must be within [0, 0.5)"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> MonitorError {
    MonitorError::InvalidInput(message.to_string())
}
