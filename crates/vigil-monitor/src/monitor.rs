//! Signal monitor implementation

use crate::{HealthReport, HealthState, MonitorConfig, MonitorError, MonitorMetrics};
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;
use tracing::{debug, info, warn};
use vigil_domain::{Phase, SignalKind, SignalSample};

/// Direction of the signal over the trend window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Newest sample exceeds the oldest by more than the flat tolerance
    Rising,

    /// Newest sample is below the oldest by more than the flat tolerance
    Falling,

    /// Within the flat tolerance, or fewer than two samples
    Stable,
}

impl Trend {
    /// Get the trend name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Rising => "rising",
            Trend::Falling => "falling",
            Trend::Stable => "stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transition between phases caused by one sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseChange {
    /// Phase before the sample
    pub from: Phase,

    /// Phase after the sample
    pub to: Phase,

    /// Raw sample value that caused the change
    pub value: f64,

    /// Timestamp of that sample
    pub timestamp: u64,
}

/// Coherence stayed below its floor for too many consecutive samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DriftAlert {
    /// Coherence value of the sample that raised the alert
    pub value: f64,

    /// Configured floor
    pub floor: f64,

    /// Length of the sub-floor run including this sample
    pub consecutive_below: usize,

    /// Timestamp of the sample that raised the alert
    pub timestamp: u64,
}

/// Mean of the recent coherence samples fell below its floor
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecliningMean {
    /// Mean coherence over the last `samples` values
    pub mean: f64,

    /// Configured floor for the recent mean
    pub floor: f64,

    /// Samples the mean was taken over
    pub samples: usize,

    /// Timestamp of the sample that raised the warning
    pub timestamp: u64,
}

/// Everything one `record` call produced
///
/// Phase changes, drift alerts and declining-mean warnings are evaluated
/// independently; any combination may be present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RecordOutcome {
    /// Phase transition, if the sample moved the signal into a new phase
    pub phase_change: Option<PhaseChange>,

    /// Drift alert, if this sample completed a sub-floor run
    pub drift_alert: Option<DriftAlert>,

    /// Declining-mean warning, if this sample pulled the recent mean under its floor
    pub declining: Option<DecliningMean>,
}

impl RecordOutcome {
    /// True when the sample produced no phase change, alert or warning
    pub fn is_quiet(&self) -> bool {
        self.phase_change.is_none() && self.drift_alert.is_none() && self.declining.is_none()
    }
}

/// Point-in-time view of the monitor
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonitorStatus {
    /// Phase of the most recent accepted sample
    pub current_phase: Phase,

    /// Direction over the last `trend_window` samples
    pub trend: Trend,

    /// Mean raw value over the last `trend_window` samples
    pub mean_of_last_k: f64,

    /// Most recent accepted sample
    pub latest: SignalSample,

    /// Samples currently held in the window
    pub samples: usize,

    /// Health band of the most recent sample
    pub health: HealthState,

    /// Whether the signal is inside a sub-floor excursion that already alerted
    pub drift_active: bool,

    /// Whether the recent mean is below its floor and already warned
    pub declining_active: bool,
}

/// Tracks a coherence or strain signal and its phase
///
/// Holds a bounded window of samples (oldest evicted first), the current
/// phase, and the state of the current sub-floor run. All mutation goes
/// through `&mut self`; share an instance across threads behind a mutex.
#[derive(Debug, Clone)]
pub struct SignalMonitor {
    config: MonitorConfig,
    window: VecDeque<SignalSample>,
    phase: Option<Phase>,
    below_floor_run: usize,
    drift_active: bool,
    declining_active: bool,
    metrics: MonitorMetrics,
}

impl SignalMonitor {
    /// Create a monitor, rejecting malformed configuration
    pub fn new(config: MonitorConfig) -> Result<Self, MonitorError> {
        config.validate()?;
        Ok(Self {
            window: VecDeque::with_capacity(config.window_capacity),
            config,
            phase: None,
            below_floor_run: 0,
            drift_active: false,
            declining_active: false,
            metrics: MonitorMetrics::new(),
        })
    }

    /// Get the monitor configuration
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Get accumulated metrics
    pub fn metrics(&self) -> &MonitorMetrics {
        &self.metrics
    }

    /// Samples currently held, oldest first
    pub fn samples(&self) -> impl Iterator<Item = &SignalSample> {
        self.window.iter()
    }

    /// Number of samples currently held
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// True before the first accepted sample
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Current phase, `None` before the first accepted sample
    pub fn current_phase(&self) -> Option<Phase> {
        self.phase
    }

    /// Record one sample
    ///
    /// The first sample establishes the initial phase without reporting a
    /// change. Invalid values are rejected and leave the state untouched.
    pub fn record(&mut self, value: f64, timestamp: u64) -> Result<RecordOutcome, MonitorError> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            self.metrics.record_rejection();
            return Err(MonitorError::InvalidInput(format!(
                "{} sample must be a finite value within [0, 1], got {}",
                self.config.signal_kind.as_str(),
                value
            )));
        }

        let sample = SignalSample::new(value, timestamp);
        if self.window.len() == self.config.window_capacity {
            self.window.pop_front();
        }
        self.window.push_back(sample);
        self.metrics.record_sample();

        let outcome = RecordOutcome {
            phase_change: self.advance_phase(sample),
            drift_alert: self.check_drift(sample),
            declining: self.check_declining(sample),
        };

        debug!(
            value,
            timestamp,
            phase = ?self.phase,
            below_floor_run = self.below_floor_run,
            "Recorded signal sample"
        );
        Ok(outcome)
    }

    /// Current phase, trend and recent mean
    pub fn status(&self) -> Result<MonitorStatus, MonitorError> {
        let (Some(current_phase), Some(latest)) = (self.phase, self.window.back().copied()) else {
            return Err(MonitorError::Uninitialized);
        };

        let recent = self.recent();
        let mean_of_last_k = recent.iter().sum::<f64>() / recent.len() as f64;

        Ok(MonitorStatus {
            current_phase,
            trend: self.trend_of(&recent),
            mean_of_last_k,
            latest,
            samples: self.window.len(),
            health: HealthState::from_coherence(self.coherence_of(latest.value)),
            drift_active: self.drift_active,
            declining_active: self.declining_active,
        })
    }

    /// Health snapshot over the whole window
    ///
    /// Unlike [`status`](Self::status) this never fails; an empty monitor
    /// reports zero samples and no current state.
    pub fn health_report(&self) -> HealthReport {
        let average_coherence = if self.window.is_empty() {
            None
        } else {
            let total: f64 = self
                .window
                .iter()
                .map(|s| self.coherence_of(s.value))
                .sum();
            Some(total / self.window.len() as f64)
        };

        HealthReport {
            samples: self.window.len(),
            average_coherence,
            current: self
                .window
                .back()
                .map(|s| HealthState::from_coherence(self.coherence_of(s.value))),
            phase: self.phase,
            drift_alerts: self.metrics.drift_alerts,
        }
    }

    fn advance_phase(&mut self, sample: SignalSample) -> Option<PhaseChange> {
        let strain = self.config.signal_kind.to_strain(sample.value);

        let Some(current) = self.phase else {
            let initial = Phase::from_strain(strain);
            debug!(phase = %initial, "Initial phase established");
            self.phase = Some(initial);
            return None;
        };

        let next = self.next_phase(current, strain);
        if next == current {
            return None;
        }

        self.phase = Some(next);
        self.metrics.record_phase_change(next);
        info!(from = %current, to = %next, value = sample.value, "Phase change");

        Some(PhaseChange {
            from: current,
            to: next,
            value: sample.value,
            timestamp: sample.timestamp,
        })
    }

    /// Phase to adopt for `strain` given the current phase
    ///
    /// With zero hysteresis this is the plain range lookup. Otherwise the
    /// strain is pulled back toward the current phase by the hysteresis
    /// band before the lookup, so a boundary only counts as crossed once
    /// the value is at least that far past it.
    fn next_phase(&self, current: Phase, strain: f64) -> Phase {
        let h = self.config.hysteresis;
        let candidate = Phase::from_strain(strain);
        if h == 0.0 || candidate == current {
            return candidate;
        }

        if candidate > current {
            Phase::from_strain(strain - h).max(current)
        } else {
            Phase::from_strain(strain + h).min(current)
        }
    }

    fn check_drift(&mut self, sample: SignalSample) -> Option<DriftAlert> {
        if self.config.signal_kind != SignalKind::Coherence {
            return None;
        }

        if sample.value >= self.config.coherence_floor {
            if self.drift_active {
                debug!(value = sample.value, "Coherence recovered, drift alert re-armed");
            }
            self.below_floor_run = 0;
            self.drift_active = false;
            return None;
        }

        self.below_floor_run += 1;
        if self.drift_active || self.below_floor_run <= self.config.drift_consecutive_limit {
            return None;
        }

        self.drift_active = true;
        self.metrics.record_drift_alert();
        warn!(
            value = sample.value,
            floor = self.config.coherence_floor,
            consecutive = self.below_floor_run,
            "Coherence drift detected"
        );

        Some(DriftAlert {
            value: sample.value,
            floor: self.config.coherence_floor,
            consecutive_below: self.below_floor_run,
            timestamp: sample.timestamp,
        })
    }

    /// Warn once when the mean of a full trend window drops below its floor
    ///
    /// Re-arms when the mean climbs back to the floor.
    fn check_declining(&mut self, sample: SignalSample) -> Option<DecliningMean> {
        if self.config.signal_kind != SignalKind::Coherence
            || self.window.len() < self.config.trend_window
        {
            return None;
        }

        let recent = self.recent();
        let mean = recent.iter().sum::<f64>() / recent.len() as f64;
        if mean >= self.config.declining_mean_floor {
            if self.declining_active {
                debug!(mean, "Recent coherence mean recovered");
            }
            self.declining_active = false;
            return None;
        }
        if self.declining_active {
            return None;
        }

        self.declining_active = true;
        self.metrics.record_declining_warning();
        warn!(
            mean,
            floor = self.config.declining_mean_floor,
            samples = recent.len(),
            "Coherence declining"
        );

        Some(DecliningMean {
            mean,
            floor: self.config.declining_mean_floor,
            samples: recent.len(),
            timestamp: sample.timestamp,
        })
    }

    /// Raw values of the last `trend_window` samples, oldest first
    fn recent(&self) -> Vec<f64> {
        let k = self.config.trend_window.min(self.window.len());
        self.window
            .iter()
            .skip(self.window.len() - k)
            .map(|s| s.value)
            .collect()
    }

    fn trend_of(&self, recent: &[f64]) -> Trend {
        let (Some(oldest), Some(newest)) = (recent.first(), recent.last()) else {
            return Trend::Stable;
        };
        if recent.len() < 2 {
            return Trend::Stable;
        }

        let diff = newest - oldest;
        if diff.abs() <= self.config.flat_tolerance {
            Trend::Stable
        } else if diff > 0.0 {
            Trend::Rising
        } else {
            Trend::Falling
        }
    }

    fn coherence_of(&self, value: f64) -> f64 {
        1.0 - self.config.signal_kind.to_strain(value)
    }
}

impl Default for SignalMonitor {
    fn default() -> Self {
        Self {
            window: VecDeque::new(),
            config: MonitorConfig::default(),
            phase: None,
            below_floor_run: 0,
            drift_active: false,
            declining_active: false,
            metrics: MonitorMetrics::new(),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: without hysteresis the phase is a pure function of the latest sample
        #[test]
        fn test_phase_depends_only_on_latest(
            history in prop::collection::vec(0.0f64..=1.0, 0..20),
            last in 0.0f64..=1.0,
        ) {
            let mut monitor = SignalMonitor::new(MonitorConfig::strain()).unwrap();
            for (t, v) in history.iter().enumerate() {
                monitor.record(*v, t as u64).unwrap();
            }
            monitor.record(last, history.len() as u64).unwrap();
            prop_assert_eq!(monitor.current_phase(), Some(Phase::from_strain(last)));
        }

        /// Property: the window never exceeds its capacity
        #[test]
        fn test_window_bounded(
            values in prop::collection::vec(0.0f64..=1.0, 0..50),
            capacity in 1usize..10,
        ) {
            let config = MonitorConfig { window_capacity: capacity, ..MonitorConfig::default() };
            let mut monitor = SignalMonitor::new(config).unwrap();
            for (t, v) in values.iter().enumerate() {
                monitor.record(*v, t as u64).unwrap();
            }
            prop_assert_eq!(monitor.len(), values.len().min(capacity));
        }
    }
}
