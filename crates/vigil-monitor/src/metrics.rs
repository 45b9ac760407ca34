//! Metrics collection for monitor operations

use std::collections::BTreeMap;
use vigil_domain::Phase;

/// Counters accumulated while the monitor consumes samples
#[derive(Debug, Clone, Default)]
pub struct MonitorMetrics {
    /// Samples accepted into the window
    pub samples_recorded: usize,

    /// Samples rejected as invalid
    pub samples_rejected: usize,

    /// Phase changes keyed by the phase entered
    pub phase_entries: BTreeMap<Phase, usize>,

    /// Drift alerts raised
    pub drift_alerts: usize,

    /// Declining-mean warnings raised
    pub declining_warnings: usize,
}

impl MonitorMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accepted sample
    pub fn record_sample(&mut self) {
        self.samples_recorded += 1;
    }

    /// Record a rejected sample
    pub fn record_rejection(&mut self) {
        self.samples_rejected += 1;
    }

    /// Record a transition into `to`
    pub fn record_phase_change(&mut self, to: Phase) {
        *self.phase_entries.entry(to).or_insert(0) += 1;
    }

    /// Record a drift alert
    pub fn record_drift_alert(&mut self) {
        self.drift_alerts += 1;
    }

    /// Record a declining-mean warning
    pub fn record_declining_warning(&mut self) {
        self.declining_warnings += 1;
    }

    /// Get total phase changes across all phases
    pub fn total_phase_changes(&self) -> usize {
        self.phase_entries.values().sum()
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Monitor Metrics Summary".to_string(),
            "=======================".to_string(),
            format!("Samples recorded: {}", self.samples_recorded),
            format!("Samples rejected: {}", self.samples_rejected),
            format!("Drift alerts: {}", self.drift_alerts),
            format!("Declining warnings: {}", self.declining_warnings),
        ];

        if !self.phase_entries.is_empty() {
            lines.push(String::new());
            lines.push("Phase entries:".to_string());
            for (phase, count) in &self.phase_entries {
                lines.push(format!("  {}: {}", phase, count));
            }
            lines.push(format!("  Total: {}", self.total_phase_changes()));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_phase_changes() {
        let mut metrics = MonitorMetrics::new();
        metrics.record_phase_change(Phase::Director);
        metrics.record_phase_change(Phase::Flow);
        metrics.record_phase_change(Phase::Director);

        assert_eq!(metrics.phase_entries[&Phase::Director], 2);
        assert_eq!(metrics.total_phase_changes(), 3);
    }

    #[test]
    fn test_summary() {
        let mut metrics = MonitorMetrics::new();
        metrics.record_sample();
        metrics.record_sample();
        metrics.record_drift_alert();
        metrics.record_declining_warning();
        metrics.record_phase_change(Phase::Flow);

        let summary = metrics.summary();
        assert!(summary.contains("Samples recorded: 2"));
        assert!(summary.contains("Drift alerts: 1"));
        assert!(summary.contains("Declining warnings: 1"));
        assert!(summary.contains("FLOW: 1"));
    }
}
