//! Integration tests for the signal monitor

use vigil_domain::Phase;
use vigil_monitor::{HealthState, MonitorConfig, MonitorError, SignalMonitor, Trend};

#[test]
fn test_degrading_coherence_raises_drift_alert() {
    let mut monitor = SignalMonitor::new(MonitorConfig::default()).unwrap();

    let samples = [0.97, 0.96, 0.94, 0.93, 0.92];
    let mut outcomes = Vec::new();
    for (i, value) in samples.iter().enumerate() {
        outcomes.push(monitor.record(*value, 1_000 + i as u64).unwrap());
    }

    assert!(outcomes[..4].iter().all(|o| o.drift_alert.is_none()));
    assert!(outcomes[4].drift_alert.is_some());

    let status = monitor.status().unwrap();
    assert_eq!(status.current_phase, Phase::Structure);
    assert_eq!(status.trend, Trend::Falling);
    assert_eq!(status.health, HealthState::Degraded);
    assert!(status.drift_active);
}

#[test]
fn test_config_from_toml_drives_monitor() {
    let config: MonitorConfig = toml::from_str(
        r#"
        signal_kind = "strain"
        trend_window = 3
        "#,
    )
    .unwrap();
    let mut monitor = SignalMonitor::new(config).unwrap();

    let mut changes = Vec::new();
    for (t, strain) in [0.1, 0.2, 0.5, 0.85, 0.9, 0.4].into_iter().enumerate() {
        if let Some(change) = monitor.record(strain, t as u64).unwrap().phase_change {
            changes.push((change.from, change.to));
        }
    }

    assert_eq!(
        changes,
        vec![
            (Phase::Structure, Phase::Director),
            (Phase::Director, Phase::Flow),
            (Phase::Flow, Phase::Director),
        ]
    );
    assert_eq!(monitor.metrics().total_phase_changes(), 3);
    assert_eq!(monitor.metrics().phase_entries[&Phase::Director], 2);
}

#[test]
fn test_strict_preset_alerts_earlier() {
    let mut strict = SignalMonitor::new(MonitorConfig::strict()).unwrap();
    let mut default = SignalMonitor::new(MonitorConfig::default()).unwrap();

    let strict_alert = [0.96, 0.96]
        .iter()
        .enumerate()
        .filter_map(|(t, v)| strict.record(*v, t as u64).unwrap().drift_alert)
        .count();
    let default_alert = [0.96, 0.96]
        .iter()
        .enumerate()
        .filter_map(|(t, v)| default.record(*v, t as u64).unwrap().drift_alert)
        .count();

    assert_eq!(strict_alert, 1);
    assert_eq!(default_alert, 0);
}

#[test]
fn test_negative_value_is_invalid_input() {
    let mut monitor = SignalMonitor::default();
    let err = monitor.record(-0.5, 0).unwrap_err();
    assert!(matches!(err, MonitorError::InvalidInput(_)));
    assert_eq!(monitor.status().unwrap_err(), MonitorError::Uninitialized);
}

#[test]
fn test_metrics_summary_after_replay() {
    let mut monitor = SignalMonitor::default();
    for (t, v) in [0.99, 0.5, 0.1, 0.2, 0.3].into_iter().enumerate() {
        monitor.record(v, t as u64).unwrap();
    }
    let _ = monitor.record(2.0, 99);

    let summary = monitor.metrics().summary();
    assert!(summary.contains("Samples recorded: 5"));
    assert!(summary.contains("Samples rejected: 1"));
    assert!(summary.contains("Drift alerts: 1"));
}

#[test]
fn test_low_recent_mean_surfaces_before_drift_limit() {
    let config: MonitorConfig = toml::from_str("drift_consecutive_limit = 10\n").unwrap();
    let mut monitor = SignalMonitor::new(config).unwrap();

    let warnings: Vec<_> = (0..5)
        .filter_map(|t| monitor.record(0.88, t).unwrap().declining)
        .collect();

    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].mean < warnings[0].floor);
    assert_eq!(monitor.metrics().drift_alerts, 0);
    assert!(monitor.metrics().summary().contains("Declining warnings: 1"));
}
