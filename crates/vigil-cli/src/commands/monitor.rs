//! Monitor command implementation.
//!
//! Replays `value [timestamp]` lines through the signal monitor and
//! reports every phase change, drift alert, declining-mean warning and
//! rejected sample.

use super::safeguards;
use crate::cli::MonitorArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use vigil_domain::{ArtifactResolver, Phase};
use vigil_engine::{EngineError, Safeguards};
use vigil_monitor::{MonitorError, MonitorStatus};

/// Something the monitor reported for one input line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReplayEventKind {
    /// The sample moved the signal into another phase
    PhaseChange { from: Phase, to: Phase },

    /// The sample extended a sub-floor run past the limit
    DriftAlert { consecutive_below: usize },

    /// The recent coherence mean fell below its floor
    Declining { mean: f64 },

    /// The monitor refused the sample
    Rejected { reason: String },
}

/// One reported event, tied to its input line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayEvent {
    pub line: usize,
    pub timestamp: u64,
    pub value: String,
    #[serde(flatten)]
    pub kind: ReplayEventKind,
}

/// Result of replaying a whole input.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub events: Vec<ReplayEvent>,
    pub status: Option<MonitorStatus>,
    pub trend_window: usize,
    pub samples_recorded: usize,
    pub samples_rejected: usize,
    pub drift_alerts: usize,
    pub declining_warnings: usize,
    #[serde(skip)]
    pub metrics_summary: String,
}

/// Execute the monitor command.
pub fn execute_monitor(args: MonitorArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let mut engine = config.engine.clone();
    if let Some(kind) = args.kind {
        engine.monitor.signal_kind = kind;
    }
    let trend_window = engine.monitor.trend_window;
    let safeguards = safeguards(&engine, ".")?;

    let report = match &args.file {
        Some(path) => replay(BufReader::new(File::open(path)?), &safeguards, trend_window)?,
        None => replay(io::stdin().lock(), &safeguards, trend_window)?,
    };

    println!("{}", formatter.replay(&report)?);
    Ok(())
}

/// Feed every sample line of `input` to the monitor.
pub fn replay<B, R>(input: B, safeguards: &Safeguards<R>, trend_window: usize) -> Result<ReplayReport>
where
    B: BufRead,
    R: ArtifactResolver,
{
    let mut events = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;
        let Some((value, timestamp)) = parse_line(line_no, &line)? else {
            continue;
        };
        let timestamp = timestamp.unwrap_or(line_no as u64);
        let mut push = |kind| {
            events.push(ReplayEvent {
                line: line_no,
                timestamp,
                value: value.to_string(),
                kind,
            })
        };

        match safeguards.observe(value, timestamp) {
            Ok(outcome) => {
                if let Some(change) = outcome.phase_change {
                    push(ReplayEventKind::PhaseChange {
                        from: change.from,
                        to: change.to,
                    });
                }
                if let Some(alert) = outcome.drift_alert {
                    push(ReplayEventKind::DriftAlert {
                        consecutive_below: alert.consecutive_below,
                    });
                }
                if let Some(warning) = outcome.declining {
                    push(ReplayEventKind::Declining { mean: warning.mean });
                }
            }
            Err(EngineError::Monitor(MonitorError::InvalidInput(reason))) => {
                push(ReplayEventKind::Rejected { reason });
            }
            Err(e) => return Err(e.into()),
        }
    }

    let status = match safeguards.status() {
        Ok(status) => Some(status),
        Err(EngineError::Monitor(MonitorError::Uninitialized)) => None,
        Err(e) => return Err(e.into()),
    };
    let metrics = safeguards.monitor_metrics();

    Ok(ReplayReport {
        events,
        status,
        trend_window,
        samples_recorded: metrics.samples_recorded,
        samples_rejected: metrics.samples_rejected,
        drift_alerts: metrics.drift_alerts,
        declining_warnings: metrics.declining_warnings,
        metrics_summary: metrics.summary(),
    })
}

/// Parse `value [timestamp]`, skipping blank lines and `#` comments.
fn parse_line(line_no: usize, line: &str) -> Result<Option<(f64, Option<u64>)>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut fields = line.split_whitespace();
    let value = fields
        .next()
        .unwrap_or_default()
        .parse::<f64>()
        .map_err(|e| CliError::InvalidInput(format!("line {}: bad value: {}", line_no, e)))?;
    let timestamp = fields
        .next()
        .map(|t| {
            t.parse::<u64>().map_err(|e| {
                CliError::InvalidInput(format!("line {}: bad timestamp: {}", line_no, e))
            })
        })
        .transpose()?;

    if fields.next().is_some() {
        return Err(CliError::InvalidInput(format!(
            "line {}: expected `value [timestamp]`",
            line_no
        )));
    }
    Ok(Some((value, timestamp)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_engine::{EngineConfig, FsArtifactResolver};
    use vigil_monitor::{HealthState, MonitorConfig, Trend};

    fn engine(config: &EngineConfig) -> Safeguards<FsArtifactResolver> {
        Safeguards::new(config, FsArtifactResolver::new("."), Vec::new()).unwrap()
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line(1, "0.5").unwrap(), Some((0.5, None)));
        assert_eq!(parse_line(1, "  0.25 1700  ").unwrap(), Some((0.25, Some(1700))));
        assert_eq!(parse_line(1, "").unwrap(), None);
        assert_eq!(parse_line(1, "# comment").unwrap(), None);
    }

    #[test]
    fn test_parse_line_errors_name_the_line() {
        let err = parse_line(7, "high").unwrap_err();
        assert!(err.to_string().contains("line 7"));

        assert!(parse_line(3, "0.5 -1").is_err());
        assert!(parse_line(3, "0.5 10 extra").is_err());
    }

    #[test]
    fn test_replay_drift() {
        let input = "# coherence\n0.97\n0.96\n0.94\n0.93\n0.92\n";
        let safeguards = engine(&EngineConfig::default());
        let report = replay(input.as_bytes(), &safeguards, 5).unwrap();

        assert_eq!(
            report.events,
            vec![ReplayEvent {
                line: 6,
                timestamp: 6,
                value: "0.92".to_string(),
                kind: ReplayEventKind::DriftAlert {
                    consecutive_below: 3
                },
            }]
        );
        let status = report.status.unwrap();
        assert_eq!(status.current_phase, Phase::Structure);
        assert_eq!(status.trend, Trend::Falling);
        assert_eq!(status.health, HealthState::Degraded);
        assert_eq!(report.samples_recorded, 5);
        assert_eq!(report.drift_alerts, 1);
    }

    #[test]
    fn test_replay_strain_phases_and_rejections() {
        let mut config = EngineConfig::default();
        config.monitor = MonitorConfig::strain();
        let input = "0.1 100\n0.5 200\n1.5 300\n0.9 400\n";
        let safeguards = engine(&config);
        let report = replay(input.as_bytes(), &safeguards, 5).unwrap();

        let kinds: Vec<_> = report.events.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(kinds.len(), 3);
        assert_eq!(
            kinds[0],
            ReplayEventKind::PhaseChange {
                from: Phase::Structure,
                to: Phase::Director
            }
        );
        assert!(matches!(kinds[1], ReplayEventKind::Rejected { .. }));
        assert_eq!(report.events[1].timestamp, 300);
        assert_eq!(
            kinds[2],
            ReplayEventKind::PhaseChange {
                from: Phase::Director,
                to: Phase::Flow
            }
        );
        assert_eq!(report.samples_rejected, 1);
        assert!(safeguards.should_reconcile());
    }

    #[test]
    fn test_replay_reports_declining_mean() {
        let mut config = EngineConfig::default();
        config.monitor.drift_consecutive_limit = 10;
        let input = "0.88 10\n0.88 20\n0.88 30\n0.88 40\n0.88 50\n";
        let safeguards = engine(&config);
        let report = replay(input.as_bytes(), &safeguards, 5).unwrap();

        assert_eq!(report.events.len(), 1);
        assert_eq!(report.events[0].line, 5);
        assert_eq!(report.events[0].timestamp, 50);
        assert!(matches!(
            report.events[0].kind,
            ReplayEventKind::Declining { mean } if (mean - 0.88).abs() < 1e-9
        ));
        assert_eq!(report.declining_warnings, 1);
        assert_eq!(report.drift_alerts, 0);
    }

    #[test]
    fn test_replay_without_samples() {
        let safeguards = engine(&EngineConfig::default());
        let report = replay("\n# nothing\n".as_bytes(), &safeguards, 5).unwrap();
        assert!(report.events.is_empty());
        assert!(report.status.is_none());
    }

    #[test]
    fn test_replay_stops_on_malformed_line() {
        let safeguards = engine(&EngineConfig::default());
        let err = replay("0.9\noops\n".as_bytes(), &safeguards, 5).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(msg) if msg.starts_with("line 2")));
    }

    #[test]
    fn test_report_json_shape() {
        let safeguards = engine(&EngineConfig::default());
        let report = replay("0.97\n".as_bytes(), &safeguards, 5).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["samples_recorded"], 1);
        assert_eq!(json["status"]["current_phase"], "STRUCTURE");
        assert!(json.get("metrics_summary").is_none());
    }
}
