//! Vigil Signal Monitor
//!
//! Tracks a scalar coherence or strain signal over time, maps it onto the
//! three operating phases, and raises drift alerts before degradation
//! compounds.
//!
//! # Overview
//!
//! The monitor is responsible for:
//! - **Phase tracking**: each sample is mapped to a [`Phase`]; a change from
//!   the current phase is reported as a [`PhaseChange`]
//! - **Trend**: direction of the last `k` samples (rising, falling, stable)
//! - **Drift alerts**: a coherence signal that stays below its floor for
//!   more than a configured number of consecutive samples raises a
//!   [`DriftAlert`], independently of phase changes
//! - **Declining mean**: once a full trend window is held, a recent coherence
//!   mean below `declining_mean_floor` raises a [`DecliningMean`] warning
//! - **Health**: coarse classification of the latest sample plus a report
//!   over the whole window
//!
//! ## Phases
//!
//! | Phase | Strain range |
//! |-------|--------------|
//! | **Structure** | `[0.0, 0.3)` |
//! | **Director** | `[0.3, 0.8)` |
//! | **Flow** | `[0.8, 1.0]` |
//!
//! Coherence samples are converted to strain (`1 - coherence`) before the
//! lookup.
//!
//! # Usage
//!
//! ```
//! use vigil_monitor::{MonitorConfig, SignalMonitor};
//!
//! # fn main() -> Result<(), vigil_monitor::MonitorError> {
//! let mut monitor = SignalMonitor::new(MonitorConfig::default())?;
//!
//! let mut last = None;
//! for (t, coherence) in [0.97, 0.96, 0.94, 0.93, 0.92].into_iter().enumerate() {
//!     last = monitor.record(coherence, t as u64)?.drift_alert;
//! }
//! assert!(last.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [monitor]
//! signal_kind = "coherence"
//! window_capacity = 100
//! trend_window = 5
//! flat_tolerance = 0.01
//! coherence_floor = 0.95
//! drift_consecutive_limit = 2
//! declining_mean_floor = 0.9
//! hysteresis = 0.0
//! ```
//!
//! [`Phase`]: vigil_domain::Phase

#![warn(missing_docs)]

mod config;
mod error;
mod health;
mod metrics;
mod monitor;

pub use config::MonitorConfig;
pub use error::MonitorError;
pub use health::{HealthReport, HealthState};
pub use metrics::MonitorMetrics;
pub use monitor::{
    DecliningMean, DriftAlert, MonitorStatus, PhaseChange, RecordOutcome, SignalMonitor, Trend,
};
