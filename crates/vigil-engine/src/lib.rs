//! Vigil Engine
//!
//! Host-side composition of the four safeguards behind one handle.
//!
//! # Overview
//!
//! [`Safeguards`] owns an evidence verifier, a pattern ledger, a signal
//! monitor and a consensus advisor, built from a single [`EngineConfig`].
//! The mutable pieces (lesson fire counts, the sample window, the running
//! verification report) each sit behind one mutex, so a single instance
//! can be shared across concurrent agent sessions.
//!
//! Control flow the facade supports:
//!
//! 1. Before acting, call [`Safeguards::gate_action`] (ledger match plus
//!    prerequisite check) or [`Safeguards::verify_claim`] before asserting
//!    something.
//! 2. At a regular cadence, feed a sample with [`Safeguards::observe`].
//! 3. When the signal is in FLOW, [`Safeguards::advise_if_strained`] runs a
//!    consensus round.
//!
//! # Configuration
//!
//! ```toml
//! # Optional: replace the core lessons with a custom catalog
//! lessons_path = "lessons.toml"
//!
//! [verifier]
//! completion_min_evidence = 2
//!
//! [monitor]
//! signal_kind = "coherence"
//! coherence_floor = 0.95
//!
//! [advisor]
//! tolerance = 0.2
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use vigil_engine::{EngineConfig, FsArtifactResolver, Safeguards};
//!
//! # fn main() -> Result<(), vigil_engine::EngineError> {
//! let config = EngineConfig::from_file("vigil.toml")?;
//! let safeguards = Safeguards::new(&config, FsArtifactResolver::new("."), Vec::new())?;
//!
//! let result = safeguards.verify_claim("completion", &["tests/login_test.rs"])?;
//! if !result.verified {
//!     println!("not verified: missing {:?}", result.missing);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod resolver;
mod safeguards;

pub use config::{ConfigError, EngineConfig};
pub use error::EngineError;
pub use resolver::FsArtifactResolver;
pub use safeguards::{ActionGate, Safeguards};
