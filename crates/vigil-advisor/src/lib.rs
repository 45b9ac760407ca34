//! Vigil Consensus Advisor
//!
//! Collects independent lens perspectives about the current situation,
//! measures how much they disagree, and reconciles them into a weighted
//! aggregate while reporting every dissenter.
//!
//! # Overview
//!
//! - [`ConsensusAdvisor::collect`] polls one injected provider per lens.
//!   Failing providers are listed as unavailable rather than failing the
//!   round.
//! - [`ConsensusAdvisor::assess`] computes the disagreement score (mean
//!   pairwise distance, normalized to `[0, 1]`) and buckets it into a
//!   [`RiskLevel`].
//! - [`ConsensusAdvisor::reconcile`] computes the confidence-weighted
//!   centroid and flags lenses further than `tolerance` from it.
//!
//! Fewer than two perspectives is a supported degraded mode: the result is
//! a trivial consensus with zero disagreement.
//!
//! The advisor never reads monitor state. Calling it when the signal is in
//! the FLOW phase is a caller policy (see `vigil-engine`).
//!
//! # Usage
//!
//! ```
//! use vigil_advisor::{AdvisorConfig, ConsensusAdvisor, RiskLevel};
//! use vigil_domain::{LensId, Perspective};
//!
//! # fn main() -> Result<(), vigil_advisor::AdvisorError> {
//! let advisor = ConsensusAdvisor::new(AdvisorConfig::default(), Vec::new())?;
//! let consensus = advisor.reconcile(&[
//!     Perspective::scalar(LensId::BinaryLogic, 0.2, 0.9),
//!     Perspective::scalar(LensId::Performance, 0.8, 0.9),
//! ])?;
//!
//! assert_eq!(consensus.risk_level, RiskLevel::High);
//! assert_eq!(consensus.dissenters.len(), 2);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod advisor;
mod config;
mod consensus;
mod error;

pub use advisor::{Advice, Collection, ConsensusAdvisor};
pub use config::AdvisorConfig;
pub use consensus::{Consensus, Dissent, DriftIndicators, RiskLevel};
pub use error::AdvisorError;
