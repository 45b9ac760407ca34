//! Vigil Evidence Verifier
//!
//! Scores a claim's credibility against the evidence artifacts it cites.
//!
//! The verifier provides:
//! - Evidence scoring (resolved artifacts over required artifacts)
//! - Qualifier classification (uncertain, probable, verified)
//! - Advisory hints for claim kinds that usually need specific evidence
//! - Prerequisite checks before an action is taken
//!
//! Artifact lookups go through an injected [`ArtifactResolver`]; the verifier
//! does no I/O of its own.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashSet;
//! use vigil_domain::ArtifactResolver;
//! use vigil_verifier::{EvidenceVerifier, Qualifier, VerifierConfig};
//!
//! struct Known(HashSet<&'static str>);
//!
//! impl ArtifactResolver for Known {
//!     type Error = std::convert::Infallible;
//!     fn exists(&self, id: &str) -> Result<bool, Self::Error> {
//!         Ok(self.0.contains(id))
//!     }
//! }
//!
//! let verifier = EvidenceVerifier::new(VerifierConfig::default(), Known(["a.txt"].into()));
//! let result = verifier.verify("completion", &["a.txt", "b.txt"]).unwrap();
//! assert_eq!(result.confidence, 0.5);
//! assert_eq!(result.qualifier, Qualifier::Probable);
//! assert!(!result.verified);
//! ```
//!
//! [`ArtifactResolver`]: vigil_domain::ArtifactResolver

#![warn(missing_docs)]

mod config;
mod error;
mod hints;
mod report;
mod verifier;

pub use config::VerifierConfig;
pub use error::VerifierError;
pub use report::VerificationReport;
pub use verifier::{
    EvidenceVerifier, Qualifier, VerificationMethod, VerificationResult, ACCEPTANCE_THRESHOLD,
    PROBABLE_THRESHOLD,
};
