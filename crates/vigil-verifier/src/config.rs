//! Verifier configuration

use serde::{Deserialize, Serialize};
use vigil_domain::ClaimKind;

/// Configuration for evidence verification
///
/// The acceptance and qualifier thresholds are fixed; only the per-kind
/// evidence minimums and advisory hints are tunable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Minimum artifacts a completion claim must cite
    pub completion_min_evidence: usize,

    /// Minimum artifacts a capability claim must cite
    pub capability_min_evidence: usize,

    /// Minimum artifacts a technical claim must cite
    pub technical_min_evidence: usize,

    /// Minimum artifacts a performance claim must cite
    pub performance_min_evidence: usize,

    /// Attach advisory warnings (e.g. completion without tests)
    pub kind_hints: bool,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            completion_min_evidence: 1,
            capability_min_evidence: 1,
            technical_min_evidence: 1,
            performance_min_evidence: 1,
            kind_hints: true,
        }
    }
}

impl VerifierConfig {
    /// Create a strict configuration
    ///
    /// Completion claims must cite both an implementation and a test.
    pub fn strict() -> Self {
        Self {
            completion_min_evidence: 2,
            capability_min_evidence: 1,
            technical_min_evidence: 1,
            performance_min_evidence: 1,
            kind_hints: true,
        }
    }

    /// Create a lenient configuration (no hints)
    pub fn lenient() -> Self {
        Self {
            kind_hints: false,
            ..Self::default()
        }
    }

    /// Minimum evidence count for a claim kind, never below one
    pub fn min_evidence(&self, kind: ClaimKind) -> usize {
        let min = match kind {
            ClaimKind::Completion => self.completion_min_evidence,
            ClaimKind::Capability => self.capability_min_evidence,
            ClaimKind::Technical => self.technical_min_evidence,
            ClaimKind::Performance => self.performance_min_evidence,
        };
        min.max(1)
    }
}
