//! Evidence scoring logic

use crate::hints::{is_creation, kind_hints};
use crate::{VerifierConfig, VerifierError};
use serde::Serialize;
use vigil_domain::{ArtifactResolver, Claim, ClaimKind};

/// Confidence at or above which a claim may be accepted
pub const ACCEPTANCE_THRESHOLD: f64 = 0.8;

/// Confidence at or above which a claim is probable
pub const PROBABLE_THRESHOLD: f64 = 0.5;

/// Coarse credibility label, monotonic in confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Qualifier {
    /// Confidence below 0.5
    Uncertain,

    /// Confidence in `[0.5, 0.8)`
    Probable,

    /// Confidence of at least 0.8
    Verified,
}

impl Qualifier {
    /// Classify a confidence score
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= ACCEPTANCE_THRESHOLD {
            Qualifier::Verified
        } else if confidence >= PROBABLE_THRESHOLD {
            Qualifier::Probable
        } else {
            Qualifier::Uncertain
        }
    }

    /// Get the qualifier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Qualifier::Uncertain => "UNCERTAIN",
            Qualifier::Probable => "PROBABLE",
            Qualifier::Verified => "VERIFIED",
        }
    }
}

impl std::fmt::Display for Qualifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a result was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationMethod {
    /// Claim scored against its cited artifacts
    ArtifactExistence,

    /// Prerequisites checked before an action
    PrerequisiteCheck,
}

/// Outcome of evidence verification
///
/// `verified` holds only when confidence reaches [`ACCEPTANCE_THRESHOLD`]
/// and nothing is missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationResult {
    /// Whether the claim may be made
    pub verified: bool,

    /// Credibility score in `[0.0, 1.0]`
    pub confidence: f64,

    /// Label derived from `confidence`
    pub qualifier: Qualifier,

    /// Evidence ids that resolved to existing artifacts
    pub resolved: Vec<String>,

    /// Evidence ids that did not resolve (including resolver failures)
    pub missing: Vec<String>,

    /// Advisory warnings; these never affect the score
    pub warnings: Vec<String>,

    /// How this result was produced
    pub method: VerificationMethod,
}

impl VerificationResult {
    fn new(
        confidence: f64,
        resolved: Vec<String>,
        missing: Vec<String>,
        warnings: Vec<String>,
        method: VerificationMethod,
    ) -> Self {
        let confidence = confidence.clamp(0.0, 1.0);
        Self {
            verified: confidence >= ACCEPTANCE_THRESHOLD && missing.is_empty(),
            confidence,
            qualifier: Qualifier::from_confidence(confidence),
            resolved,
            missing,
            warnings,
            method,
        }
    }
}

/// Scores claims against the artifacts they cite
///
/// Pure with respect to its inputs and the resolver's answers: no state is
/// kept between calls.
pub struct EvidenceVerifier<R> {
    config: VerifierConfig,
    resolver: R,
}

impl<R: ArtifactResolver> EvidenceVerifier<R> {
    /// Create a new verifier with the given configuration and resolver
    pub fn new(config: VerifierConfig, resolver: R) -> Self {
        Self { config, resolver }
    }

    /// Create a verifier with default configuration
    pub fn with_resolver(resolver: R) -> Self {
        Self::new(VerifierConfig::default(), resolver)
    }

    /// Get the active configuration
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Verify a claim given its kind by name
    ///
    /// # Errors
    ///
    /// Returns [`VerifierError::InvalidInput`] when `claim_kind` is empty or
    /// unknown. Empty evidence is not an error.
    pub fn verify<S: AsRef<str>>(
        &self,
        claim_kind: &str,
        evidence: &[S],
    ) -> Result<VerificationResult, VerifierError> {
        let kind = ClaimKind::parse(claim_kind).ok_or_else(|| {
            VerifierError::InvalidInput(format!("unknown claim kind {:?}", claim_kind))
        })?;
        let claim = Claim::new(kind, evidence.iter().map(|id| id.as_ref()));
        Ok(self.verify_claim(&claim))
    }

    /// Verify an already-typed claim
    ///
    /// confidence = resolved / max(distinct ids, kind minimum, 1)
    pub fn verify_claim(&self, claim: &Claim) -> VerificationResult {
        let ids = claim.distinct_evidence();
        let (resolved, missing, mut warnings) = self.resolve_all(&ids);

        let required = ids.len().max(self.config.min_evidence(claim.kind));
        let confidence = resolved.len() as f64 / required as f64;

        if self.config.kind_hints && !ids.is_empty() {
            warnings.extend(kind_hints(claim.kind, &ids));
        }

        let result = VerificationResult::new(
            confidence,
            resolved,
            missing,
            warnings,
            VerificationMethod::ArtifactExistence,
        );

        tracing::debug!(
            kind = %claim.kind,
            confidence = result.confidence,
            missing = result.missing.len(),
            verified = result.verified,
            "Claim verified against evidence"
        );

        result
    }

    /// Check that an action's prerequisites exist before it runs
    ///
    /// Confidence is the resolved fraction of `prerequisites` (1.0 when none
    /// are given). Actions that read as creating something new get a warning
    /// to look for existing work first.
    pub fn verify_prerequisites<S: AsRef<str>>(
        &self,
        action: &str,
        prerequisites: &[S],
    ) -> VerificationResult {
        let ids: Vec<&str> = prerequisites.iter().map(|p| p.as_ref()).collect();
        let (resolved, missing, mut warnings) = self.resolve_all(&ids);

        if is_creation(action) {
            warnings.push(
                "Creating before searching: run existing code before building new".to_string(),
            );
        }

        let confidence = if ids.is_empty() {
            1.0
        } else {
            resolved.len() as f64 / ids.len() as f64
        };

        VerificationResult::new(
            confidence,
            resolved,
            missing,
            warnings,
            VerificationMethod::PrerequisiteCheck,
        )
    }

    /// Resolve every id, treating resolver failures as missing
    fn resolve_all(&self, ids: &[&str]) -> (Vec<String>, Vec<String>, Vec<String>) {
        let mut resolved = Vec::new();
        let mut missing = Vec::new();
        let mut warnings = Vec::new();

        for id in ids {
            match self.resolver.exists(id) {
                Ok(true) => resolved.push(id.to_string()),
                Ok(false) => missing.push(id.to_string()),
                Err(e) => {
                    tracing::warn!(artifact = %id, error = %e, "Artifact resolver failed");
                    warnings.push(format!("Could not resolve {}: {}", id, e));
                    missing.push(id.to_string());
                }
            }
        }

        (resolved, missing, warnings)
    }
}
