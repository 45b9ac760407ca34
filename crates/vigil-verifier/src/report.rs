//! Running totals over verification results

use crate::VerificationResult;
use serde::Serialize;

/// Summary of every verification recorded so far
///
/// Kept outside [`EvidenceVerifier`](crate::EvidenceVerifier) so that
/// verification itself stays free of side effects; the host records each
/// result it cares about.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VerificationReport {
    /// Results recorded
    pub total: usize,

    /// Results that were verified
    pub verified: usize,

    /// Sum of all recorded confidences
    confidence_sum: f64,
}

impl VerificationReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one result
    pub fn record(&mut self, result: &VerificationResult) {
        self.total += 1;
        if result.verified {
            self.verified += 1;
        }
        self.confidence_sum += result.confidence;
    }

    /// Fraction of recorded results that were verified (0.0 when empty)
    pub fn verification_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.verified as f64 / self.total as f64
    }

    /// Mean confidence of recorded results (0.0 when empty)
    pub fn average_confidence(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.confidence_sum / self.total as f64
    }

    /// Generate a summary report
    pub fn summary(&self) -> String {
        [
            "Verification Summary".to_string(),
            "====================".to_string(),
            format!("Verifications: {}", self.total),
            format!("Verified: {}", self.verified),
            format!("Verification rate: {:.2}", self.verification_rate()),
            format!("Average confidence: {:.2}", self.average_confidence()),
        ]
        .join("\n")
    }
}
