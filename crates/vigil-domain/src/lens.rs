//! Lens module - independent perspectives on the current situation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one perspective-generating source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LensId {
    /// Pass/fail view of the system: does it work at all
    BinaryLogic,

    /// Latency and throughput view
    Performance,

    /// Error and silent-failure view
    ErrorAnalysis,

    /// What users are reporting
    UserFeedback,
}

impl LensId {
    /// All lenses, in declaration order
    pub const ALL: [LensId; 4] = [
        LensId::BinaryLogic,
        LensId::Performance,
        LensId::ErrorAnalysis,
        LensId::UserFeedback,
    ];

    /// Get the lens name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LensId::BinaryLogic => "binary_logic",
            LensId::Performance => "performance",
            LensId::ErrorAnalysis => "error_analysis",
            LensId::UserFeedback => "user_feedback",
        }
    }
}

impl fmt::Display for LensId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One lens's opinion, collected fresh on each advisory call
///
/// `judgment` is a normalized vector with every component in `[0.0, 1.0]`.
/// A scalar judgment is a vector of length one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Perspective {
    /// Which lens produced this opinion
    pub lens: LensId,

    /// Normalized judgment
    pub judgment: Vec<f64>,

    /// Self-reported confidence in `[0.0, 1.0]`
    pub confidence: f64,

    /// Short free-text rationale, for display only
    #[serde(default)]
    pub note: String,
}

impl Perspective {
    /// Create a perspective with a vector judgment
    pub fn new(lens: LensId, judgment: Vec<f64>, confidence: f64) -> Self {
        Self {
            lens,
            judgment,
            confidence,
            note: String::new(),
        }
    }

    /// Create a perspective with a scalar judgment
    pub fn scalar(lens: LensId, judgment: f64, confidence: f64) -> Self {
        Self::new(lens, vec![judgment], confidence)
    }

    /// Attach a rationale
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Dimension of the judgment vector
    pub fn dimension(&self) -> usize {
        self.judgment.len()
    }
}
