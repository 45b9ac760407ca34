//! Consensus types and the dispersion math behind them

use crate::{AdvisorConfig, AdvisorError};
use serde::Serialize;
use std::fmt;
use vigil_domain::{LensId, Perspective};

/// Three-bucket classification of a disagreement score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Below the medium threshold
    Low,

    /// At or above the medium threshold, below the high threshold
    Medium,

    /// At or above the high threshold
    High,
}

impl RiskLevel {
    /// Classify a disagreement score against the configured thresholds
    pub fn from_score(score: f64, config: &AdvisorConfig) -> Self {
        if score >= config.high_threshold {
            RiskLevel::High
        } else if score >= config.medium_threshold {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Get the risk level name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How far apart the collected perspectives are
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DriftIndicators {
    /// Mean pairwise distance, normalized to `[0.0, 1.0]`
    pub disagreement_score: f64,

    /// Bucketed score
    pub risk_level: RiskLevel,
}

/// A lens whose judgment sits beyond tolerance from the aggregate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dissent {
    /// Dissenting lens
    pub lens: LensId,

    /// Normalized distance from the aggregate
    pub distance: f64,

    /// Confidence the lens reported
    pub confidence: f64,
}

/// Reconciled view of all perspectives
///
/// Dissenters are always reported, never dropped, so the caller can choose
/// to escalate rather than accept the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Consensus {
    /// Confidence-weighted centroid of all judgments (empty with no input)
    pub aggregate: Vec<f64>,

    /// Same score as [`DriftIndicators::disagreement_score`]
    pub disagreement_score: f64,

    /// Same bucket as [`DriftIndicators::risk_level`]
    pub risk_level: RiskLevel,

    /// Lenses beyond tolerance, in input order
    pub dissenters: Vec<Dissent>,

    /// Every lens that contributed, in input order
    pub participants: Vec<LensId>,
}

impl Consensus {
    /// Lens ids of all dissenters
    pub fn dissenting_lenses(&self) -> Vec<LensId> {
        self.dissenters.iter().map(|d| d.lens).collect()
    }

    /// True when no lens dissents
    pub fn is_unanimous(&self) -> bool {
        self.dissenters.is_empty()
    }

    /// Indicators view of this consensus
    pub fn indicators(&self) -> DriftIndicators {
        DriftIndicators {
            disagreement_score: self.disagreement_score,
            risk_level: self.risk_level,
        }
    }
}

/// Check every perspective is on the normalized scale and that all share a
/// dimension; returns that dimension (0 for an empty set)
pub(crate) fn validate(perspectives: &[Perspective]) -> Result<usize, AdvisorError> {
    let Some(first) = perspectives.first() else {
        return Ok(0);
    };
    let dimension = first.dimension();

    for p in perspectives {
        if p.judgment.is_empty() {
            return Err(invalid(p.lens, "judgment is empty"));
        }
        if p.dimension() != dimension {
            return Err(invalid(
                p.lens,
                &format!("dimension {} does not match {}", p.dimension(), dimension),
            ));
        }
        if p.judgment.iter().any(|v| !in_unit_range(*v)) {
            return Err(invalid(p.lens, "judgment components must be within [0, 1]"));
        }
        if !in_unit_range(p.confidence) {
            return Err(invalid(p.lens, "confidence must be within [0, 1]"));
        }
    }

    Ok(dimension)
}

/// Mean pairwise distance across all perspectives (0 with fewer than two)
pub(crate) fn disagreement(perspectives: &[Perspective]) -> f64 {
    let n = perspectives.len();
    if n < 2 {
        return 0.0;
    }

    let mut total = 0.0;
    for (i, a) in perspectives.iter().enumerate() {
        for b in &perspectives[i + 1..] {
            total += distance(&a.judgment, &b.judgment);
        }
    }
    let pairs = (n * (n - 1) / 2) as f64;
    total / pairs
}

/// Confidence-weighted centroid, plain mean when all confidences are zero
pub(crate) fn centroid(perspectives: &[Perspective], dimension: usize) -> Vec<f64> {
    if perspectives.is_empty() {
        return Vec::new();
    }

    let total_weight: f64 = perspectives.iter().map(|p| p.confidence).sum();
    let uniform = total_weight <= 0.0;
    let norm = if uniform {
        perspectives.len() as f64
    } else {
        total_weight
    };

    let mut aggregate = vec![0.0; dimension];
    for p in perspectives {
        let weight = if uniform { 1.0 } else { p.confidence };
        for (acc, v) in aggregate.iter_mut().zip(&p.judgment) {
            *acc += weight * v;
        }
    }
    for acc in &mut aggregate {
        *acc /= norm;
    }
    aggregate
}

/// Euclidean distance scaled by `1/sqrt(dim)` so it stays in `[0.0, 1.0]`
pub(crate) fn distance(a: &[f64], b: &[f64]) -> f64 {
    if a.is_empty() {
        return 0.0;
    }
    let sum: f64 = a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum();
    sum.sqrt() / (a.len() as f64).sqrt()
}

fn in_unit_range(v: f64) -> bool {
    v.is_finite() && (0.0..=1.0).contains(&v)
}

fn invalid(lens: LensId, message: &str) -> AdvisorError {
    AdvisorError::InvalidInput(format!("{} perspective: {}", lens, message))
}
