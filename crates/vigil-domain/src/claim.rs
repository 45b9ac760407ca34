//! Claim module - assertions awaiting evidence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of an assertion an agent wants to make
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimKind {
    /// A task or feature is done
    Completion,

    /// The system can do something
    Capability,

    /// A statement about how something is built or specified
    Technical,

    /// A statement about speed, throughput or resource use
    Performance,
}

impl ClaimKind {
    /// All claim kinds, in declaration order
    pub const ALL: [ClaimKind; 4] = [
        ClaimKind::Completion,
        ClaimKind::Capability,
        ClaimKind::Technical,
        ClaimKind::Performance,
    ];

    /// Get the claim kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimKind::Completion => "completion",
            ClaimKind::Capability => "capability",
            ClaimKind::Technical => "technical",
            ClaimKind::Performance => "performance",
        }
    }

    /// Parse a claim kind, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "completion" => Some(ClaimKind::Completion),
            "capability" => Some(ClaimKind::Capability),
            "technical" => Some(ClaimKind::Technical),
            "performance" => Some(ClaimKind::Performance),
            _ => None,
        }
    }
}

impl fmt::Display for ClaimKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ClaimKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid claim kind: {:?}", s))
    }
}

/// A proposed assertion under evaluation
///
/// Claims are ephemeral: built per verification call and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    /// What kind of assertion this is
    pub kind: ClaimKind,

    /// Identifiers of the evidence artifacts backing the claim
    pub evidence: Vec<String>,
}

impl Claim {
    /// Create a new claim
    pub fn new<I, S>(kind: ClaimKind, evidence: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            evidence: evidence.into_iter().map(Into::into).collect(),
        }
    }

    /// Evidence ids with duplicates removed, first occurrence wins
    pub fn distinct_evidence(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.evidence
            .iter()
            .map(String::as_str)
            .filter(|id| seen.insert(*id))
            .collect()
    }
}
