//! Phase module - named bands of the strain signal

use serde::{Deserialize, Serialize};
use std::fmt;

/// Strain at which `Director` begins (inclusive)
pub const DIRECTOR_FLOOR: f64 = 0.3;

/// Strain at which `Flow` begins (inclusive)
pub const FLOW_FLOOR: f64 = 0.8;

/// Operating phase derived from the latest strain sample
///
/// The three bands are half-open and cover `[0.0, 1.0]`:
///
/// | Phase | Strain range |
/// |-------|--------------|
/// | **Structure** | `[0.0, 0.3)` |
/// | **Director** | `[0.3, 0.8)` |
/// | **Flow** | `[0.8, 1.0]` |
///
/// A value exactly on a boundary belongs to the higher phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Low strain
    Structure,

    /// Moderate strain
    Director,

    /// High strain, reconcile perspectives before continuing
    Flow,
}

impl Phase {
    /// Map a strain value to its phase
    ///
    /// Pure range lookup. Callers are expected to have rejected
    /// non-finite and out-of-range values already.
    pub fn from_strain(strain: f64) -> Self {
        if strain < DIRECTOR_FLOOR {
            Phase::Structure
        } else if strain < FLOW_FLOOR {
            Phase::Director
        } else {
            Phase::Flow
        }
    }

    /// Inclusive lower bound of this phase's strain band
    pub fn lower_bound(&self) -> f64 {
        match self {
            Phase::Structure => 0.0,
            Phase::Director => DIRECTOR_FLOOR,
            Phase::Flow => FLOW_FLOOR,
        }
    }

    /// Upper bound of this phase's strain band (exclusive except for `Flow`)
    pub fn upper_bound(&self) -> f64 {
        match self {
            Phase::Structure => DIRECTOR_FLOOR,
            Phase::Director => FLOW_FLOOR,
            Phase::Flow => 1.0,
        }
    }

    /// Get the phase name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Structure => "STRUCTURE",
            Phase::Director => "DIRECTOR",
            Phase::Flow => "FLOW",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
