//! Configuration for the consensus advisor

use crate::AdvisorError;
use serde::{Deserialize, Serialize};

/// Configuration for the consensus advisor
///
/// All values are on the normalized `[0.0, 1.0]` distance scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// A lens further than this from the centroid is a dissenter
    /// Default: 0.2
    pub tolerance: f64,

    /// Disagreement at or above this is medium risk
    /// Default: 0.2
    pub medium_threshold: f64,

    /// Disagreement at or above this is high risk
    /// Default: 0.4
    pub high_threshold: f64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.2,
            medium_threshold: 0.2,
            high_threshold: 0.4,
        }
    }
}

impl AdvisorConfig {
    /// Reject configurations outside the normalized scale or with
    /// inverted risk thresholds
    pub fn validate(&self) -> Result<(), AdvisorError> {
        for (name, value) in [
            ("tolerance", self.tolerance),
            ("medium_threshold", self.medium_threshold),
            ("high_threshold", self.high_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(AdvisorError::InvalidInput(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        if self.medium_threshold > self.high_threshold {
            return Err(AdvisorError::InvalidInput(
                "medium_threshold must not exceed high_threshold".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AdvisorConfig::default();
        assert_eq!(config.tolerance, 0.2);
        assert_eq!(config.medium_threshold, 0.2);
        assert_eq!(config.high_threshold, 0.4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let config = AdvisorConfig {
            medium_threshold: 0.5,
            high_threshold: 0.3,
            ..AdvisorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let config = AdvisorConfig {
            tolerance: f64::NAN,
            ..AdvisorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config: AdvisorConfig = toml::from_str("tolerance = 0.1").unwrap();
        assert_eq!(config.tolerance, 0.1);
        assert_eq!(config.high_threshold, 0.4);
    }
}
