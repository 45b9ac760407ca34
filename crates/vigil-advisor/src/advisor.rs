//! Consensus advisor implementation

use crate::consensus::{self, Consensus, Dissent, DriftIndicators, RiskLevel};
use crate::{AdvisorConfig, AdvisorError};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, warn};
use vigil_domain::{LensId, LensProvider, Perspective};

/// Result of polling every provider once
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Collection {
    /// Perspectives produced, in provider order
    pub perspectives: Vec<Perspective>,

    /// Lenses whose provider failed or answered for the wrong lens
    pub unavailable: Vec<LensId>,
}

/// Output of a full collect-then-reconcile round
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advice {
    /// Reconciled view of the perspectives that were available
    pub consensus: Consensus,

    /// Lenses that could not be consulted this round
    pub unavailable: Vec<LensId>,
}

/// Gathers lens perspectives and reconciles them
///
/// Holds one provider per lens. The advisor is stateless between calls;
/// every round polls the providers afresh.
pub struct ConsensusAdvisor {
    config: AdvisorConfig,
    providers: Vec<Box<dyn LensProvider>>,
}

impl ConsensusAdvisor {
    /// Create an advisor over the given providers
    ///
    /// Fails when the configuration is invalid or two providers claim the
    /// same lens.
    pub fn new(
        config: AdvisorConfig,
        providers: Vec<Box<dyn LensProvider>>,
    ) -> Result<Self, AdvisorError> {
        config.validate()?;

        let mut seen = HashSet::new();
        for provider in &providers {
            let lens = provider.lens();
            if !seen.insert(lens) {
                return Err(AdvisorError::InvalidInput(format!(
                    "more than one provider registered for lens {}",
                    lens
                )));
            }
        }

        Ok(Self { config, providers })
    }

    /// Get the advisor configuration
    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    /// Lenses with a registered provider, in registration order
    pub fn lenses(&self) -> Vec<LensId> {
        self.providers.iter().map(|p| p.lens()).collect()
    }

    /// Poll every provider once
    ///
    /// A failing provider is logged and listed as unavailable; it never
    /// fails the round.
    pub fn collect(&self) -> Collection {
        let mut collection = Collection::default();

        for provider in &self.providers {
            let lens = provider.lens();
            match provider.produce() {
                Ok(perspective) if perspective.lens == lens => {
                    collection.perspectives.push(perspective);
                }
                Ok(perspective) => {
                    warn!(
                        lens = %lens,
                        reported = %perspective.lens,
                        "Lens provider answered for a different lens"
                    );
                    collection.unavailable.push(lens);
                }
                Err(e) => {
                    warn!(lens = %lens, error = %e, "Lens provider failed");
                    collection.unavailable.push(lens);
                }
            }
        }

        debug!(
            collected = collection.perspectives.len(),
            unavailable = collection.unavailable.len(),
            "Collected perspectives"
        );
        collection
    }

    /// Measure how far apart the perspectives are
    ///
    /// Fewer than two perspectives give a zero score.
    pub fn assess(&self, perspectives: &[Perspective]) -> Result<DriftIndicators, AdvisorError> {
        consensus::validate(perspectives)?;

        let disagreement_score = consensus::disagreement(perspectives);
        Ok(DriftIndicators {
            disagreement_score,
            risk_level: RiskLevel::from_score(disagreement_score, &self.config),
        })
    }

    /// Reconcile perspectives into a weighted aggregate and list dissenters
    ///
    /// A dissenter is any lens strictly further than `tolerance` from the
    /// aggregate. An empty input yields an empty aggregate with zero
    /// disagreement.
    pub fn reconcile(&self, perspectives: &[Perspective]) -> Result<Consensus, AdvisorError> {
        let dimension = consensus::validate(perspectives)?;
        let indicators = self.assess(perspectives)?;
        let aggregate = consensus::centroid(perspectives, dimension);

        let dissenters: Vec<Dissent> = perspectives
            .iter()
            .filter_map(|p| {
                let distance = consensus::distance(&p.judgment, &aggregate);
                (distance > self.config.tolerance).then_some(Dissent {
                    lens: p.lens,
                    distance,
                    confidence: p.confidence,
                })
            })
            .collect();

        let result = Consensus {
            aggregate,
            disagreement_score: indicators.disagreement_score,
            risk_level: indicators.risk_level,
            dissenters,
            participants: perspectives.iter().map(|p| p.lens).collect(),
        };

        info!(
            participants = result.participants.len(),
            dissenters = result.dissenters.len(),
            score = result.disagreement_score,
            risk = %result.risk_level,
            "Consensus reconciled"
        );
        Ok(result)
    }

    /// Collect from every provider and reconcile what came back
    pub fn advise(&self) -> Result<Advice, AdvisorError> {
        let collection = self.collect();
        let consensus = self.reconcile(&collection.perspectives)?;
        Ok(Advice {
            consensus,
            unavailable: collection.unavailable,
        })
    }
}

impl std::fmt::Debug for ConsensusAdvisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsensusAdvisor")
            .field("config", &self.config)
            .field("lenses", &self.lenses())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_domain::ProviderError;

    struct Fixed(Perspective);

    impl LensProvider for Fixed {
        fn lens(&self) -> LensId {
            self.0.lens
        }

        fn produce(&self) -> Result<Perspective, ProviderError> {
            Ok(self.0.clone())
        }
    }

    struct Broken(LensId);

    impl LensProvider for Broken {
        fn lens(&self) -> LensId {
            self.0
        }

        fn produce(&self) -> Result<Perspective, ProviderError> {
            Err("metrics backend unreachable".into())
        }
    }

    fn advisor(providers: Vec<Box<dyn LensProvider>>) -> ConsensusAdvisor {
        ConsensusAdvisor::new(AdvisorConfig::default(), providers).unwrap()
    }

    #[test]
    fn test_two_opposed_lenses_both_dissent() {
        let advisor = advisor(vec![]);
        let perspectives = vec![
            Perspective::scalar(LensId::BinaryLogic, 0.2, 0.9),
            Perspective::scalar(LensId::Performance, 0.8, 0.9),
        ];

        let consensus = advisor.reconcile(&perspectives).unwrap();

        assert!((consensus.aggregate[0] - 0.5).abs() < 1e-12);
        assert_eq!(
            consensus.dissenting_lenses(),
            vec![LensId::BinaryLogic, LensId::Performance]
        );
        assert_eq!(consensus.risk_level, RiskLevel::High);
        assert!((consensus.disagreement_score - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_single_perspective_is_trivial_consensus() {
        let advisor = advisor(vec![]);
        let perspectives = vec![Perspective::new(LensId::ErrorAnalysis, vec![0.3, 0.9], 0.5)];

        let indicators = advisor.assess(&perspectives).unwrap();
        assert_eq!(indicators.disagreement_score, 0.0);
        assert_eq!(indicators.risk_level, RiskLevel::Low);

        let consensus = advisor.reconcile(&perspectives).unwrap();
        assert_eq!(consensus.aggregate, vec![0.3, 0.9]);
        assert!(consensus.is_unanimous());
        assert_eq!(consensus.participants, vec![LensId::ErrorAnalysis]);
    }

    #[test]
    fn test_empty_input_is_valid() {
        let advisor = advisor(vec![]);
        let consensus = advisor.reconcile(&[]).unwrap();

        assert!(consensus.aggregate.is_empty());
        assert_eq!(consensus.disagreement_score, 0.0);
        assert!(consensus.participants.is_empty());
    }

    #[test]
    fn test_agreeing_lenses_low_risk() {
        let advisor = advisor(vec![]);
        let perspectives = vec![
            Perspective::scalar(LensId::BinaryLogic, 0.5, 1.0),
            Perspective::scalar(LensId::Performance, 0.55, 1.0),
            Perspective::scalar(LensId::UserFeedback, 0.6, 1.0),
        ];

        let consensus = advisor.reconcile(&perspectives).unwrap();
        assert_eq!(consensus.risk_level, RiskLevel::Low);
        assert!(consensus.is_unanimous());
    }

    #[test]
    fn test_distance_equal_to_tolerance_is_not_dissent() {
        let config = AdvisorConfig {
            tolerance: 0.25,
            ..AdvisorConfig::default()
        };
        let advisor = ConsensusAdvisor::new(config, vec![]).unwrap();
        let perspectives = vec![
            Perspective::scalar(LensId::BinaryLogic, 0.25, 1.0),
            Perspective::scalar(LensId::Performance, 0.75, 1.0),
        ];

        let consensus = advisor.reconcile(&perspectives).unwrap();
        assert!(consensus.is_unanimous());
    }

    #[test]
    fn test_dimension_mismatch_is_invalid() {
        let advisor = advisor(vec![]);
        let perspectives = vec![
            Perspective::scalar(LensId::BinaryLogic, 0.5, 1.0),
            Perspective::new(LensId::Performance, vec![0.5, 0.5], 1.0),
        ];

        assert!(matches!(
            advisor.reconcile(&perspectives),
            Err(AdvisorError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_duplicate_lens_rejected() {
        let result = ConsensusAdvisor::new(
            AdvisorConfig::default(),
            vec![
                Box::new(Broken(LensId::Performance)),
                Box::new(Broken(LensId::Performance)),
            ],
        );
        assert!(matches!(result, Err(AdvisorError::InvalidInput(_))));
    }

    #[test]
    fn test_collect_lists_failed_providers() {
        let advisor = advisor(vec![
            Box::new(Fixed(Perspective::scalar(LensId::BinaryLogic, 0.95, 0.95))),
            Box::new(Broken(LensId::Performance)),
            Box::new(Fixed(Perspective::scalar(LensId::UserFeedback, 0.45, 0.45))),
        ]);

        let collection = advisor.collect();
        assert_eq!(collection.perspectives.len(), 2);
        assert_eq!(collection.unavailable, vec![LensId::Performance]);
    }

    #[test]
    fn test_provider_answering_for_wrong_lens_is_unavailable() {
        struct Confused;
        impl LensProvider for Confused {
            fn lens(&self) -> LensId {
                LensId::ErrorAnalysis
            }
            fn produce(&self) -> Result<Perspective, ProviderError> {
                Ok(Perspective::scalar(LensId::UserFeedback, 0.5, 0.5))
            }
        }

        let advisor = advisor(vec![Box::new(Confused)]);
        let collection = advisor.collect();
        assert!(collection.perspectives.is_empty());
        assert_eq!(collection.unavailable, vec![LensId::ErrorAnalysis]);
    }

    #[test]
    fn test_advise_degrades_to_available_lenses() {
        let advisor = advisor(vec![
            Box::new(Broken(LensId::BinaryLogic)),
            Box::new(Fixed(Perspective::scalar(LensId::Performance, 0.7, 0.8))),
        ]);

        let advice = advisor.advise().unwrap();
        assert_eq!(advice.unavailable, vec![LensId::BinaryLogic]);
        assert_eq!(advice.consensus.participants, vec![LensId::Performance]);
        assert_eq!(advice.consensus.disagreement_score, 0.0);
    }
}
