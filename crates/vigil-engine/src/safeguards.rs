//! The safeguards facade

use crate::{EngineConfig, EngineError};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};
use vigil_advisor::{Advice, ConsensusAdvisor};
use vigil_domain::{ArtifactResolver, LensProvider, Phase, SessionId};
use vigil_ledger::{LessonCatalog, PatternLedger, Warning};
use vigil_monitor::{HealthReport, MonitorMetrics, MonitorStatus, RecordOutcome, SignalMonitor};
use vigil_verifier::{EvidenceVerifier, VerificationReport, VerificationResult};

/// Verdict on a proposed action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionGate {
    /// Lesson the action repeats, if any
    pub warning: Option<Warning>,

    /// Whether the action's prerequisites exist
    pub prerequisites: VerificationResult,
}

impl ActionGate {
    /// True when no lesson matched and every prerequisite resolved
    pub fn is_clear(&self) -> bool {
        self.warning.is_none() && self.prerequisites.verified
    }
}

/// All four safeguards behind one shareable handle
///
/// The ledger, monitor and verification report each sit behind their own
/// mutex, so concurrent callers see every update applied exactly once.
/// The verifier and advisor keep no state between calls and are used
/// without locking.
pub struct Safeguards<R>
where
    R: ArtifactResolver,
{
    session: SessionId,
    verifier: EvidenceVerifier<R>,
    ledger: Mutex<PatternLedger>,
    monitor: Mutex<SignalMonitor>,
    report: Mutex<VerificationReport>,
    advisor: ConsensusAdvisor,
}

impl<R> Safeguards<R>
where
    R: ArtifactResolver,
{
    /// Build every component from `config`
    ///
    /// Loads the lesson catalog from `lessons_path` when set, otherwise the
    /// core lessons. The session id is resolved here, once.
    pub fn new(
        config: &EngineConfig,
        resolver: R,
        providers: Vec<Box<dyn LensProvider>>,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        let catalog = match &config.lessons_path {
            Some(path) => LessonCatalog::from_file(path)?,
            None => LessonCatalog::core(),
        };
        let ledger = PatternLedger::new(catalog)?;
        let monitor = SignalMonitor::new(config.monitor.clone())?;
        let advisor = ConsensusAdvisor::new(config.advisor.clone(), providers)?;
        let session = config.resolve_session_id()?;

        info!(
            session = %session,
            lessons = ledger.len(),
            catalog = ledger.version(),
            lenses = advisor.lenses().len(),
            "Safeguards initialized"
        );

        Ok(Self {
            session,
            verifier: EvidenceVerifier::new(config.verifier.clone(), resolver),
            ledger: Mutex::new(ledger),
            monitor: Mutex::new(monitor),
            report: Mutex::new(VerificationReport::new()),
            advisor,
        })
    }

    /// Session this instance was created for
    pub fn session_id(&self) -> SessionId {
        self.session
    }

    /// Check an action against the ledger and its prerequisites
    pub fn gate_action<S: AsRef<str>>(&self, action: &str, prerequisites: &[S]) -> ActionGate {
        let warning = self.check_action(action);
        let prerequisites = self.verifier.verify_prerequisites(action, prerequisites);

        if !prerequisites.missing.is_empty() {
            debug!(action, missing = ?prerequisites.missing, "Action prerequisites missing");
        }

        ActionGate {
            warning,
            prerequisites,
        }
    }

    /// Check an action against the ledger only
    pub fn check_action(&self, action: &str) -> Option<Warning> {
        let warning = lock(&self.ledger).check(action);
        if let Some(w) = &warning {
            info!(
                session = %self.session,
                lesson = %w.lesson_key,
                severity = %w.severity,
                "Action matches lesson"
            );
        }
        warning
    }

    /// Verify a claim and record the result in the session report
    pub fn verify_claim<S: AsRef<str>>(
        &self,
        claim_kind: &str,
        evidence: &[S],
    ) -> Result<VerificationResult, EngineError> {
        let result = self.verifier.verify(claim_kind, evidence)?;
        lock(&self.report).record(&result);

        if !result.verified {
            info!(
                session = %self.session,
                kind = claim_kind,
                confidence = result.confidence,
                qualifier = %result.qualifier,
                "Claim not verified"
            );
        }
        Ok(result)
    }

    /// Feed one signal sample to the monitor
    pub fn observe(&self, value: f64, timestamp: u64) -> Result<RecordOutcome, EngineError> {
        Ok(lock(&self.monitor).record(value, timestamp)?)
    }

    /// Current monitor status
    pub fn status(&self) -> Result<MonitorStatus, EngineError> {
        Ok(lock(&self.monitor).status()?)
    }

    /// Health snapshot over the monitor window
    pub fn health_report(&self) -> HealthReport {
        lock(&self.monitor).health_report()
    }

    /// Copy of the monitor's counters
    pub fn monitor_metrics(&self) -> MonitorMetrics {
        lock(&self.monitor).metrics().clone()
    }

    /// Whether the signal is currently in FLOW, where perspectives should
    /// be reconciled before continuing
    pub fn should_reconcile(&self) -> bool {
        lock(&self.monitor).current_phase() == Some(Phase::Flow)
    }

    /// Run a consensus round unconditionally
    pub fn advise(&self) -> Result<Advice, EngineError> {
        let advice = self.advisor.advise()?;
        if !advice.unavailable.is_empty() {
            warn!(
                session = %self.session,
                unavailable = ?advice.unavailable,
                "Consensus formed without every lens"
            );
        }
        Ok(advice)
    }

    /// Run a consensus round only when the signal is in FLOW
    pub fn advise_if_strained(&self) -> Result<Option<Advice>, EngineError> {
        if !self.should_reconcile() {
            return Ok(None);
        }
        self.advise().map(Some)
    }

    /// Copy of the running verification totals
    pub fn report(&self) -> VerificationReport {
        lock(&self.report).clone()
    }

    /// Run a read-only query against the ledger
    ///
    /// ```
    /// # use vigil_engine::{EngineConfig, FsArtifactResolver, Safeguards};
    /// # let safeguards = Safeguards::new(&EngineConfig::default(), FsArtifactResolver::new("."), Vec::new()).unwrap();
    /// let total = safeguards.with_ledger(|ledger| ledger.stats().total_lessons);
    /// assert_eq!(total, 10);
    /// ```
    pub fn with_ledger<T>(&self, f: impl FnOnce(&PatternLedger) -> T) -> T {
        f(&lock(&self.ledger))
    }
}

impl<R> std::fmt::Debug for Safeguards<R>
where
    R: ArtifactResolver,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Safeguards")
            .field("session", &self.session)
            .field("advisor", &self.advisor)
            .finish_non_exhaustive()
    }
}

/// Take a lock, recovering the guard if a previous holder panicked
///
/// Every guarded update is a single in-memory step, so the state behind a
/// poisoned lock is still consistent.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use vigil_domain::{LensId, Perspective, ProviderError};
    use vigil_verifier::Qualifier;

    struct Known(HashSet<&'static str>);

    impl ArtifactResolver for Known {
        type Error = String;

        fn exists(&self, id: &str) -> Result<bool, Self::Error> {
            Ok(self.0.contains(id))
        }
    }

    struct Fixed(LensId, f64);

    impl LensProvider for Fixed {
        fn lens(&self) -> LensId {
            self.0
        }

        fn produce(&self) -> Result<Perspective, ProviderError> {
            Ok(Perspective::scalar(self.0, self.1, 0.8))
        }
    }

    fn safeguards(existing: &[&'static str]) -> Safeguards<Known> {
        Safeguards::new(
            &EngineConfig::default(),
            Known(existing.iter().copied().collect()),
            vec![
                Box::new(Fixed(LensId::BinaryLogic, 0.2)),
                Box::new(Fixed(LensId::Performance, 0.8)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_partial_evidence_recorded_in_report() {
        let sg = safeguards(&["a.txt"]);
        let result = sg.verify_claim("completion", &["a.txt", "b.txt"]).unwrap();

        assert_eq!(result.confidence, 0.5);
        assert_eq!(result.qualifier, Qualifier::Probable);
        assert!(!result.verified);
        assert_eq!(result.missing, vec!["b.txt"]);

        let report = sg.report();
        assert_eq!(report.total, 1);
        assert_eq!(report.verified, 0);
    }

    #[test]
    fn test_unknown_claim_kind_is_error_and_not_recorded() {
        let sg = safeguards(&[]);
        let err = sg.verify_claim("vibes", &["a.txt"]).unwrap_err();
        assert!(matches!(err, EngineError::Verifier(_)));
        assert_eq!(sg.report().total, 0);
    }

    #[test]
    fn test_gate_action_combines_ledger_and_prerequisites() {
        let sg = safeguards(&["Cargo.toml"]);

        let gate = sg.gate_action("Build new config manager from scratch", &["Cargo.toml"]);
        assert_eq!(gate.warning.unwrap().lesson_key, "EXEC_BEFORE_BUILD");
        assert!(gate.prerequisites.verified);

        let gate = sg.gate_action("Rename a local variable", &["Cargo.toml", "missing.rs"]);
        assert!(gate.warning.is_none());
        assert!(!gate.prerequisites.verified);
        assert!(!gate.is_clear());

        let gate = sg.gate_action("Rename a local variable", &["Cargo.toml"]);
        assert!(gate.is_clear());
    }

    #[test]
    fn test_gate_action_counts_fires() {
        let sg = safeguards(&[]);
        sg.gate_action("Build new config manager from scratch", &[] as &[&str]);
        sg.check_action("Build new parser from scratch");

        let fires = sg.with_ledger(|l| l.get("EXEC_BEFORE_BUILD").unwrap().fire_count);
        assert_eq!(fires, 2);
    }

    #[test]
    fn test_status_uninitialized_before_observe() {
        let sg = safeguards(&[]);
        assert!(matches!(
            sg.status(),
            Err(EngineError::Monitor(vigil_monitor::MonitorError::Uninitialized))
        ));
        assert!(!sg.should_reconcile());
    }

    #[test]
    fn test_advise_only_when_in_flow() {
        let sg = safeguards(&[]);

        sg.observe(0.97, 1).unwrap();
        assert!(sg.advise_if_strained().unwrap().is_none());

        // coherence 0.1 means strain 0.9
        let outcome = sg.observe(0.1, 2).unwrap();
        assert_eq!(outcome.phase_change.unwrap().to, Phase::Flow);
        assert!(sg.should_reconcile());

        let advice = sg.advise_if_strained().unwrap().unwrap();
        assert_eq!(advice.consensus.dissenters.len(), 2);
        assert!(advice.unavailable.is_empty());
    }

    #[test]
    fn test_invalid_sample_is_error() {
        let sg = safeguards(&[]);
        assert!(matches!(
            sg.observe(f64::NAN, 0),
            Err(EngineError::Monitor(_))
        ));
        assert_eq!(sg.monitor_metrics().samples_rejected, 1);
    }

    #[test]
    fn test_configured_session_id_is_used() {
        let config = EngineConfig {
            session_id: Some("01890a5d-ac96-774b-bcce-b302099a8057".to_string()),
            ..EngineConfig::default()
        };
        let sg = Safeguards::new(&config, Known(HashSet::new()), Vec::new()).unwrap();
        assert_eq!(
            sg.session_id().to_string(),
            "01890a5d-ac96-774b-bcce-b302099a8057"
        );
    }

    #[test]
    fn test_poisoned_ledger_still_usable() {
        let sg = safeguards(&[]);
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            sg.with_ledger(|_| panic!("caller bug"));
        }));

        assert!(sg.check_action("Build new thing from scratch").is_some());
    }
}
