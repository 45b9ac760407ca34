//! Integration tests for the engine facade over the filesystem

use std::fs;
use std::sync::Arc;
use std::thread;
use vigil_domain::Phase;
use vigil_engine::{ConfigError, EngineConfig, EngineError, FsArtifactResolver, Safeguards};
use vigil_verifier::Qualifier;

const TEAM_LESSONS: &str = r#"
version = "team-1"

[[lessons]]
key = "NO_FRIDAY_DEPLOY"
pattern = "Deploy early in the week"
remedy = "Wait until Monday"
severity = "high"
category = "operations"
trigger = { kind = "contains_all", keywords = ["deploy", "friday"] }
"#;

#[test]
fn test_config_file_with_relative_catalog() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("lessons.toml"), TEAM_LESSONS).unwrap();
    fs::write(
        dir.path().join("vigil.toml"),
        "lessons_path = \"lessons.toml\"\n\n[monitor]\nsignal_kind = \"strain\"\n",
    )
    .unwrap();

    let config = EngineConfig::from_file(dir.path().join("vigil.toml")).unwrap();
    assert_eq!(config.lessons_path, Some(dir.path().join("lessons.toml")));

    let safeguards = Safeguards::new(&config, FsArtifactResolver::new(dir.path()), Vec::new()).unwrap();
    assert_eq!(safeguards.with_ledger(|l| l.version().to_string()), "team-1");

    let warning = safeguards.check_action("Deploy the billing service on Friday").unwrap();
    assert_eq!(warning.lesson_key, "NO_FRIDAY_DEPLOY");

    let outcome = safeguards.observe(0.85, 1).unwrap();
    assert!(outcome.phase_change.is_none());
    assert!(safeguards.should_reconcile());
    assert_eq!(safeguards.status().unwrap().current_phase, Phase::Flow);
}

#[test]
fn test_missing_catalog_file_fails_construction() {
    let config = EngineConfig {
        lessons_path: Some("/nonexistent/lessons.toml".into()),
        ..EngineConfig::default()
    };
    let err = Safeguards::new(&config, FsArtifactResolver::new("."), Vec::new()).unwrap_err();
    assert!(matches!(err, EngineError::Ledger(_)));
}

#[test]
fn test_missing_config_file() {
    let err = EngineConfig::from_file("/nonexistent/vigil.toml").unwrap_err();
    assert!(matches!(err, ConfigError::FileRead(_)));
}

#[test]
fn test_claim_against_workspace_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "evidence").unwrap();

    let safeguards = Safeguards::new(
        &EngineConfig::default(),
        FsArtifactResolver::new(dir.path()),
        Vec::new(),
    )
    .unwrap();

    let result = safeguards.verify_claim("completion", &["a.txt", "b.txt"]).unwrap();
    assert_eq!(result.confidence, 0.5);
    assert_eq!(result.qualifier, Qualifier::Probable);
    assert!(!result.verified);
    assert_eq!(result.missing, vec!["b.txt"]);

    fs::write(dir.path().join("b.txt"), "more evidence").unwrap();
    let result = safeguards.verify_claim("completion", &["a.txt", "b.txt"]).unwrap();
    assert!(result.verified);

    let report = safeguards.report();
    assert_eq!(report.total, 2);
    assert_eq!(report.verified, 1);
    assert!((report.average_confidence() - 0.75).abs() < 1e-12);
}

#[test]
fn test_concurrent_callers_lose_no_updates() {
    let safeguards = Arc::new(
        Safeguards::new(
            &EngineConfig::default(),
            FsArtifactResolver::new("."),
            Vec::new(),
        )
        .unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let safeguards = Arc::clone(&safeguards);
            thread::spawn(move || {
                for i in 0..25 {
                    safeguards.check_action("Build new cache layer from scratch");
                    safeguards
                        .observe(0.97, (worker * 100 + i) as u64)
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let fires = safeguards.with_ledger(|l| l.get("EXEC_BEFORE_BUILD").unwrap().fire_count);
    assert_eq!(fires, 100);
    assert_eq!(safeguards.monitor_metrics().samples_recorded, 100);
    assert_eq!(safeguards.health_report().samples, 100);
}
