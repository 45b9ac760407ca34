//! Lesson catalog seed
//!
//! A catalog is configuration data: a version string plus an ordered list of
//! lessons. Order matters, it is the tie-break for `check`.

use crate::{LedgerError, Lesson, Trigger};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use vigil_domain::Severity;

/// Version of the built-in core catalog
pub const CORE_CATALOG_VERSION: &str = "core-1";

/// Versioned, ordered list of lessons loaded once at ledger construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonCatalog {
    /// Catalog version label
    pub version: String,

    /// Lessons in registration order
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

impl LessonCatalog {
    /// Load a catalog from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LedgerError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate a catalog from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, LedgerError> {
        let catalog: LessonCatalog = toml::from_str(contents)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check keys are present and unique and every trigger is well formed
    pub fn validate(&self) -> Result<(), LedgerError> {
        let mut seen = HashSet::new();

        for lesson in &self.lessons {
            if lesson.key.trim().is_empty() {
                return Err(LedgerError::InvalidInput("lesson key is empty".to_string()));
            }
            if !seen.insert(lesson.key.as_str()) {
                return Err(LedgerError::InvalidInput(format!(
                    "duplicate lesson key {}",
                    lesson.key
                )));
            }
            lesson.trigger.validate().map_err(|e| {
                LedgerError::InvalidInput(format!("lesson {} has invalid trigger: {}", lesson.key, e))
            })?;
        }

        Ok(())
    }

    /// The built-in catalog of core operational lessons
    pub fn core() -> Self {
        Self {
            version: CORE_CATALOG_VERSION.to_string(),
            lessons: core_lessons(),
        }
    }
}

impl Default for LessonCatalog {
    fn default() -> Self {
        Self::core()
    }
}

fn core_lessons() -> Vec<Lesson> {
    vec![
        Lesson {
            key: "EXEC_BEFORE_BUILD".to_string(),
            pattern: "Execute existing code before building new".to_string(),
            anti_pattern: "Building duplicate implementations without searching for existing code"
                .to_string(),
            remedy: "1. Search the codebase with grep/glob\n2. Run existing implementations\n3. Only build if truly missing".to_string(),
            evidence: "Prevented 89 duplicate implementations in production".to_string(),
            severity: Severity::Critical,
            category: "architecture".to_string(),
            frequency: 89,
            trigger: Trigger::contains_any(&[
                "build new",
                "create new",
                "implement new",
                "write new",
                "from scratch",
                "reimplement",
            ])
            .unless_any(&["existing", "searched"]),
            fire_count: 0,
        },
        Lesson {
            key: "TEST_BEFORE_CLAIM".to_string(),
            pattern: "Test functionality before claiming it works".to_string(),
            anti_pattern: "Asserting capabilities exist without execution verification".to_string(),
            remedy: "1. Write a test that calls the function\n2. Run it and check the output\n3. Only then claim it works".to_string(),
            evidence: "Prevented 127 unverified claims in production".to_string(),
            severity: Severity::Critical,
            category: "verification".to_string(),
            frequency: 127,
            trigger: Trigger::contains_any(&[
                "it works",
                "works now",
                "is working",
                "should work",
                "fully functional",
            ])
            .unless_any(&["test", "ran "]),
            fire_count: 0,
        },
        Lesson {
            key: "SEARCH_BEFORE_THEORIZE".to_string(),
            pattern: "Search for implementations before theorizing about gaps".to_string(),
            anti_pattern: "Assuming functionality is missing without searching for it".to_string(),
            remedy: "1. Search comprehensively (grep -r pattern .)\n2. Try several naming patterns\n3. Confirm absence before building".to_string(),
            evidence: "73% of features reported missing already existed".to_string(),
            severity: Severity::Critical,
            category: "archaeology".to_string(),
            frequency: 156,
            trigger: Trigger::contains_any(&[
                "is missing",
                "does not exist",
                "doesn't exist",
                "not implemented",
                "no implementation",
            ])
            .unless_any(&["searched", "grep"]),
            fire_count: 0,
        },
        Lesson {
            key: "DEPENDENCY_BEFORE_MOVE".to_string(),
            pattern: "Analyze dependencies before moving directories".to_string(),
            anti_pattern: "Moving code directories without checking import dependencies".to_string(),
            remedy: "1. grep for imports of the directory\n2. Identify directories that cannot move\n3. Only move truly isolated code".to_string(),
            evidence: "Prevented 12 cascading import failures during consolidation".to_string(),
            severity: Severity::High,
            category: "refactoring".to_string(),
            frequency: 12,
            trigger: Trigger::Any {
                triggers: vec![
                    Trigger::contains_all(&["move", "directory"]),
                    Trigger::contains_all(&["move", "module"]),
                    Trigger::contains("relocate"),
                ],
            }
            .unless_any(&["import", "dependenc"]),
            fire_count: 0,
        },
        Lesson {
            key: "VERIFY_COMPLETION".to_string(),
            pattern: "Verify task completion with artifacts, not just claims".to_string(),
            anti_pattern: "Marking tasks complete without verifiable evidence".to_string(),
            remedy: "1. Check files exist in the repository\n2. Confirm tests pass\n3. Confirm integration works".to_string(),
            evidence: "Caught 43 completed tasks that existed only in the session".to_string(),
            severity: Severity::High,
            category: "verification".to_string(),
            frequency: 43,
            trigger: Trigger::contains_any(&[
                "mark complete",
                "mark as complete",
                "mark as done",
                "task complete",
                "task is done",
            ])
            .unless_any(&["artifact", "evidence", "verified"]),
            fire_count: 0,
        },
        Lesson {
            key: "SCOPE_BOUNDARIES".to_string(),
            pattern: "Explicitly state what is NOT verified in claims".to_string(),
            anti_pattern: "Broad claims without acknowledging limitations".to_string(),
            remedy: "1. State what was tested\n2. Mark what was not tested\n3. Separate session work from persistent state".to_string(),
            evidence: "Improved claim accuracy from 67% to 91%".to_string(),
            severity: Severity::Medium,
            category: "communication".to_string(),
            frequency: 78,
            trigger: Trigger::contains_any(&[
                "everything works",
                "all features",
                "production ready",
                "production-ready",
                "works everywhere",
            ])
            .unless_any(&["not tested", "untested", "except"]),
            fire_count: 0,
        },
        Lesson {
            key: "POLYNOMIAL_TIME_AWARENESS".to_string(),
            pattern: "Tasks take messages, not weeks; do the work now".to_string(),
            anti_pattern: "Creating multi-week plans for tasks that take a few responses".to_string(),
            remedy: "1. Estimate in messages\n2. Do the work instead of planning it\n3. If the plan is longer than the work, do the work".to_string(),
            evidence: "Reduced planning overhead by 84%".to_string(),
            severity: Severity::Medium,
            category: "efficiency".to_string(),
            frequency: 34,
            trigger: Trigger::contains_any(&["multi-week", "week plan", "weeks to", "next sprint"]),
            fire_count: 0,
        },
        Lesson {
            key: "LESSON_CONSULTATION".to_string(),
            pattern: "Check the lessons catalog before starting major tasks".to_string(),
            anti_pattern: "Ignoring documented lessons and repeating mistakes".to_string(),
            remedy: "1. Search lessons for relevant patterns\n2. Apply remedies up front\n3. Add new lessons when a pattern repeats".to_string(),
            evidence: "Thousands of recorded lessons went unused until consulted by default".to_string(),
            severity: Severity::High,
            category: "wisdom".to_string(),
            frequency: 4620,
            trigger: Trigger::contains_any(&["major refactor", "large refactor", "start major", "overhaul"])
                .unless_any(&["lesson"]),
            fire_count: 0,
        },
        Lesson {
            key: "EVIDENCE_BASED_CLAIMS".to_string(),
            pattern: "Base technical claims on concrete evidence".to_string(),
            anti_pattern: "Making claims based on assumptions or memory".to_string(),
            remedy: "1. Read the actual code\n2. Run the actual tests\n3. Cite paths and line numbers".to_string(),
            evidence: "Prevented 203 incorrect technical assertions".to_string(),
            severity: Severity::Critical,
            category: "accuracy".to_string(),
            frequency: 203,
            trigger: Trigger::contains_any(&["i assume", "from memory", "i believe", "presumably"])
                .unless_any(&["evidence", "line "]),
            fire_count: 0,
        },
        Lesson {
            key: "GRACEFUL_DEGRADATION".to_string(),
            pattern: "Design for 88-92% success, not 100% perfection".to_string(),
            anti_pattern: "Brittle systems that fail completely on edge cases".to_string(),
            remedy: "1. Target solid rather than perfect quality\n2. Handle errors gracefully\n3. Provide meaningful degradation".to_string(),
            evidence: "Validation targets of 88-92% with graceful handling".to_string(),
            severity: Severity::Medium,
            category: "reliability".to_string(),
            frequency: 56,
            trigger: Trigger::contains_any(&[
                "panic on",
                "abort on",
                "crash on",
                "zero failures",
                "must be perfect",
            ]),
            fire_count: 0,
        },
    ]
}
