//! Lesson records and the warnings they raise

use crate::Trigger;
use serde::{Deserialize, Serialize};
use vigil_domain::Severity;

/// A catalogued failure pattern
///
/// Lessons are immutable once seeded except for `fire_count`, which only the
/// owning ledger increments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    /// Unique key (e.g. `EXEC_BEFORE_BUILD`)
    pub key: String,

    /// What to do
    pub pattern: String,

    /// What goes wrong when the pattern is ignored
    #[serde(default)]
    pub anti_pattern: String,

    /// Concrete steps to take instead
    pub remedy: String,

    /// Where this lesson came from
    #[serde(default)]
    pub evidence: String,

    /// Cost of repeating the mistake
    pub severity: Severity,

    /// Free-form grouping (e.g. "verification", "architecture")
    #[serde(default)]
    pub category: String,

    /// Times the pattern was violated before it was catalogued
    #[serde(default)]
    pub frequency: u64,

    /// When the lesson applies to an action
    #[serde(default = "default_trigger")]
    pub trigger: Trigger,

    /// Times `check` matched this lesson in the current session
    #[serde(default, skip_deserializing)]
    pub fire_count: u64,
}

fn default_trigger() -> Trigger {
    Trigger::Never
}

impl Lesson {
    /// Create a lesson with an empty evidence note, category and frequency
    pub fn new(
        key: impl Into<String>,
        pattern: impl Into<String>,
        remedy: impl Into<String>,
        severity: Severity,
        trigger: Trigger,
    ) -> Self {
        Self {
            key: key.into(),
            pattern: pattern.into(),
            anti_pattern: String::new(),
            remedy: remedy.into(),
            evidence: String::new(),
            severity,
            category: String::new(),
            frequency: 0,
            trigger,
            fire_count: 0,
        }
    }

    /// Whether any of pattern, anti-pattern or remedy mentions `text`
    pub(crate) fn mentions(&self, text: &str) -> bool {
        let needle = text.to_lowercase();
        [&self.pattern, &self.anti_pattern, &self.remedy]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Build the warning raised when this lesson matches
    pub(crate) fn warning(&self) -> Warning {
        let message = if self.anti_pattern.is_empty() {
            format!("{}: {}", self.key, self.pattern)
        } else {
            format!("{}: {} ({})", self.key, self.anti_pattern, self.pattern)
        };

        Warning {
            lesson_key: self.key.clone(),
            severity: self.severity,
            message,
            remedy: self.remedy.clone(),
        }
    }
}

/// Raised when a proposed action matches a catalogued lesson
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    /// Key of the matching lesson
    pub lesson_key: String,

    /// Severity of the matching lesson
    pub severity: Severity,

    /// Human-readable description of the match
    pub message: String,

    /// Suggested remedy
    pub remedy: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mentions_searches_text_fields() {
        let mut lesson = Lesson::new(
            "K",
            "Search before building",
            "grep the workspace",
            Severity::High,
            Trigger::Never,
        );
        lesson.anti_pattern = "Duplicate implementations".to_string();

        assert!(lesson.mentions("SEARCH"));
        assert!(lesson.mentions("duplicate"));
        assert!(lesson.mentions("grep"));
        assert!(!lesson.mentions("benchmark"));
    }

    #[test]
    fn test_warning_message() {
        let lesson = Lesson::new("K", "Do the thing", "Steps", Severity::Low, Trigger::Never);
        let warning = lesson.warning();
        assert_eq!(warning.lesson_key, "K");
        assert_eq!(warning.message, "K: Do the thing");
        assert_eq!(warning.remedy, "Steps");
    }
}
