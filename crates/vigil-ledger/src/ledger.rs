//! Pattern ledger: matching, lookup and search over the lesson catalog

use crate::{LedgerError, Lesson, LessonCatalog, Warning};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use vigil_domain::Severity;

/// Filters for [`PatternLedger::search`]
///
/// All filters are optional and combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonQuery {
    /// Keep lessons at or above this severity
    pub min_severity: Option<Severity>,

    /// Keep lessons in this category (case-insensitive)
    pub category: Option<String>,

    /// Keep lessons whose pattern, anti-pattern or remedy mention this text
    pub text: Option<String>,
}

impl LessonQuery {
    /// Create an empty query (matches every lesson)
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by minimum severity
    pub fn min_severity(mut self, severity: Severity) -> Self {
        self.min_severity = Some(severity);
        self
    }

    /// Filter by category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filter by free text
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    fn accepts(&self, lesson: &Lesson) -> bool {
        if let Some(min) = self.min_severity {
            if lesson.severity < min {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if !lesson.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(text) = &self.text {
            if !lesson.mentions(text) {
                return false;
            }
        }
        true
    }
}

/// Aggregate figures over the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerStats {
    /// Catalog version
    pub version: String,

    /// Lessons in the catalog
    pub total_lessons: usize,

    /// Lessons per severity
    pub by_severity: BTreeMap<Severity, usize>,

    /// Matches across all lessons this session
    pub total_fires: u64,

    /// Distinct categories, sorted
    pub categories: Vec<String>,
}

impl LedgerStats {
    /// Generate a summary report
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Lesson Catalog {}", self.version),
            "======================".to_string(),
            format!("Lessons: {}", self.total_lessons),
            format!("Matches this session: {}", self.total_fires),
        ];

        for severity in Severity::DESCENDING {
            if let Some(count) = self.by_severity.get(&severity) {
                lines.push(format!("  {}: {}", severity, count));
            }
        }

        if !self.categories.is_empty() {
            lines.push(format!("Categories: {}", self.categories.join(", ")));
        }

        lines.join("\n")
    }
}

/// Catalogue of lessons with first-match-wins checking
///
/// The only mutable state is each lesson's fire counter. Wrap the ledger in a
/// mutex when several callers share it.
#[derive(Debug, Clone)]
pub struct PatternLedger {
    version: String,
    lessons: Vec<Lesson>,
    index: HashMap<String, usize>,
}

impl PatternLedger {
    /// Create a ledger seeded from `catalog`
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidInput`] when the catalog has empty or
    /// duplicate keys or malformed triggers.
    pub fn new(catalog: LessonCatalog) -> Result<Self, LedgerError> {
        catalog.validate()?;
        Ok(Self::seeded(catalog))
    }

    /// Create a ledger seeded with the built-in core lessons
    pub fn with_core_lessons() -> Self {
        Self::seeded(LessonCatalog::core())
    }

    fn seeded(catalog: LessonCatalog) -> Self {
        let lessons: Vec<Lesson> = catalog
            .lessons
            .into_iter()
            .map(|mut lesson| {
                lesson.fire_count = 0;
                lesson
            })
            .collect();
        let index = lessons
            .iter()
            .enumerate()
            .map(|(i, lesson)| (lesson.key.clone(), i))
            .collect();

        tracing::debug!(version = %catalog.version, lessons = lessons.len(), "Lesson catalog seeded");

        Self {
            version: catalog.version,
            lessons,
            index,
        }
    }

    /// Catalog version this ledger was seeded from
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Number of lessons
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    /// Lessons in catalog order
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    /// Check a proposed action against every lesson in catalog order
    ///
    /// Returns a warning for the first lesson whose trigger matches and
    /// increments that lesson's fire counter. No other counter changes.
    pub fn check(&mut self, action: &str) -> Option<Warning> {
        let lesson = self
            .lessons
            .iter_mut()
            .find(|lesson| lesson.trigger.matches(action))?;

        lesson.fire_count += 1;

        tracing::debug!(
            lesson = %lesson.key,
            severity = %lesson.severity,
            fire_count = lesson.fire_count,
            "Action matched known failure pattern"
        );

        Some(lesson.warning())
    }

    /// Look up a lesson by key
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] for an unknown key.
    pub fn get(&self, key: &str) -> Result<Lesson, LedgerError> {
        self.index
            .get(key)
            .map(|&i| self.lessons[i].clone())
            .ok_or_else(|| LedgerError::NotFound(key.to_string()))
    }

    /// Filter the catalog without mutating it
    ///
    /// Ordered by severity descending, then fire count descending, then
    /// catalog order.
    pub fn search(&self, query: &LessonQuery) -> Vec<Lesson> {
        let mut results: Vec<Lesson> = self
            .lessons
            .iter()
            .filter(|lesson| query.accepts(lesson))
            .cloned()
            .collect();

        // stable sort keeps catalog order for ties
        results.sort_by(|a, b| {
            b.severity
                .cmp(&a.severity)
                .then_with(|| b.fire_count.cmp(&a.fire_count))
        });

        results
    }

    /// Lessons grouped by severity, catalog order within each group
    ///
    /// Every severity has an entry, empty when no lesson carries it.
    pub fn by_severity(&self) -> BTreeMap<Severity, Vec<Lesson>> {
        let mut groups: BTreeMap<Severity, Vec<Lesson>> =
            Severity::DESCENDING.into_iter().map(|s| (s, Vec::new())).collect();
        for lesson in &self.lessons {
            groups.entry(lesson.severity).or_default().push(lesson.clone());
        }
        groups
    }

    /// The `top_n` lessons that fired most this session
    ///
    /// Ties are broken by historical frequency, then catalog order.
    pub fn most_frequent(&self, top_n: usize) -> Vec<Lesson> {
        let mut ranked: Vec<&Lesson> = self.lessons.iter().collect();
        ranked.sort_by(|a, b| {
            b.fire_count
                .cmp(&a.fire_count)
                .then_with(|| b.frequency.cmp(&a.frequency))
        });
        ranked.into_iter().take(top_n).cloned().collect()
    }

    /// Aggregate figures over the catalog
    pub fn stats(&self) -> LedgerStats {
        let mut by_severity: BTreeMap<Severity, usize> =
            Severity::DESCENDING.into_iter().map(|s| (s, 0)).collect();
        let mut categories = BTreeSet::new();

        for lesson in &self.lessons {
            *by_severity.entry(lesson.severity).or_insert(0) += 1;
            if !lesson.category.is_empty() {
                categories.insert(lesson.category.clone());
            }
        }

        LedgerStats {
            version: self.version.clone(),
            total_lessons: self.lessons.len(),
            by_severity,
            total_fires: self.lessons.iter().map(|l| l.fire_count).sum(),
            categories: categories.into_iter().collect(),
        }
    }
}

impl Default for PatternLedger {
    fn default() -> Self {
        Self::with_core_lessons()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Trigger;

    fn keys(lessons: &[Lesson]) -> Vec<&str> {
        lessons.iter().map(|l| l.key.as_str()).collect()
    }

    #[test]
    fn test_check_returns_first_match() {
        let catalog = LessonCatalog {
            version: "t".to_string(),
            lessons: vec![
                Lesson::new("FIRST", "p1", "r1", Severity::Low, Trigger::contains("deploy")),
                Lesson::new("SECOND", "p2", "r2", Severity::Critical, Trigger::contains("deploy")),
            ],
        };
        let mut ledger = PatternLedger::new(catalog).unwrap();

        let warning = ledger.check("deploy on friday").unwrap();

        assert_eq!(warning.lesson_key, "FIRST");
        assert_eq!(warning.remedy, "r1");
        assert_eq!(ledger.get("FIRST").unwrap().fire_count, 1);
        assert_eq!(ledger.get("SECOND").unwrap().fire_count, 0);
    }

    #[test]
    fn test_check_no_match() {
        let mut ledger = PatternLedger::with_core_lessons();
        assert!(ledger.check("read the failing test output").is_none());
        assert_eq!(ledger.stats().total_fires, 0);
    }

    #[test]
    fn test_check_is_deterministic() {
        let mut ledger = PatternLedger::with_core_lessons();
        let action = "I believe the cache is thread safe";

        let first = ledger.check(action);
        let second = ledger.check(action);

        assert_eq!(first, second);
        assert_eq!(first.unwrap().lesson_key, "EVIDENCE_BASED_CLAIMS");
        assert_eq!(ledger.get("EVIDENCE_BASED_CLAIMS").unwrap().fire_count, 2);
        assert_eq!(ledger.stats().total_fires, 2);
    }

    #[test]
    fn test_exclusion_suppresses_match() {
        let mut ledger = PatternLedger::with_core_lessons();
        assert!(ledger.check("build new adapter after searched existing ones").is_none());
        assert!(ledger.check("Build new adapter").is_some());
    }

    #[test]
    fn test_get_unknown_key() {
        let ledger = PatternLedger::with_core_lessons();
        match ledger.get("NOPE") {
            Err(LedgerError::NotFound(key)) => assert_eq!(key, "NOPE"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_search_by_min_severity() {
        let ledger = PatternLedger::with_core_lessons();

        let critical = ledger.search(&LessonQuery::new().min_severity(Severity::Critical));
        assert_eq!(critical.len(), 4);

        let high_or_above = ledger.search(&LessonQuery::new().min_severity(Severity::High));
        assert_eq!(high_or_above.len(), 7);
        assert!(high_or_above[..4].iter().all(|l| l.severity == Severity::Critical));
    }

    #[test]
    fn test_search_by_category_and_text() {
        let ledger = PatternLedger::with_core_lessons();

        let verification = ledger.search(&LessonQuery::new().category("Verification"));
        assert_eq!(keys(&verification), vec!["TEST_BEFORE_CLAIM", "VERIFY_COMPLETION"]);

        let grep = ledger.search(&LessonQuery::new().text("GREP"));
        assert!(grep.iter().any(|l| l.key == "EXEC_BEFORE_BUILD"));
        assert!(grep.iter().all(|l| l.mentions("grep")));
    }

    #[test]
    fn test_search_orders_by_fire_count_within_severity() {
        let mut ledger = PatternLedger::with_core_lessons();
        ledger.check("I assume the schema is stable");
        ledger.check("I assume the schema is stable");
        ledger.check("It works now");

        let critical = ledger.search(&LessonQuery::new().min_severity(Severity::Critical));

        assert_eq!(
            keys(&critical),
            vec![
                "EVIDENCE_BASED_CLAIMS",
                "TEST_BEFORE_CLAIM",
                "EXEC_BEFORE_BUILD",
                "SEARCH_BEFORE_THEORIZE",
            ]
        );
    }

    #[test]
    fn test_search_is_idempotent_and_read_only() {
        let mut ledger = PatternLedger::with_core_lessons();
        ledger.check("relocate the storage module");

        let query = LessonQuery::new().min_severity(Severity::Medium);
        let before = ledger.stats();
        let first = ledger.search(&query);
        let second = ledger.search(&query);

        assert_eq!(first, second);
        assert_eq!(ledger.stats(), before);
    }

    #[test]
    fn test_most_frequent() {
        let mut ledger = PatternLedger::with_core_lessons();
        ledger.check("overhaul the scheduler");

        let top = ledger.most_frequent(2);
        assert_eq!(keys(&top), vec!["LESSON_CONSULTATION", "EVIDENCE_BASED_CLAIMS"]);
    }

    #[test]
    fn test_by_severity_and_stats() {
        let ledger = PatternLedger::with_core_lessons();

        let groups = ledger.by_severity();
        assert_eq!(groups[&Severity::Critical].len(), 4);
        assert_eq!(groups.len(), 4);
        assert!(groups[&Severity::Low].is_empty());

        let stats = ledger.stats();
        assert_eq!(stats.total_lessons, 10);
        assert_eq!(stats.by_severity[&Severity::High], 3);
        assert_eq!(stats.by_severity[&Severity::Low], 0);
        assert!(stats.categories.contains(&"architecture".to_string()));
        assert!(stats.summary().contains("Lessons: 10"));
    }
}
