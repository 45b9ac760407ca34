//! Trigger predicates over action descriptions
//!
//! Matching is case-insensitive substring matching on the action text.

use serde::{Deserialize, Serialize};

/// Predicate deciding whether a lesson applies to an action
///
/// Serialized with a `kind` tag so catalogs can spell triggers out in TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trigger {
    /// Action mentions `keyword`
    Contains {
        /// Phrase to look for
        keyword: String,
    },

    /// Action mentions at least one of `keywords`
    ContainsAny {
        /// Phrases to look for
        keywords: Vec<String>,
    },

    /// Action mentions every one of `keywords`
    ContainsAll {
        /// Phrases that must all appear
        keywords: Vec<String>,
    },

    /// Inner trigger does not match
    Not {
        /// Negated trigger
        trigger: Box<Trigger>,
    },

    /// Every inner trigger matches
    All {
        /// Conjuncts
        triggers: Vec<Trigger>,
    },

    /// At least one inner trigger matches
    Any {
        /// Disjuncts
        triggers: Vec<Trigger>,
    },

    /// Never matches (lesson is searchable but not checked)
    Never,
}

impl Trigger {
    /// Match when the action mentions `keyword`
    pub fn contains(keyword: &str) -> Self {
        Trigger::Contains {
            keyword: keyword.to_string(),
        }
    }

    /// Match when the action mentions any of `keywords`
    pub fn contains_any(keywords: &[&str]) -> Self {
        Trigger::ContainsAny {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Match when the action mentions all of `keywords`
    pub fn contains_all(keywords: &[&str]) -> Self {
        Trigger::ContainsAll {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Match when `self` matches and the action mentions none of `excluded`
    ///
    /// ```
    /// use vigil_ledger::Trigger;
    ///
    /// let trigger = Trigger::contains("build new").unless_any(&["existing"]);
    /// assert!(trigger.matches("Build new parser"));
    /// assert!(!trigger.matches("build new parser on the existing lexer"));
    /// ```
    pub fn unless_any(self, excluded: &[&str]) -> Self {
        Trigger::All {
            triggers: vec![
                self,
                Trigger::Not {
                    trigger: Box::new(Trigger::contains_any(excluded)),
                },
            ],
        }
    }

    /// Evaluate against an action description
    pub fn matches(&self, action: &str) -> bool {
        self.matches_lowercase(&action.to_lowercase())
    }

    fn matches_lowercase(&self, action: &str) -> bool {
        let mentions = |keyword: &String| action.contains(&keyword.to_lowercase());

        match self {
            Trigger::Contains { keyword } => mentions(keyword),
            Trigger::ContainsAny { keywords } => keywords.iter().any(mentions),
            Trigger::ContainsAll { keywords } => keywords.iter().all(mentions),
            Trigger::Not { trigger } => !trigger.matches_lowercase(action),
            Trigger::All { triggers } => triggers.iter().all(|t| t.matches_lowercase(action)),
            Trigger::Any { triggers } => triggers.iter().any(|t| t.matches_lowercase(action)),
            Trigger::Never => false,
        }
    }

    /// Reject triggers that would match vacuously or never be satisfiable
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Trigger::Contains { keyword } => check_keyword(keyword),
            Trigger::ContainsAny { keywords } | Trigger::ContainsAll { keywords } => {
                if keywords.is_empty() {
                    return Err("keyword list is empty".to_string());
                }
                keywords.iter().try_for_each(|k| check_keyword(k))
            }
            Trigger::Not { trigger } => trigger.validate(),
            Trigger::All { triggers } | Trigger::Any { triggers } => {
                if triggers.is_empty() {
                    return Err("trigger list is empty".to_string());
                }
                triggers.iter().try_for_each(Trigger::validate)
            }
            Trigger::Never => Ok(()),
        }
    }
}

fn check_keyword(keyword: &str) -> Result<(), String> {
    if keyword.trim().is_empty() {
        Err("keyword is blank".to_string())
    } else {
        Ok(())
    }
}
