//! Vigil Pattern Ledger
//!
//! Catalogue of known failure patterns ("lessons") and the matcher that
//! checks proposed actions against them.
//!
//! # Overview
//!
//! - **Lessons** are seeded once at construction from a versioned
//!   [`LessonCatalog`] (the built-in core catalog or a TOML file) and are never
//!   deleted. The only mutation is the per-lesson fire counter.
//! - **Triggers** are explicit tagged predicates ([`Trigger`]) over the action
//!   description, so each one can be inspected and tested on its own.
//! - **Matching** is first-match-wins in catalog order.
//!
//! # Usage
//!
//! ```
//! use vigil_ledger::{LessonQuery, PatternLedger};
//! use vigil_domain::Severity;
//!
//! let mut ledger = PatternLedger::with_core_lessons();
//!
//! let warning = ledger.check("Build new config manager from scratch").unwrap();
//! assert_eq!(warning.lesson_key, "EXEC_BEFORE_BUILD");
//!
//! let critical = ledger.search(&LessonQuery::new().min_severity(Severity::Critical));
//! assert_eq!(critical.len(), 4);
//! ```
//!
//! # Catalog files
//!
//! ```toml
//! version = "2026.10"
//!
//! [[lessons]]
//! key = "NO_FORCE_PUSH"
//! pattern = "Never rewrite shared history"
//! anti_pattern = "Force-pushing over teammates' commits"
//! remedy = "Open a revert instead"
//! severity = "high"
//! category = "vcs"
//!
//! [lessons.trigger]
//! kind = "contains"
//! keyword = "force push"
//! ```

#![warn(missing_docs)]

mod catalog;
mod error;
mod ledger;
mod lesson;
mod trigger;

pub use catalog::LessonCatalog;
pub use error::LedgerError;
pub use ledger::{LedgerStats, LessonQuery, PatternLedger};
pub use lesson::{Lesson, Warning};
pub use trigger::Trigger;
