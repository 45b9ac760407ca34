//! Output formatting for the CLI.

use crate::commands::monitor::{ReplayEvent, ReplayEventKind, ReplayReport};
use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use vigil_domain::Severity;
use vigil_ledger::{LedgerStats, Lesson, Warning};
use vigil_verifier::{Qualifier, VerificationResult};

/// Widest pattern shown in lesson tables.
const PATTERN_WIDTH: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a list of lessons.
    pub fn lessons(&self, lessons: &[Lesson]) -> Result<String> {
        if self.format == OutputFormat::Json {
            return json(&lessons);
        }
        if lessons.is_empty() {
            return Ok(self.colorize("No lessons found.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["Key", "Severity", "Category", "Fires", "Pattern"]);
        for lesson in lessons {
            builder.push_record([
                lesson.key.clone(),
                self.severity(lesson.severity),
                lesson.category.clone(),
                lesson.fire_count.to_string(),
                truncate(&lesson.pattern, PATTERN_WIDTH),
            ]);
        }
        Ok(table(builder))
    }

    /// Format one lesson in full.
    pub fn lesson_detail(&self, lesson: &Lesson) -> Result<String> {
        if self.format == OutputFormat::Json {
            return json(lesson);
        }

        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        builder.push_record(["Key".to_string(), lesson.key.clone()]);
        builder.push_record(["Severity".to_string(), self.severity(lesson.severity)]);
        builder.push_record(["Category".to_string(), lesson.category.clone()]);
        builder.push_record(["Pattern".to_string(), lesson.pattern.clone()]);
        builder.push_record(["Anti-pattern".to_string(), lesson.anti_pattern.clone()]);
        builder.push_record(["Remedy".to_string(), lesson.remedy.clone()]);
        builder.push_record(["Evidence".to_string(), lesson.evidence.clone()]);
        builder.push_record(["Frequency".to_string(), lesson.frequency.to_string()]);
        Ok(table(builder))
    }

    /// Format the outcome of checking an action.
    pub fn check(&self, action: &str, warning: Option<&Warning>) -> Result<String> {
        if self.format == OutputFormat::Json {
            return json(&serde_json::json!({
                "action": action,
                "warning": warning,
            }));
        }

        match warning {
            None => Ok(self.success("No known failure pattern matches this action")),
            Some(w) => Ok(format!(
                "{}\n\n{}\n{}",
                self.warning(&format!("[{}] {}", w.severity.as_str().to_uppercase(), w.message)),
                self.colorize("Remedy:", "cyan"),
                w.remedy
            )),
        }
    }

    /// Format catalog statistics.
    pub fn stats(&self, stats: &LedgerStats) -> Result<String> {
        if self.format == OutputFormat::Json {
            return json(stats);
        }
        Ok(stats.summary())
    }

    /// Format a verification result.
    pub fn verification(&self, result: &VerificationResult) -> Result<String> {
        if self.format == OutputFormat::Json {
            return json(result);
        }

        let mut builder = Builder::default();
        builder.push_record(["Evidence", "Status"]);
        for id in &result.resolved {
            builder.push_record([id.clone(), self.colorize("found", "green")]);
        }
        for id in &result.missing {
            builder.push_record([id.clone(), self.colorize("missing", "red")]);
        }

        let mut lines = Vec::new();
        if !result.resolved.is_empty() || !result.missing.is_empty() {
            lines.push(table(builder));
        }
        for warning in &result.warnings {
            lines.push(self.warning(warning));
        }

        let verdict = format!(
            "{} (confidence {:.2})",
            result.qualifier, result.confidence
        );
        lines.push(match (result.verified, result.qualifier) {
            (true, _) => self.success(&verdict),
            (false, Qualifier::Probable) => self.warning(&verdict),
            (false, _) => self.error(&verdict),
        });

        Ok(lines.join("\n"))
    }

    /// Format a monitor replay.
    pub fn replay(&self, report: &ReplayReport) -> Result<String> {
        if self.format == OutputFormat::Json {
            return json(report);
        }

        let mut lines = Vec::new();
        if report.events.is_empty() {
            lines.push(self.info("No events in the replay"));
        } else {
            let mut builder = Builder::default();
            builder.push_record(["Line", "Timestamp", "Value", "Event"]);
            for event in &report.events {
                builder.push_record([
                    event.line.to_string(),
                    event.timestamp.to_string(),
                    event.value.clone(),
                    self.event(event),
                ]);
            }
            lines.push(table(builder));
        }

        lines.push(String::new());
        match &report.status {
            Some(status) => lines.push(format!(
                "Phase {}, trend {}, mean of last {} {:.3}, health {}",
                status.current_phase,
                status.trend,
                report.trend_window,
                status.mean_of_last_k,
                status.health
            )),
            None => lines.push(self.warning("No valid samples recorded")),
        }
        lines.push(String::new());
        lines.push(report.metrics_summary.clone());

        Ok(lines.join("\n"))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn severity(&self, severity: Severity) -> String {
        let color = match severity {
            Severity::Critical => "red",
            Severity::High => "magenta",
            Severity::Medium => "yellow",
            Severity::Low => "cyan",
        };
        self.colorize(severity.as_str(), color)
    }

    fn event(&self, event: &ReplayEvent) -> String {
        match &event.kind {
            ReplayEventKind::PhaseChange { from, to } => {
                self.colorize(&format!("phase {} -> {}", from, to), "cyan")
            }
            ReplayEventKind::DriftAlert { consecutive_below } => self.colorize(
                &format!("drift alert ({} below floor)", consecutive_below),
                "yellow",
            ),
            ReplayEventKind::Declining { mean } => self.colorize(
                &format!("coherence declining (recent mean {:.3})", mean),
                "yellow",
            ),
            ReplayEventKind::Rejected { reason } => self.colorize(reason, "red"),
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn table(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let cut: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", cut)
}
