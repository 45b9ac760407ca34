//! Lessons command implementation.

use super::safeguards;
use crate::cli::{LessonsArgs, LessonsCommand, SearchArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use vigil_ledger::LessonQuery;

/// Execute the lessons command.
pub fn execute_lessons(args: LessonsArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let safeguards = safeguards(&config.engine, ".")?;

    let output = match args.action {
        LessonsCommand::List => {
            let lessons = safeguards.with_ledger(|l| l.search(&LessonQuery::new()));
            formatter.lessons(&lessons)?
        }
        LessonsCommand::Show { key } => {
            let lesson = safeguards.with_ledger(|l| l.get(&key))?;
            formatter.lesson_detail(&lesson)?
        }
        LessonsCommand::Search(search) => {
            let query = build_query(search);
            let lessons = safeguards.with_ledger(|l| l.search(&query));
            formatter.lessons(&lessons)?
        }
        LessonsCommand::Check { action } => {
            let action = action.join(" ");
            let warning = safeguards.check_action(&action);
            formatter.check(&action, warning.as_ref())?
        }
        LessonsCommand::Stats => {
            let stats = safeguards.with_ledger(|l| l.stats());
            formatter.stats(&stats)?
        }
    };

    println!("{}", output);
    Ok(())
}

fn build_query(args: SearchArgs) -> LessonQuery {
    let mut query = LessonQuery::new();
    if let Some(severity) = args.severity {
        query = query.min_severity(severity);
    }
    if let Some(category) = args.category {
        query = query.category(category);
    }
    if let Some(text) = args.text {
        query = query.text(text);
    }
    query
}
