//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vigil_domain::{ClaimKind, Severity, SignalKind};

/// Vigil - operational safeguards for long-running agent sessions.
#[derive(Debug, Parser)]
#[command(name = "vigil")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ~/.vigil/config.toml)
    #[arg(short, long, global = true, env = "VIGIL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect the lesson catalog and check actions against it
    Lessons(LessonsArgs),

    /// Verify a claim against evidence files
    Verify(VerifyArgs),

    /// Replay signal samples through the monitor
    Monitor(MonitorArgs),

    /// Print the effective configuration as TOML
    Config,
}

/// Arguments for the lessons command.
#[derive(Debug, Parser)]
pub struct LessonsArgs {
    #[command(subcommand)]
    pub action: LessonsCommand,
}

/// Lesson subcommands.
#[derive(Debug, Subcommand)]
pub enum LessonsCommand {
    /// List every lesson, most severe first
    List,

    /// Show one lesson in full
    Show {
        /// Lesson key (e.g. EXEC_BEFORE_BUILD)
        key: String,
    },

    /// Search lessons
    Search(SearchArgs),

    /// Check a proposed action against the catalog
    Check {
        /// Action description
        #[arg(required = true, num_args = 1..)]
        action: Vec<String>,
    },

    /// Catalog statistics
    Stats,
}

/// Arguments for lesson search.
#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Minimum severity
    #[arg(short, long, value_parser = parse_severity)]
    pub severity: Option<Severity>,

    /// Category (exact, case-insensitive)
    #[arg(long)]
    pub category: Option<String>,

    /// Free text matched against pattern, anti-pattern and remedy
    #[arg(short, long)]
    pub text: Option<String>,
}

/// Arguments for the verify command.
#[derive(Debug, Parser)]
pub struct VerifyArgs {
    /// Claim kind: completion, capability, technical or performance
    #[arg(value_parser = parse_claim_kind)]
    pub kind: ClaimKind,

    /// Evidence files
    pub paths: Vec<String>,

    /// Directory evidence paths are resolved against
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,
}

/// Arguments for the monitor command.
#[derive(Debug, Parser)]
pub struct MonitorArgs {
    /// What the samples measure (overrides the config file)
    #[arg(short, long, value_parser = parse_signal_kind)]
    pub kind: Option<SignalKind>,

    /// File of `value [timestamp]` lines (default: stdin)
    pub file: Option<PathBuf>,
}

fn parse_severity(s: &str) -> Result<Severity, String> {
    s.parse()
}

fn parse_claim_kind(s: &str) -> Result<ClaimKind, String> {
    s.parse()
}

fn parse_signal_kind(s: &str) -> Result<SignalKind, String> {
    s.parse()
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}
