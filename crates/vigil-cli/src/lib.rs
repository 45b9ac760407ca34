//! Vigil CLI library.
//!
//! Command-line access to the safeguard engine: inspect and check lessons,
//! verify claims against files on disk, replay signal samples through the
//! monitor, and print the effective configuration.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::{Config, OutputFormat};
pub use error::{CliError, Result};
pub use output::Formatter;
