//! Config command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the config command.
pub fn execute_config(config: &Config, formatter: &Formatter) -> Result<()> {
    match &config.source {
        Some(path) => eprintln!("{}", formatter.info(&format!("Loaded from {}", path.display()))),
        None => eprintln!("{}", formatter.info("No config file found, showing defaults")),
    }
    print!("{}", config.to_toml_string()?);
    Ok(())
}
