//! Configuration management for the CLI.
//!
//! One TOML file carries both the engine sections (`[verifier]`,
//! `[monitor]`, `[advisor]`, `lessons_path`, `session_id`) and an `[output]`
//! table for the CLI itself.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use vigil_engine::EngineConfig;

/// Effective CLI configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// File the configuration was read from, if any
    pub source: Option<PathBuf>,

    /// Output settings
    pub output: Settings,

    /// Engine settings
    pub engine: EngineConfig,
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

/// The `[output]` table, read separately from the engine sections.
#[derive(Debug, Default, Deserialize)]
struct OutputSection {
    #[serde(default)]
    output: Settings,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".vigil").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default path is read
    /// when present and defaults are used otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let path = Self::default_path()?;
        if path.exists() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let engine = EngineConfig::from_file(path)?;
        let contents = fs::read_to_string(path)?;
        let section: OutputSection = toml::from_str(&contents)?;

        Ok(Self {
            source: Some(path.to_path_buf()),
            output: section.output,
            engine,
        })
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        let output = toml::to_string_pretty(&OutputTable {
            output: &self.output,
        })
        .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        let engine = self.engine.to_toml_string()?;
        Ok(format!("{}\n{}", engine.trim_end(), output))
    }
}

#[derive(Serialize)]
struct OutputTable<'a> {
    output: &'a Settings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let config = Config::default();
        assert!(config.output.color);
        assert_eq!(config.output.format, OutputFormat::Table);
        assert!(config.source.is_none());
    }

    #[test]
    fn test_load_file_with_output_and_engine_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
            [output]
            format = "json"
            color = false

            [monitor]
            coherence_floor = 0.9
            "#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.output.color);
        assert_eq!(config.engine.monitor.coherence_floor, 0.9);
        assert_eq!(config.source, Some(path));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let err = Config::load(Some(Path::new("/nonexistent/vigil.toml"))).unwrap_err();
        assert!(matches!(err, CliError::EngineConfig(_)));
    }

    #[test]
    fn test_rendered_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.output.format = OutputFormat::Json;
        fs::write(&path, config.to_toml_string().unwrap()).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.output, config.output);
        assert_eq!(loaded.engine, config.engine);
    }
}
