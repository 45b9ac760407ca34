//! Engine configuration file parsing
//!
//! Loads one TOML document with a table per component plus the optional
//! lesson catalog path and session id.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use vigil_advisor::AdvisorConfig;
use vigil_domain::SessionId;
use vigil_monitor::MonitorConfig;
use vigil_verifier::VerifierConfig;

/// Engine configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to render TOML
    #[error("Failed to serialize config TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A value is out of range or malformed
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Engine configuration loaded from TOML
///
/// Every field has a default, so an empty file is a valid configuration.
///
/// ```toml
/// lessons_path = "lessons.toml"
///
/// [verifier]
/// completion_min_evidence = 2
///
/// [monitor]
/// coherence_floor = 0.9
///
/// [advisor]
/// tolerance = 0.25
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Lesson catalog to load instead of the core lessons
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lessons_path: Option<PathBuf>,

    /// Fixed session id (UUID string); a fresh one is generated when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Evidence verifier settings
    pub verifier: VerifierConfig,

    /// Signal monitor settings
    pub monitor: MonitorConfig,

    /// Consensus advisor settings
    pub advisor: AdvisorConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file
    ///
    /// A relative `lessons_path` is resolved against the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&contents)?;

        if let (Some(lessons), Some(dir)) = (config.lessons_path.as_mut(), path.parent()) {
            if lessons.is_relative() {
                *lessons = dir.join(&*lessons);
            }
        }

        Ok(config)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every component section and the session id
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.monitor
            .validate()
            .map_err(|e| ConfigError::InvalidValue(format!("[monitor] {}", e)))?;
        self.advisor
            .validate()
            .map_err(|e| ConfigError::InvalidValue(format!("[advisor] {}", e)))?;
        if let Some(id) = &self.session_id {
            SessionId::from_string(id).map_err(ConfigError::InvalidValue)?;
        }
        Ok(())
    }

    /// Resolve the session id once: the configured one, or a fresh UUIDv7
    pub fn resolve_session_id(&self) -> Result<SessionId, ConfigError> {
        match &self.session_id {
            Some(id) => SessionId::from_string(id).map_err(ConfigError::InvalidValue),
            None => Ok(SessionId::new()),
        }
    }
}
