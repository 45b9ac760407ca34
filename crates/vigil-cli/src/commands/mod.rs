//! Command implementations.

pub mod config;
pub mod lessons;
pub mod monitor;
pub mod verify;

pub use self::config::execute_config;
pub use self::lessons::execute_lessons;
pub use self::monitor::execute_monitor;
pub use self::verify::execute_verify;

use crate::error::Result;
use std::path::Path;
use vigil_engine::{EngineConfig, FsArtifactResolver, Safeguards};

/// Build the engine for one command, resolving evidence against `root`.
pub(crate) fn safeguards(
    engine: &EngineConfig,
    root: impl AsRef<Path>,
) -> Result<Safeguards<FsArtifactResolver>> {
    Ok(Safeguards::new(
        engine,
        FsArtifactResolver::new(root.as_ref()),
        Vec::new(),
    )?)
}
