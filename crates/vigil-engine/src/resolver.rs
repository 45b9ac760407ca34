//! Filesystem-backed artifact resolution

use std::io;
use std::path::{Path, PathBuf};
use vigil_domain::ArtifactResolver;

/// Resolves evidence ids as file paths relative to a root directory
///
/// An artifact exists when the path is a regular file with at least one
/// byte. Absolute ids are used as-is.
#[derive(Debug, Clone)]
pub struct FsArtifactResolver {
    root: PathBuf,
}

impl FsArtifactResolver {
    /// Create a resolver rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory ids are resolved against
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtifactResolver for FsArtifactResolver {
    type Error = io::Error;

    fn exists(&self, id: &str) -> Result<bool, Self::Error> {
        match std::fs::metadata(self.root.join(id)) {
            Ok(meta) => Ok(meta.is_file() && meta.len() > 0),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}
