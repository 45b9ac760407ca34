//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the engine and the host.
//! Implementations are supplied by the host (or by `vigil-engine` for the
//! common filesystem case).

use crate::{LensId, Perspective};

/// Boxed error returned by lens providers
pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

/// Answers whether an evidence artifact exists
///
/// Implemented by the host, typically over a file or object store.
/// "Exists" means present and non-empty.
pub trait ArtifactResolver {
    /// Error type for lookups
    type Error: std::fmt::Display;

    /// Check whether the artifact identified by `id` exists and is non-empty
    fn exists(&self, id: &str) -> Result<bool, Self::Error>;
}

impl<T: ArtifactResolver + ?Sized> ArtifactResolver for &T {
    type Error = T::Error;

    fn exists(&self, id: &str) -> Result<bool, Self::Error> {
        (**self).exists(id)
    }
}

/// Produces one lens's perspective on demand
///
/// One provider per lens identifier is injected into the consensus advisor.
pub trait LensProvider: Send + Sync {
    /// Lens this provider speaks for
    fn lens(&self) -> LensId;

    /// Produce a fresh perspective
    fn produce(&self) -> Result<Perspective, ProviderError>;
}
