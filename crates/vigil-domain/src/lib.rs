//! Vigil Domain Layer
//!
//! Shared value types and collaborator traits for the Vigil safeguard engine.
//! Every component crate depends on this one and nothing else in the
//! workspace, so records cross component boundaries by value only.
//!
//! ## Key Concepts
//!
//! - **Claim**: an assertion an agent wants to make, pending an evidence check
//! - **Severity**: how costly a catalogued failure pattern is
//! - **Phase**: a named band of the strain signal (structure → director → flow)
//! - **Perspective**: one lens's judgment of the current situation
//! - **SessionId**: host-supplied identity, resolved once at startup
//!
//! ## Architecture
//!
//! - Pure value types, no I/O
//! - Trait definitions for every external collaborator (artifact stores,
//!   lens providers); implementations live in the host or in `vigil-engine`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod claim;
pub mod lens;
pub mod phase;
pub mod session;
pub mod severity;
pub mod signal;
pub mod traits;

// Re-exports for convenience
pub use claim::{Claim, ClaimKind};
pub use lens::{LensId, Perspective};
pub use phase::Phase;
pub use session::SessionId;
pub use severity::Severity;
pub use signal::{SignalKind, SignalSample};
pub use traits::{ArtifactResolver, LensProvider, ProviderError};
