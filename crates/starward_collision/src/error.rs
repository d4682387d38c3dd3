//! # Collision Error Types
//!
//! Two failure classes, handled differently by the engine:
//! - [`BackendInitError`]: the accelerated backend never becomes ready
//! - [`BackendError`]: one call failed; the reference path answers that call

use starward_core::{ChannelError, EncodeError};
use thiserror::Error;

/// The accelerated backend could not be brought up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendInitError {
    /// Disabled by configuration.
    #[error("accelerated backend disabled by configuration")]
    Disabled,

    /// Shared buffers could not be allocated.
    #[error("shared buffer setup failed: {0}")]
    Channel(#[from] ChannelError),
}

/// A single accelerated call failed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    /// A shared buffer could not be grown or viewed.
    #[error("shared buffer fault: {0}")]
    Channel(#[from] ChannelError),

    /// Snapshot encoding into the channel failed.
    #[error("snapshot encoding fault: {0}")]
    Encode(#[from] EncodeError),

    /// A projectile record carried a kind code outside the schema.
    #[error("projectile {index} has unknown kind code {code}")]
    UnknownProjectileKind {
        /// Projectile index.
        index: usize,
        /// The raw code.
        code: f64,
    },

    /// The kernel produced an enemy hit pair list of odd length.
    #[error("enemy hit list has odd length {0}")]
    MalformedHitPairs(usize),
}
