//! # Starward Core
//!
//! Data model and boundary plumbing shared by the collision engine and the
//! spatial grid:
//! - Plain entity records tagged with closed kind enumerations
//! - Fixed-stride snapshot records and the encoder that fills them
//! - The shared buffer channel used by the accelerated collision backend
//!
//! ## Architecture Rules
//!
//! 1. **Entities are data** - behavior dispatch happens on a kind tag, never on type identity
//! 2. **Index parity** - record `i` in any buffer is entity `i` of the source collection
//! 3. **Views borrow buffers** - a record view cannot outlive a capacity change
//!
//! ## Example
//!
//! ```rust
//! use starward_core::{encode, Projectile, ProjectileHitRecord, ProjectileKind};
//!
//! let shots = [Projectile::new(100.0, 100.0, 2.0, 10.0, ProjectileKind::Player)];
//! let records: Vec<ProjectileHitRecord> = encode(&shots);
//! assert_eq!(records[0].kind, 0.0);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod entity;
pub mod error;
pub mod geometry;
pub mod memory;
pub mod snapshot;

pub use entity::{
    Body, Circle, Enemy, EnemyBehavior, EnemyKind, Module, ModuleStar, PowerUp, Projectile,
    ProjectileKind, Ship, MAX_MODULES,
};
pub use error::{ChannelError, ChannelResult, EncodeError};
pub use geometry::{circles_overlap, distance_squared};
pub use memory::{
    BufferAddress, BufferCategory, ChannelCapacities, HitBuffers, SharedBuffer,
    SharedBufferChannel,
};
pub use snapshot::{
    encode, encode_into, positions, positions_into, records_as_words, CircleRecord, Encode,
    EnemyHitboxRecord, EnemyRecord, ProjectileHitRecord, ProjectileMotionRecord, Record,
    ShipRecord,
};
