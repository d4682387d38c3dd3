//! # Starward Collision
//!
//! Ordered narrow-phase collision between projectiles, enemies, the ship,
//! its modules and pickups.
//!
//! ## Pass Order
//!
//! ```text
//! 1. OFFENSE   player/module/zombie projectiles -> enemies (first overlap wins)
//! 2. DEFENSE   enemy projectiles -> ship -> modules -> zombie enemies
//! 3. PICKUPS   ship -> every power-up, ship -> every module star
//! ```
//!
//! The order decides which overlap wins when a projectile touches several
//! targets in one tick. Every projectile resolves at most once.
//!
//! ## Backends
//!
//! - [`ReferenceBackend`]: scans the typed collections, always ready
//! - [`SharedBufferBackend`]: encodes into a persistent
//!   [`SharedBufferChannel`](starward_core::SharedBufferChannel) and runs a flat kernel
//!
//! [`CollisionEngine`] is the only place that chooses between them.
//!
//! ## Example
//!
//! ```rust
//! use starward_collision::{CollisionEngine, CollisionFrame, EnemyHit};
//! use starward_core::{ChannelCapacities, Enemy, EnemyKind, Projectile, ProjectileKind, Ship};
//!
//! let mut engine = CollisionEngine::new(&ChannelCapacities::default());
//! let shots = [Projectile::new(100.0, 100.0, 2.0, 10.0, ProjectileKind::Player)];
//! let enemies = [Enemy::new(EnemyKind::Basic, 105.0, 100.0, 4.0, 20.0)];
//! let ship = Ship::new(500.0, 500.0);
//!
//! let frame = CollisionFrame::new(&shots, &enemies, &ship);
//! let report = engine.detect(&frame);
//! assert_eq!(report.projectile_hits, vec![0]);
//! assert_eq!(report.enemy_hits, vec![EnemyHit { enemy_index: 0, damage: 10.0 }]);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod backend;
pub mod engine;
pub mod error;
pub mod frame;
pub mod report;

pub use backend::{CollisionBackend, ReferenceBackend, SharedBufferBackend};
pub use engine::{CollisionEngine, EngineStats};
pub use error::{BackendError, BackendInitError};
pub use frame::CollisionFrame;
pub use report::{CollisionReport, EnemyHit};
