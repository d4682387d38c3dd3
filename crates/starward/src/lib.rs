//! # Starward
//!
//! Collision and spatial-query engine for a 2D arcade simulation.
//!
//! ## Per-Tick Flow
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                        TickPipeline                        │
//! │                                                            │
//! │  World ──► EnemyGrid::rebuild ──► CollisionEngine::detect  │
//! │              │                        │                    │
//! │              ▼                        ▼                    │
//! │        AI queries (grid())     CollisionReport             │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! The caller applies the report (removes consumed projectiles, applies
//! damage, collects pickups) before the next tick.
//!
//! ## Crates
//!
//! - [`starward_core`]: entities, snapshot records, shared buffer channel
//! - [`starward_spatial`]: grid indexes and AI targeting
//! - [`starward_collision`]: collision backends and the selecting engine
//!
//! ## Example
//!
//! ```rust
//! use starward::{EngineConfig, TickPipeline, World};
//! use starward::entity::{Enemy, EnemyKind, Projectile, ProjectileKind, Ship};
//!
//! let mut pipeline = TickPipeline::new(&EngineConfig::default()).unwrap();
//! let shots = [Projectile::new(100.0, 100.0, 2.0, 10.0, ProjectileKind::Player)];
//! let enemies = [Enemy::new(EnemyKind::Basic, 105.0, 100.0, 4.0, 20.0)];
//! let ship = Ship::new(500.0, 500.0);
//!
//! let report = pipeline.step(&World::new(&shots, &enemies, &ship));
//! assert_eq!(report.projectile_hits, vec![0]);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod pipeline;

pub use config::{CollisionConfig, ConfigError, EngineConfig, GridConfig};
pub use pipeline::{PipelineStats, TickPipeline, World};

pub use starward_collision as collision;
pub use starward_core as entity;
pub use starward_spatial as spatial;
