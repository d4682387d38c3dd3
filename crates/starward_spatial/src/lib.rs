//! # Starward Spatial
//!
//! Broad-phase neighbor index for enemies and the AI queries built on it.
//!
//! ## Grid
//!
//! The plane is cut into square cells (128 units by default). A query
//! returns every index stored in the 3x3 block around the query cell:
//!
//! ```text
//! ┌─────┬─────┬─────┐
//! │     │     │     │
//! ├─────┼─────┼─────┤
//! │     │  q  │     │   candidates only; callers prune by distance
//! ├─────┼─────┼─────┤
//! │     │     │     │
//! └─────┴─────┴─────┘
//! ```
//!
//! [`EnemyGrid`] picks between the sorted-run index and the hash index,
//! falling back to the hash index when a rebuild fails.
//!
//! ## Example
//!
//! ```rust
//! use starward_spatial::{nearest_hostile, EnemyGrid};
//! use starward_core::{Enemy, EnemyKind};
//!
//! let enemies = [
//!     Enemy::new(EnemyKind::Basic, 10.0, 10.0, 15.0, 20.0).zombie(),
//!     Enemy::new(EnemyKind::Elite, 40.0, 10.0, 15.0, 20.0),
//! ];
//! let mut grid = EnemyGrid::new(128.0, true).unwrap();
//! grid.rebuild_from(&enemies).unwrap();
//!
//! let target = nearest_hostile(&grid, &enemies, 0).unwrap();
//! assert_eq!(target.index, 1);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod grid;
pub mod targeting;

pub use error::{GridError, GridResult};
pub use grid::{cell_key, CellKey, EnemyGrid, GridStats, HashGrid, SortedGrid, SpatialIndex, DEFAULT_CELL_SIZE};
pub use targeting::{
    aim_angle, module_targets, nearest_hostile, nearest_player_side_target, should_module_fire, ModuleTarget,
    PlayerSide, PlayerSideTarget, Target,
};
