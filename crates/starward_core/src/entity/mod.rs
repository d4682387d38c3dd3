//! # Entity Model
//!
//! Entities are plain records owned by the game loop's per-frame
//! collections. Nothing in the engine keeps an entity beyond the call that
//! received it.
//!
//! ## Design Philosophy
//!
//! - Kind tags are closed enumerations matched exhaustively
//! - Every collidable entity exposes a [`Circle`] through [`Body`]
//! - No behavior lives on the records themselves

mod body;
mod kind;

pub use body::{
    Body, Circle, Enemy, EnemyBehavior, Module, ModuleStar, PowerUp, Projectile, Ship,
    MAX_MODULES,
};
pub use kind::{EnemyKind, ProjectileKind};
