//! # Entity Snapshots
//!
//! Flat, fixed-stride numeric records consumable by either backend.
//!
//! ```text
//! Projectile hit     (5)  x, y, radius, damage, kind
//! Projectile motion  (5)  x, y, vx, vy, kind
//! Enemy full AI     (21)  x, y, vx, vy, kind, zombie, stealth, radius, hp, max_hp, ...
//! Enemy hitbox       (4)  x, y, radius, zombie
//! Ship               (3)  x, y, radius
//! Module/PowerUp/Star(3)  x, y, radius
//! ```

mod encoder;
mod records;

pub use encoder::{encode, encode_into, positions, positions_into, records_as_words, Encode};
pub use records::{
    CircleRecord, EnemyHitboxRecord, EnemyRecord, ProjectileHitRecord, ProjectileMotionRecord,
    Record, ShipRecord,
};
