//! # Snapshot Records
//!
//! Fixed-stride records in the exact field order both backends agree on.
//! Each record is a `#[repr(C)]` run of `f64` fields, so a flat `&[f64]`
//! buffer of `n * STRIDE` words can be viewed as `n` records in place.

use bytemuck::{Pod, Zeroable};

/// Marker trait for flat snapshot records.
///
/// Records must be:
/// - `Pod`: castable from the channel's word buffers
/// - exactly `STRIDE` `f64` fields wide, with no padding
pub trait Record: Copy + Pod + Zeroable + Default + Send + Sync + 'static {
    /// Number of `f64` fields per record.
    const STRIDE: usize;
    /// Human-readable schema name.
    const NAME: &'static str;
}

/// Projectile motion schema (stride 5): `x, y, vx, vy, kind`.
///
/// Used by AI dodge logic, which needs heading but not damage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct ProjectileMotionRecord {
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
    /// X velocity.
    pub vx: f64,
    /// Y velocity.
    pub vy: f64,
    /// Kind code (player=0, module=1, zombie=2, enemy=3).
    pub kind: f64,
}

impl Record for ProjectileMotionRecord {
    const STRIDE: usize = 5;
    const NAME: &'static str = "projectile_motion";
}

/// Projectile hit schema (stride 5): `x, y, radius, damage, kind`.
///
/// This is what the collision call consumes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct ProjectileHitRecord {
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
    /// Collision radius.
    pub radius: f64,
    /// Damage applied on hit.
    pub damage: f64,
    /// Kind code (player=0, module=1, zombie=2, enemy=3).
    pub kind: f64,
}

impl Record for ProjectileHitRecord {
    const STRIDE: usize = 5;
    const NAME: &'static str = "projectile_hit";
}

/// Full enemy AI schema (stride 21).
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct EnemyRecord {
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
    /// X velocity.
    pub vx: f64,
    /// Y velocity.
    pub vy: f64,
    /// Kind code (basic=0, elite=1, rammer=2, exploder=3).
    pub kind: f64,
    /// 1.0 when zombie-flagged.
    pub is_zombie: f64,
    /// 1.0 when cloaked.
    pub is_stealth: f64,
    /// Collision radius.
    pub radius: f64,
    /// Current hit points.
    pub hp: f64,
    /// Maximum hit points.
    pub max_hp: f64,
    /// Frames until the next shot.
    pub shoot_cooldown: f64,
    /// Heading in radians.
    pub angle: f64,
    /// Post-bounce boost frames.
    pub bounce_boost_frames: f64,
    /// Contact damage cooldown.
    pub hit_cooldown: f64,
    /// Charge cooldown.
    pub charge_cooldown: f64,
    /// Remaining charge frames.
    pub charge_frames: f64,
    /// Aggression multiplier.
    pub aggression: f64,
    /// Pulse phase.
    pub pulse_phase: f64,
    /// Zombie frames remaining.
    pub zombie_lifetime: f64,
    /// Stealth shimmer phase.
    pub stealth_wave_phase: f64,
    /// Split generation.
    pub split_level: f64,
}

impl Record for EnemyRecord {
    const STRIDE: usize = 21;
    const NAME: &'static str = "enemy";
}

/// Collision-only enemy projection (stride 4): `x, y, radius, is_zombie`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct EnemyHitboxRecord {
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
    /// Collision radius.
    pub radius: f64,
    /// 1.0 when zombie-flagged.
    pub is_zombie: f64,
}

impl EnemyHitboxRecord {
    /// Decodes the zombie flag.
    #[inline]
    #[must_use]
    pub fn zombie(&self) -> bool {
        self.is_zombie > 0.5
    }
}

impl Record for EnemyHitboxRecord {
    const STRIDE: usize = 4;
    const NAME: &'static str = "enemy_hitbox";
}

/// Ship schema (stride 3): `x, y, radius`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct ShipRecord {
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
    /// Collision radius.
    pub radius: f64,
}

impl Record for ShipRecord {
    const STRIDE: usize = 3;
    const NAME: &'static str = "ship";
}

/// Module / power-up / module star schema (stride 3): `x, y, radius`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct CircleRecord {
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
    /// Collision radius.
    pub radius: f64,
}

impl Record for CircleRecord {
    const STRIDE: usize = 3;
    const NAME: &'static str = "circle";
}

/// Encodes a boolean flag as a record word.
#[inline]
pub(crate) const fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Decodes a record word as a boolean flag.
#[inline]
pub(crate) fn is_set(word: f64) -> bool {
    word > 0.5
}
