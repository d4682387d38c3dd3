//! # Snapshot Encoder
//!
//! Converts live entity collections into flat records. Encoding is a pure
//! function of its input: record `i` always describes entity `i`, because
//! every result list downstream refers to entities by position.

use super::records::{
    flag, is_set, CircleRecord, EnemyHitboxRecord, EnemyRecord, ProjectileHitRecord,
    ProjectileMotionRecord, Record, ShipRecord,
};
use crate::entity::{
    Enemy, EnemyBehavior, EnemyKind, Module, ModuleStar, PowerUp, Projectile, Ship,
};
use crate::error::EncodeError;

/// Projects an entity onto one record schema.
pub trait Encode<R: Record> {
    /// Builds the record for this entity.
    fn encode(&self) -> R;
}

/// Encodes `entities` into the front of `out`, preserving order.
///
/// Records past `entities.len()` are left untouched.
///
/// # Errors
///
/// Returns [`EncodeError::OutputTooShort`] if `out` cannot hold every entity.
pub fn encode_into<E, R>(entities: &[E], out: &mut [R]) -> Result<(), EncodeError>
where
    E: Encode<R>,
    R: Record,
{
    if out.len() < entities.len() {
        return Err(EncodeError::OutputTooShort {
            required: entities.len(),
            available: out.len(),
        });
    }

    for (slot, entity) in out.iter_mut().zip(entities) {
        *slot = entity.encode();
    }
    Ok(())
}

/// Encodes `entities` into a freshly allocated record vector.
#[must_use]
pub fn encode<E, R>(entities: &[E]) -> Vec<R>
where
    E: Encode<R>,
    R: Record,
{
    entities.iter().map(<E as Encode<R>>::encode).collect()
}

/// Views a record slice as its flat `f64` words.
#[inline]
#[must_use]
pub fn records_as_words<R: Record>(records: &[R]) -> &[f64] {
    bytemuck::cast_slice(records)
}

/// Writes the flat `[x0, y0, x1, y1, ...]` enemy positions used by the grid.
///
/// `out` is cleared first; its allocation is reused.
pub fn positions_into(enemies: &[Enemy], out: &mut Vec<f64>) {
    out.clear();
    out.reserve(enemies.len() * 2);
    for enemy in enemies {
        out.push(enemy.x);
        out.push(enemy.y);
    }
}

/// Returns the flat `[x0, y0, x1, y1, ...]` enemy positions used by the grid.
#[must_use]
pub fn positions(enemies: &[Enemy]) -> Vec<f64> {
    let mut out = Vec::with_capacity(enemies.len() * 2);
    positions_into(enemies, &mut out);
    out
}

impl Encode<ProjectileMotionRecord> for Projectile {
    #[inline]
    fn encode(&self) -> ProjectileMotionRecord {
        ProjectileMotionRecord {
            x: self.x,
            y: self.y,
            vx: self.vx,
            vy: self.vy,
            kind: self.kind.code(),
        }
    }
}

impl Encode<ProjectileHitRecord> for Projectile {
    #[inline]
    fn encode(&self) -> ProjectileHitRecord {
        ProjectileHitRecord {
            x: self.x,
            y: self.y,
            radius: self.radius,
            damage: self.damage,
            kind: self.kind.code(),
        }
    }
}

impl Encode<EnemyRecord> for Enemy {
    fn encode(&self) -> EnemyRecord {
        let b = &self.behavior;
        EnemyRecord {
            x: self.x,
            y: self.y,
            vx: self.vx,
            vy: self.vy,
            kind: self.kind.code(),
            is_zombie: flag(self.is_zombie),
            is_stealth: flag(self.is_stealth),
            radius: self.radius,
            hp: self.hp,
            max_hp: self.max_hp,
            shoot_cooldown: b.shoot_cooldown,
            angle: b.angle,
            bounce_boost_frames: b.bounce_boost_frames,
            hit_cooldown: b.hit_cooldown,
            charge_cooldown: b.charge_cooldown,
            charge_frames: b.charge_frames,
            aggression: b.aggression,
            pulse_phase: b.pulse_phase,
            zombie_lifetime: b.zombie_lifetime,
            stealth_wave_phase: b.stealth_wave_phase,
            split_level: b.split_level,
        }
    }
}

impl Encode<EnemyHitboxRecord> for Enemy {
    #[inline]
    fn encode(&self) -> EnemyHitboxRecord {
        EnemyHitboxRecord {
            x: self.x,
            y: self.y,
            radius: self.radius,
            is_zombie: flag(self.is_zombie),
        }
    }
}

impl Encode<ShipRecord> for Ship {
    #[inline]
    fn encode(&self) -> ShipRecord {
        ShipRecord {
            x: self.x,
            y: self.y,
            radius: self.radius,
        }
    }
}

macro_rules! encode_circle {
    ($($ty:ty),*) => {
        $(
            impl Encode<CircleRecord> for $ty {
                #[inline]
                fn encode(&self) -> CircleRecord {
                    CircleRecord { x: self.x, y: self.y, radius: self.radius }
                }
            }
        )*
    };
}

encode_circle!(Module, PowerUp, ModuleStar);

impl From<&EnemyRecord> for Enemy {
    fn from(r: &EnemyRecord) -> Self {
        Self {
            x: r.x,
            y: r.y,
            vx: r.vx,
            vy: r.vy,
            kind: EnemyKind::from_code(r.kind),
            is_zombie: is_set(r.is_zombie),
            is_stealth: is_set(r.is_stealth),
            radius: r.radius,
            hp: r.hp,
            max_hp: r.max_hp,
            behavior: EnemyBehavior {
                shoot_cooldown: r.shoot_cooldown,
                angle: r.angle,
                bounce_boost_frames: r.bounce_boost_frames,
                hit_cooldown: r.hit_cooldown,
                charge_cooldown: r.charge_cooldown,
                charge_frames: r.charge_frames,
                aggression: r.aggression,
                pulse_phase: r.pulse_phase,
                zombie_lifetime: r.zombie_lifetime,
                stealth_wave_phase: r.stealth_wave_phase,
                split_level: r.split_level,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ProjectileKind;

    #[test]
    fn test_encode_preserves_order() {
        let shots = [
            Projectile::new(1.0, 1.0, 2.0, 10.0, ProjectileKind::Player),
            Projectile::new(2.0, 2.0, 3.0, 5.0, ProjectileKind::Enemy),
            Projectile::new(3.0, 3.0, 4.0, 1.0, ProjectileKind::Zombie),
        ];
        let records: Vec<ProjectileHitRecord> = encode(&shots);
        assert_eq!(records.len(), 3);
        for (i, r) in records.iter().enumerate() {
            assert!((r.x - shots[i].x).abs() < f64::EPSILON);
            assert!((r.kind - shots[i].kind.code()).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_motion_schema() {
        let shot = Projectile::new(5.0, 6.0, 2.0, 10.0, ProjectileKind::Module).with_velocity(-1.0, 0.5);
        let records: Vec<ProjectileMotionRecord> = encode(&[shot]);
        let words = records_as_words(&records);
        assert_eq!(words, &[5.0, 6.0, -1.0, 0.5, 1.0]);
    }

    #[test]
    fn test_encode_into_too_short() {
        let enemies = [Enemy::new(EnemyKind::Basic, 0.0, 0.0, 10.0, 5.0); 3];
        let mut out = [EnemyHitboxRecord::default(); 2];
        let err = encode_into(&enemies, &mut out).unwrap_err();
        assert_eq!(err, EncodeError::OutputTooShort { required: 3, available: 2 });
    }

    #[test]
    fn test_encode_into_leaves_tail() {
        let modules = [Module::new(1.0, 2.0)];
        let sentinel = CircleRecord { x: 9.0, y: 9.0, radius: 9.0 };
        let mut out = [sentinel; 3];
        encode_into(&modules, &mut out).unwrap();
        assert_eq!(out[0], CircleRecord { x: 1.0, y: 2.0, radius: 12.0 });
        assert_eq!(out[1], sentinel);
    }

    #[test]
    fn test_full_enemy_roundtrip() {
        let mut enemy = Enemy::new(EnemyKind::Rammer, 10.0, 20.0, 18.0, 30.0).zombie();
        enemy.vx = 1.5;
        enemy.is_stealth = true;
        enemy.behavior.charge_frames = 12.0;
        enemy.behavior.split_level = 2.0;

        let records: Vec<EnemyRecord> = encode(&[enemy]);
        assert!((records[0].is_zombie - 1.0).abs() < f64::EPSILON);
        assert_eq!(Enemy::from(&records[0]), enemy);
    }

    #[test]
    fn test_hitbox_projection() {
        let enemy = Enemy::new(EnemyKind::Exploder, 3.0, 4.0, 9.0, 1.0).zombie();
        let records: Vec<EnemyHitboxRecord> = encode(&[enemy]);
        assert_eq!(records_as_words(&records), &[3.0, 4.0, 9.0, 1.0]);
    }

    #[test]
    fn test_positions() {
        let enemies = [
            Enemy::new(EnemyKind::Basic, 1.0, 2.0, 10.0, 5.0),
            Enemy::new(EnemyKind::Elite, -3.0, 4.0, 10.0, 5.0),
        ];
        assert_eq!(positions(&enemies), vec![1.0, 2.0, -3.0, 4.0]);

        let mut reused = vec![99.0; 10];
        positions_into(&enemies[..1], &mut reused);
        assert_eq!(reused, vec![1.0, 2.0]);
    }
}
