//! # Shared Buffer Backend
//!
//! Encodes each frame into a persistent [`SharedBufferChannel`] and runs a
//! flat kernel over the records. Nothing is allocated per call once the
//! buffers are large enough.
//!
//! ```text
//! frame ──encode──► channel inputs ──kernel──► channel outputs ──copy──► report
//! ```

use starward_core::{
    circles_overlap, encode_into, ChannelCapacities, Circle, CircleRecord, Encode, EnemyHitboxRecord,
    HitBuffers, ProjectileHitRecord, ProjectileKind, Record, SharedBuffer, SharedBufferChannel, ShipRecord,
};

use super::CollisionBackend;
use crate::error::{BackendError, BackendInitError};
use crate::frame::CollisionFrame;
use crate::report::{CollisionReport, EnemyHit};

/// Accelerated backend over the shared buffer channel.
#[derive(Debug)]
pub struct SharedBufferBackend {
    channel: SharedBufferChannel,
}

impl SharedBufferBackend {
    /// Allocates the channel at the given initial capacities.
    ///
    /// # Errors
    ///
    /// Returns [`BackendInitError::Channel`] if any buffer cannot be allocated.
    pub fn new(caps: &ChannelCapacities) -> Result<Self, BackendInitError> {
        let channel = SharedBufferChannel::new(caps)?;
        tracing::debug!(
            projectiles = caps.projectiles,
            enemies = caps.enemies,
            "shared buffer backend ready"
        );
        Ok(Self { channel })
    }

    /// The underlying channel.
    #[inline]
    #[must_use]
    pub const fn channel(&self) -> &SharedBufferChannel {
        &self.channel
    }

    fn upload(&mut self, frame: &CollisionFrame<'_>) -> Result<(), BackendError> {
        upload_category(self.channel.projectiles_mut(), frame.projectiles)?;
        upload_category(self.channel.enemies_mut(), frame.enemies)?;
        upload_category(self.channel.modules_mut(), frame.modules)?;
        upload_category(self.channel.powerups_mut(), frame.powerups)?;
        upload_category(self.channel.stars_mut(), frame.stars)?;

        let ship: ShipRecord = frame.ship.encode();
        self.channel.set_ship(ship)?;
        Ok(())
    }

    fn execute(&mut self, counts: Counts) -> Result<(), BackendError> {
        // The kernel reads inputs while writing outputs; detach the outputs
        // for the duration of the call and put them back either way.
        let mut outputs = std::mem::take(self.channel.outputs_mut());
        let result = self.inputs(counts).and_then(|inputs| run_kernel(&inputs, &mut outputs));
        *self.channel.outputs_mut() = outputs;
        result
    }

    fn inputs(&self, counts: Counts) -> Result<KernelInputs<'_>, BackendError> {
        Ok(KernelInputs {
            projectiles: self.channel.projectiles().records(counts.projectiles)?,
            enemies: self.channel.enemies().records(counts.enemies)?,
            ship: self.channel.ship()?,
            modules: self.channel.modules().records(counts.modules)?,
            powerups: self.channel.powerups().records(counts.powerups)?,
            stars: self.channel.stars().records(counts.stars)?,
            shield_active: counts.shield_active,
        })
    }

    fn read_back(&self, report: &mut CollisionReport) -> Result<(), BackendError> {
        let out = self.channel.outputs();

        let pairs = out.enemy_hits();
        if pairs.len() % 2 != 0 {
            return Err(BackendError::MalformedHitPairs(pairs.len()));
        }

        report
            .projectile_hits
            .extend(out.projectile_hits().iter().map(|&i| i as usize));
        report.enemy_hits.extend(pairs.chunks_exact(2).map(|pair| EnemyHit {
            enemy_index: pair[0] as usize,
            damage: pair[1],
        }));
        report.ship_hit = out.ship_hit();
        report.ship_damage = out.ship_damage();
        report
            .powerups_collected
            .extend(out.powerups_collected().iter().map(|&i| i as usize));
        report
            .stars_collected
            .extend(out.stars_collected().iter().map(|&i| i as usize));
        Ok(())
    }
}

impl CollisionBackend for SharedBufferBackend {
    fn name(&self) -> &'static str {
        "shared-buffer"
    }

    /// Always ready once constructed.
    fn is_ready(&self) -> bool {
        true
    }

    fn detect(&mut self, frame: &CollisionFrame<'_>, report: &mut CollisionReport) -> Result<(), BackendError> {
        self.upload(frame)?;
        self.execute(Counts::of(frame))?;
        self.read_back(report)
    }
}

fn upload_category<E, R>(buffer: &mut SharedBuffer<R>, entities: &[E]) -> Result<(), BackendError>
where
    E: Encode<R>,
    R: Record,
{
    buffer.ensure_capacity(entities.len())?;
    encode_into(entities, buffer.records_mut(entities.len())?)?;
    Ok(())
}

/// Per-category record counts for one call.
#[derive(Clone, Copy, Debug)]
struct Counts {
    projectiles: usize,
    enemies: usize,
    modules: usize,
    powerups: usize,
    stars: usize,
    shield_active: bool,
}

impl Counts {
    fn of(frame: &CollisionFrame<'_>) -> Self {
        Self {
            projectiles: frame.projectiles.len(),
            enemies: frame.enemies.len(),
            modules: frame.modules.len(),
            powerups: frame.powerups.len(),
            stars: frame.stars.len(),
            shield_active: frame.shield_active(),
        }
    }
}

/// Borrowed record views for the kernel.
struct KernelInputs<'a> {
    projectiles: &'a [ProjectileHitRecord],
    enemies: &'a [EnemyHitboxRecord],
    ship: ShipRecord,
    modules: &'a [CircleRecord],
    powerups: &'a [CircleRecord],
    stars: &'a [CircleRecord],
    shield_active: bool,
}

#[inline]
fn shot_circle(p: &ProjectileHitRecord) -> Circle {
    Circle::new(p.x, p.y, p.radius)
}

#[inline]
fn hitbox_circle(e: &EnemyHitboxRecord) -> Circle {
    Circle::new(e.x, e.y, e.radius)
}

#[inline]
fn record_circle(c: &CircleRecord) -> Circle {
    Circle::new(c.x, c.y, c.radius)
}

fn run_kernel(inputs: &KernelInputs<'_>, out: &mut HitBuffers) -> Result<(), BackendError> {
    out.clear();
    let ship = Circle::new(inputs.ship.x, inputs.ship.y, inputs.ship.radius);

    // OFFENSE
    for (i, p) in inputs.projectiles.iter().enumerate() {
        let kind = ProjectileKind::from_code(p.kind)
            .ok_or(BackendError::UnknownProjectileKind { index: i, code: p.kind })?;
        if !kind.is_offensive() {
            continue;
        }
        let zombie_shot = kind == ProjectileKind::Zombie;
        let shot = shot_circle(p);

        for (j, e) in inputs.enemies.iter().enumerate() {
            if zombie_shot && e.zombie() {
                continue;
            }
            if circles_overlap(shot, hitbox_circle(e)) {
                out.push_projectile_hit(i)?;
                out.push_enemy_hit(j, p.damage)?;
                break;
            }
        }
    }

    // DEFENSE
    for (i, p) in inputs.projectiles.iter().enumerate() {
        if ProjectileKind::from_code(p.kind) != Some(ProjectileKind::Enemy) {
            continue;
        }
        let shot = shot_circle(p);

        if circles_overlap(shot, ship) {
            if !inputs.shield_active {
                out.hit_ship(p.damage);
            }
            out.push_projectile_hit(i)?;
            continue;
        }

        if inputs.modules.iter().any(|m| circles_overlap(shot, record_circle(m))) {
            out.push_projectile_hit(i)?;
            continue;
        }

        let zombie = inputs
            .enemies
            .iter()
            .position(|e| e.zombie() && circles_overlap(shot, hitbox_circle(e)));
        if let Some(j) = zombie {
            out.push_projectile_hit(i)?;
            out.push_enemy_hit(j, p.damage)?;
        }
    }

    // PICKUPS
    for (i, powerup) in inputs.powerups.iter().enumerate() {
        if circles_overlap(ship, record_circle(powerup)) {
            out.push_powerup(i)?;
        }
    }
    for (i, star) in inputs.stars.iter().enumerate() {
        if circles_overlap(ship, record_circle(star)) {
            out.push_star(i)?;
        }
    }

    Ok(())
}
