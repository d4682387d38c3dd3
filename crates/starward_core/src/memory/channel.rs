//! # Shared Buffer Channel
//!
//! One persistent buffer per entity category plus the output lists the
//! accelerated collision kernel writes into. Nothing here is allocated per
//! call once the buffers have grown to the working-set size.
//!
//! ## Address Contract
//!
//! ```text
//! ensure_capacity(Projectiles, n)   <- may move the projectile words
//! address(Projectiles)              <- valid from here...
//! ...write records, run kernel, read outputs...
//! ensure_capacity(Projectiles, m)   <- ...until here
//! ```
//!
//! Typed views enforce this at compile time. Raw [`BufferAddress`]es carry a
//! generation so a foreign consumer can tell when it must re-fetch.

use serde::{Deserialize, Serialize};

use super::buffer::{BufferAddress, SharedBuffer};
use crate::error::{ChannelError, ChannelResult};
use crate::snapshot::{CircleRecord, EnemyHitboxRecord, ProjectileHitRecord, Record, ShipRecord};

/// Input buffer categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BufferCategory {
    /// Projectile hit records.
    Projectiles,
    /// Collision-only enemy records.
    Enemies,
    /// The single ship record.
    Ship,
    /// Module records.
    Modules,
    /// Power-up records.
    PowerUps,
    /// Module star records.
    Stars,
}

impl BufferCategory {
    /// Every category, in channel order.
    pub const ALL: [Self; 6] = [
        Self::Projectiles,
        Self::Enemies,
        Self::Ship,
        Self::Modules,
        Self::PowerUps,
        Self::Stars,
    ];

    /// Returns the record stride for this category.
    #[must_use]
    pub const fn stride(self) -> usize {
        match self {
            Self::Projectiles => ProjectileHitRecord::STRIDE,
            Self::Enemies => EnemyHitboxRecord::STRIDE,
            Self::Ship => ShipRecord::STRIDE,
            Self::Modules | Self::PowerUps | Self::Stars => CircleRecord::STRIDE,
        }
    }

    /// Returns the buffer label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Projectiles => "projectiles",
            Self::Enemies => "enemies",
            Self::Ship => "ship",
            Self::Modules => "modules",
            Self::PowerUps => "powerups",
            Self::Stars => "stars",
        }
    }
}

/// Initial record capacities for every buffer in the channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelCapacities {
    /// Projectile records.
    pub projectiles: usize,
    /// Enemy records.
    pub enemies: usize,
    /// Module records.
    pub modules: usize,
    /// Power-up records.
    pub powerups: usize,
    /// Module star records.
    pub stars: usize,
    /// Projectile hit slots.
    pub projectile_hits: usize,
    /// Enemy hit pair slots.
    pub enemy_hits: usize,
    /// Collected power-up slots.
    pub powerups_collected: usize,
    /// Collected star slots.
    pub stars_collected: usize,
}

impl ChannelCapacities {
    /// Upper bound accepted from configuration for any single capacity.
    pub const MAX_RECORDS: usize = 1 << 24;

    /// Every capacity paired with its field name.
    #[must_use]
    pub const fn entries(&self) -> [(&'static str, usize); 9] {
        [
            ("projectiles", self.projectiles),
            ("enemies", self.enemies),
            ("modules", self.modules),
            ("powerups", self.powerups),
            ("stars", self.stars),
            ("projectile_hits", self.projectile_hits),
            ("enemy_hits", self.enemy_hits),
            ("powerups_collected", self.powerups_collected),
            ("stars_collected", self.stars_collected),
        ]
    }
}

impl Default for ChannelCapacities {
    fn default() -> Self {
        Self {
            projectiles: 400,
            enemies: 250,
            modules: 100,
            powerups: 100,
            stars: 100,
            projectile_hits: 100,
            enemy_hits: 100,
            powerups_collected: 20,
            stars_collected: 20,
        }
    }
}

/// Output lists written by the accelerated kernel.
///
/// Cleared, never freed, at the start of every kernel call.
#[derive(Clone, Debug, Default)]
pub struct HitBuffers {
    /// Indices of consumed projectiles.
    projectile_hits: Vec<u32>,
    /// Flattened `[enemy_index, damage, ...]` pairs.
    enemy_hits: Vec<f64>,
    /// Indices of collected power-ups.
    powerups_collected: Vec<u32>,
    /// Indices of collected module stars.
    stars_collected: Vec<u32>,
    /// Ship took unshielded damage this call.
    ship_hit: bool,
    /// Accumulated unshielded ship damage.
    ship_damage: f64,
}

impl HitBuffers {
    fn with_capacities(caps: &ChannelCapacities) -> ChannelResult<Self> {
        let mut out = Self::default();
        reserve(&mut out.projectile_hits, caps.projectile_hits, "projectile_hits")?;
        let pair_words = caps.enemy_hits.checked_mul(2).ok_or(ChannelError::Allocation {
            buffer: "enemy_hits",
            records: caps.enemy_hits,
        })?;
        reserve(&mut out.enemy_hits, pair_words, "enemy_hits")?;
        reserve(&mut out.powerups_collected, caps.powerups_collected, "powerups_collected")?;
        reserve(&mut out.stars_collected, caps.stars_collected, "stars_collected")?;
        Ok(out)
    }

    /// Resets every list and the ship flags. Keeps allocations.
    pub fn clear(&mut self) {
        self.projectile_hits.clear();
        self.enemy_hits.clear();
        self.powerups_collected.clear();
        self.stars_collected.clear();
        self.ship_hit = false;
        self.ship_damage = 0.0;
    }

    /// Records a consumed projectile.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::OutputOverflow`] if `index` does not fit a `u32`.
    pub fn push_projectile_hit(&mut self, index: usize) -> ChannelResult<()> {
        self.projectile_hits.push(to_slot(index)?);
        Ok(())
    }

    /// Records a damaged enemy.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::OutputOverflow`] if `index` does not fit a `u32`.
    pub fn push_enemy_hit(&mut self, index: usize, damage: f64) -> ChannelResult<()> {
        let slot = to_slot(index)?;
        self.enemy_hits.push(f64::from(slot));
        self.enemy_hits.push(damage);
        Ok(())
    }

    /// Records a collected power-up.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::OutputOverflow`] if `index` does not fit a `u32`.
    pub fn push_powerup(&mut self, index: usize) -> ChannelResult<()> {
        self.powerups_collected.push(to_slot(index)?);
        Ok(())
    }

    /// Records a collected module star.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::OutputOverflow`] if `index` does not fit a `u32`.
    pub fn push_star(&mut self, index: usize) -> ChannelResult<()> {
        self.stars_collected.push(to_slot(index)?);
        Ok(())
    }

    /// Adds unshielded damage to the ship.
    pub fn hit_ship(&mut self, damage: f64) {
        self.ship_hit = true;
        self.ship_damage += damage;
    }

    /// Consumed projectile indices.
    #[inline]
    #[must_use]
    pub fn projectile_hits(&self) -> &[u32] {
        &self.projectile_hits
    }

    /// Flattened `[enemy_index, damage, ...]` pairs.
    #[inline]
    #[must_use]
    pub fn enemy_hits(&self) -> &[f64] {
        &self.enemy_hits
    }

    /// Collected power-up indices.
    #[inline]
    #[must_use]
    pub fn powerups_collected(&self) -> &[u32] {
        &self.powerups_collected
    }

    /// Collected module star indices.
    #[inline]
    #[must_use]
    pub fn stars_collected(&self) -> &[u32] {
        &self.stars_collected
    }

    /// Ship took unshielded damage.
    #[inline]
    #[must_use]
    pub const fn ship_hit(&self) -> bool {
        self.ship_hit
    }

    /// Accumulated unshielded ship damage.
    #[inline]
    #[must_use]
    pub const fn ship_damage(&self) -> f64 {
        self.ship_damage
    }
}

/// The persistent buffer set shared with the accelerated backend.
#[derive(Debug)]
pub struct SharedBufferChannel {
    projectiles: SharedBuffer<ProjectileHitRecord>,
    enemies: SharedBuffer<EnemyHitboxRecord>,
    ship: SharedBuffer<ShipRecord>,
    modules: SharedBuffer<CircleRecord>,
    powerups: SharedBuffer<CircleRecord>,
    stars: SharedBuffer<CircleRecord>,
    outputs: HitBuffers,
}

impl SharedBufferChannel {
    /// Allocates every buffer at its initial capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Allocation`] if any buffer cannot be reserved.
    pub fn new(caps: &ChannelCapacities) -> ChannelResult<Self> {
        Ok(Self {
            projectiles: SharedBuffer::new(BufferCategory::Projectiles.label(), caps.projectiles)?,
            enemies: SharedBuffer::new(BufferCategory::Enemies.label(), caps.enemies)?,
            ship: SharedBuffer::fixed(BufferCategory::Ship.label(), 1)?,
            modules: SharedBuffer::new(BufferCategory::Modules.label(), caps.modules)?,
            powerups: SharedBuffer::new(BufferCategory::PowerUps.label(), caps.powerups)?,
            stars: SharedBuffer::new(BufferCategory::Stars.label(), caps.stars)?,
            outputs: HitBuffers::with_capacities(caps)?,
        })
    }

    /// Grows one category's buffer to hold at least `records` records.
    ///
    /// Returns `true` if the buffer moved. Any address previously taken for
    /// `category` is stale after a `true` return.
    ///
    /// # Errors
    ///
    /// - [`ChannelError::FixedCapacity`] for the ship buffer beyond one record
    /// - [`ChannelError::Allocation`] if growth fails
    pub fn ensure_capacity(&mut self, category: BufferCategory, records: usize) -> ChannelResult<bool> {
        match category {
            BufferCategory::Projectiles => self.projectiles.ensure_capacity(records),
            BufferCategory::Enemies => self.enemies.ensure_capacity(records),
            BufferCategory::Ship => self.ship.ensure_capacity(records),
            BufferCategory::Modules => self.modules.ensure_capacity(records),
            BufferCategory::PowerUps => self.powerups.ensure_capacity(records),
            BufferCategory::Stars => self.stars.ensure_capacity(records),
        }
    }

    /// Returns the capacity of one category in records.
    #[must_use]
    pub const fn capacity(&self, category: BufferCategory) -> usize {
        match category {
            BufferCategory::Projectiles => self.projectiles.capacity(),
            BufferCategory::Enemies => self.enemies.capacity(),
            BufferCategory::Ship => self.ship.capacity(),
            BufferCategory::Modules => self.modules.capacity(),
            BufferCategory::PowerUps => self.powerups.capacity(),
            BufferCategory::Stars => self.stars.capacity(),
        }
    }

    /// Returns the current raw address of one category's buffer.
    #[must_use]
    pub fn address(&self, category: BufferCategory) -> BufferAddress {
        match category {
            BufferCategory::Projectiles => self.projectiles.address(),
            BufferCategory::Enemies => self.enemies.address(),
            BufferCategory::Ship => self.ship.address(),
            BufferCategory::Modules => self.modules.address(),
            BufferCategory::PowerUps => self.powerups.address(),
            BufferCategory::Stars => self.stars.address(),
        }
    }

    /// Returns `true` if `address` is still valid for `category`.
    #[must_use]
    pub fn is_current(&self, category: BufferCategory, address: BufferAddress) -> bool {
        self.address(category) == address
    }

    /// Projectile buffer.
    #[inline]
    #[must_use]
    pub const fn projectiles(&self) -> &SharedBuffer<ProjectileHitRecord> {
        &self.projectiles
    }

    /// Mutable projectile buffer.
    #[inline]
    pub fn projectiles_mut(&mut self) -> &mut SharedBuffer<ProjectileHitRecord> {
        &mut self.projectiles
    }

    /// Enemy buffer.
    #[inline]
    #[must_use]
    pub const fn enemies(&self) -> &SharedBuffer<EnemyHitboxRecord> {
        &self.enemies
    }

    /// Mutable enemy buffer.
    #[inline]
    pub fn enemies_mut(&mut self) -> &mut SharedBuffer<EnemyHitboxRecord> {
        &mut self.enemies
    }

    /// Module buffer.
    #[inline]
    #[must_use]
    pub const fn modules(&self) -> &SharedBuffer<CircleRecord> {
        &self.modules
    }

    /// Mutable module buffer.
    #[inline]
    pub fn modules_mut(&mut self) -> &mut SharedBuffer<CircleRecord> {
        &mut self.modules
    }

    /// Power-up buffer.
    #[inline]
    #[must_use]
    pub const fn powerups(&self) -> &SharedBuffer<CircleRecord> {
        &self.powerups
    }

    /// Mutable power-up buffer.
    #[inline]
    pub fn powerups_mut(&mut self) -> &mut SharedBuffer<CircleRecord> {
        &mut self.powerups
    }

    /// Module star buffer.
    #[inline]
    #[must_use]
    pub const fn stars(&self) -> &SharedBuffer<CircleRecord> {
        &self.stars
    }

    /// Mutable module star buffer.
    #[inline]
    pub fn stars_mut(&mut self) -> &mut SharedBuffer<CircleRecord> {
        &mut self.stars
    }

    /// Reads the ship record.
    ///
    /// # Errors
    ///
    /// Only fails if the fixed ship buffer was built with zero records.
    pub fn ship(&self) -> ChannelResult<ShipRecord> {
        self.ship
            .records(1)?
            .first()
            .copied()
            .ok_or(ChannelError::CountExceedsCapacity {
                buffer: self.ship.label(),
                capacity: self.ship.capacity(),
                requested: 1,
            })
    }

    /// Writes the ship record.
    ///
    /// # Errors
    ///
    /// Only fails if the fixed ship buffer was built with zero records.
    pub fn set_ship(&mut self, record: ShipRecord) -> ChannelResult<()> {
        if let Some(slot) = self.ship.records_mut(1)?.first_mut() {
            *slot = record;
        }
        Ok(())
    }

    /// Kernel output lists.
    #[inline]
    #[must_use]
    pub const fn outputs(&self) -> &HitBuffers {
        &self.outputs
    }

    /// Mutable kernel output lists.
    #[inline]
    pub fn outputs_mut(&mut self) -> &mut HitBuffers {
        &mut self.outputs
    }
}

fn reserve<T>(list: &mut Vec<T>, slots: usize, buffer: &'static str) -> ChannelResult<()> {
    list.try_reserve_exact(slots)
        .map_err(|_| ChannelError::Allocation { buffer, records: slots })
}

fn to_slot(index: usize) -> ChannelResult<u32> {
    u32::try_from(index).map_err(|_| ChannelError::OutputOverflow { index })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel() -> SharedBufferChannel {
        SharedBufferChannel::new(&ChannelCapacities::default()).unwrap()
    }

    #[test]
    fn test_initial_capacities() {
        let ch = channel();
        assert_eq!(ch.capacity(BufferCategory::Projectiles), 400);
        assert_eq!(ch.capacity(BufferCategory::Enemies), 250);
        assert_eq!(ch.capacity(BufferCategory::Ship), 1);
        assert_eq!(ch.capacity(BufferCategory::Stars), 100);
    }

    #[test]
    fn test_strides() {
        assert_eq!(BufferCategory::Projectiles.stride(), 5);
        assert_eq!(BufferCategory::Enemies.stride(), 4);
        for cat in [BufferCategory::Ship, BufferCategory::Modules, BufferCategory::PowerUps, BufferCategory::Stars] {
            assert_eq!(cat.stride(), 3);
        }
    }

    #[test]
    fn test_ship_is_fixed() {
        let mut ch = channel();
        assert!(!ch.ensure_capacity(BufferCategory::Ship, 1).unwrap());
        assert!(ch.ensure_capacity(BufferCategory::Ship, 2).is_err());

        ch.set_ship(ShipRecord { x: 1.0, y: 2.0, radius: 25.0 }).unwrap();
        assert_eq!(ch.ship().unwrap(), ShipRecord { x: 1.0, y: 2.0, radius: 25.0 });
    }

    #[test]
    fn test_growth_invalidates_address() {
        let mut ch = channel();
        let before = ch.address(BufferCategory::Enemies);
        assert!(ch.is_current(BufferCategory::Enemies, before));

        assert!(ch.ensure_capacity(BufferCategory::Enemies, 251).unwrap());
        assert!(!ch.is_current(BufferCategory::Enemies, before));
        assert_eq!(ch.capacity(BufferCategory::Enemies), 256);

        // Other categories are untouched
        let proj = ch.address(BufferCategory::Projectiles);
        assert!(ch.is_current(BufferCategory::Projectiles, proj));
    }

    #[test]
    fn test_outputs_clear_keeps_flags_consistent() {
        let mut ch = channel();
        let out = ch.outputs_mut();
        out.push_projectile_hit(3).unwrap();
        out.push_enemy_hit(7, 12.5).unwrap();
        out.hit_ship(4.0);
        out.hit_ship(1.0);
        assert_eq!(out.projectile_hits(), &[3]);
        assert_eq!(out.enemy_hits(), &[7.0, 12.5]);
        assert!((out.ship_damage() - 5.0).abs() < f64::EPSILON);

        out.clear();
        assert!(out.projectile_hits().is_empty());
        assert!(out.enemy_hits().is_empty());
        assert!(!out.ship_hit());
        assert!(out.ship_damage().abs() < f64::EPSILON);
    }

    #[test]
    fn test_oversized_capacities_fail_allocation() {
        let caps = ChannelCapacities {
            projectiles: usize::MAX / 4 + 1,
            ..ChannelCapacities::default()
        };
        assert!(matches!(
            SharedBufferChannel::new(&caps),
            Err(ChannelError::Allocation { buffer: "projectiles", .. })
        ));

        let caps = ChannelCapacities {
            enemy_hits: usize::MAX / 2 + 1,
            ..ChannelCapacities::default()
        };
        assert!(matches!(
            SharedBufferChannel::new(&caps),
            Err(ChannelError::Allocation { buffer: "enemy_hits", .. })
        ));
    }

    #[test]
    fn test_default_capacities_within_limit() {
        let caps = ChannelCapacities::default();
        assert!(caps.entries().iter().all(|&(_, n)| n <= ChannelCapacities::MAX_RECORDS));
        assert_eq!(caps.entries()[1], ("enemies", 250));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_output_overflow() {
        let mut ch = channel();
        let too_big = u32::MAX as usize + 1;
        assert_eq!(
            ch.outputs_mut().push_powerup(too_big),
            Err(ChannelError::OutputOverflow { index: too_big })
        );
    }
}
