//! # Collision Report
//!
//! The one result shape both backends produce. Callers never need to know
//! which backend answered.

/// Damage dealt to one enemy by one projectile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyHit {
    /// Index into the frame's enemy slice.
    pub enemy_index: usize,
    /// Damage carried by the projectile.
    pub damage: f64,
}

/// Results of one collision call.
///
/// Owned by the engine and overwritten on the next call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionReport {
    /// Indices of projectiles to remove. Each index appears at most once.
    pub projectile_hits: Vec<usize>,
    /// Enemy damage, one entry per consuming projectile.
    pub enemy_hits: Vec<EnemyHit>,
    /// The ship took unshielded damage.
    pub ship_hit: bool,
    /// Accumulated unshielded ship damage.
    pub ship_damage: f64,
    /// Indices of power-ups the ship collected.
    pub powerups_collected: Vec<usize>,
    /// Indices of module stars the ship collected.
    pub stars_collected: Vec<usize>,
}

impl CollisionReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties every list and resets the ship fields. Keeps allocations.
    pub fn clear(&mut self) {
        self.projectile_hits.clear();
        self.enemy_hits.clear();
        self.ship_hit = false;
        self.ship_damage = 0.0;
        self.powerups_collected.clear();
        self.stars_collected.clear();
    }

    /// Returns `true` if nothing collided.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projectile_hits.is_empty()
            && self.enemy_hits.is_empty()
            && !self.ship_hit
            && self.powerups_collected.is_empty()
            && self.stars_collected.is_empty()
    }

    /// Returns `true` if projectile `index` was consumed.
    #[must_use]
    pub fn consumed(&self, index: usize) -> bool {
        self.projectile_hits.contains(&index)
    }

    /// Sums the damage dealt to one enemy.
    #[must_use]
    pub fn damage_to(&self, enemy_index: usize) -> f64 {
        self.enemy_hits
            .iter()
            .filter(|hit| hit.enemy_index == enemy_index)
            .map(|hit| hit.damage)
            .sum()
    }

    /// Returns a copy with every list sorted, for order-insensitive comparison.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut out = self.clone();
        out.projectile_hits.sort_unstable();
        out.enemy_hits.sort_by(|a, b| {
            a.enemy_index
                .cmp(&b.enemy_index)
                .then(a.damage.total_cmp(&b.damage))
        });
        out.powerups_collected.sort_unstable();
        out.stars_collected.sort_unstable();
        out
    }
}
