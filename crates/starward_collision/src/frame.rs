//! # Collision Frame
//!
//! Borrowed view of one tick's entity collections.

use starward_core::{Enemy, Module, ModuleStar, PowerUp, Projectile, Ship};

/// Everything a collision call needs, borrowed from the game loop.
///
/// Result indices refer to positions in these slices.
#[derive(Clone, Copy, Debug)]
pub struct CollisionFrame<'a> {
    /// Projectiles in flight.
    pub projectiles: &'a [Projectile],
    /// Live enemies.
    pub enemies: &'a [Enemy],
    /// The player ship (also carries the shield flag).
    pub ship: &'a Ship,
    /// Ship modules.
    pub modules: &'a [Module],
    /// Power-ups on the field.
    pub powerups: &'a [PowerUp],
    /// Module stars on the field.
    pub stars: &'a [ModuleStar],
}

impl<'a> CollisionFrame<'a> {
    /// Creates a frame with no modules or pickups.
    #[must_use]
    pub const fn new(projectiles: &'a [Projectile], enemies: &'a [Enemy], ship: &'a Ship) -> Self {
        Self {
            projectiles,
            enemies,
            ship,
            modules: &[],
            powerups: &[],
            stars: &[],
        }
    }

    /// Sets the ship's modules.
    #[must_use]
    pub const fn with_modules(mut self, modules: &'a [Module]) -> Self {
        self.modules = modules;
        self
    }

    /// Sets the pickups.
    #[must_use]
    pub const fn with_pickups(mut self, powerups: &'a [PowerUp], stars: &'a [ModuleStar]) -> Self {
        self.powerups = powerups;
        self.stars = stars;
        self
    }

    /// Returns the shield state used for this call.
    #[inline]
    #[must_use]
    pub const fn shield_active(&self) -> bool {
        self.ship.shield_active
    }
}
