//! # Entity Records
//!
//! Plain data for every entity class the engine sees.

use super::kind::{EnemyKind, ProjectileKind};

/// Maximum number of modules attached to one ship.
pub const MAX_MODULES: usize = 6;

/// Default ship collision radius.
const SHIP_RADIUS: f64 = 25.0;
/// Default module collision radius.
const MODULE_RADIUS: f64 = 12.0;
/// Default power-up pickup radius.
const POWERUP_RADIUS: f64 = 10.0;
/// Default module star pickup radius.
const MODULE_STAR_RADIUS: f64 = 12.0;

/// A collision circle in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Circle {
    /// Center X.
    pub x: f64,
    /// Center Y.
    pub y: f64,
    /// Radius.
    pub radius: f64,
}

impl Circle {
    /// Creates a new circle.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, radius: f64) -> Self {
        Self { x, y, radius }
    }
}

/// Anything with a collision circle.
pub trait Body {
    /// Returns the collision circle.
    fn circle(&self) -> Circle;

    /// Returns the center position.
    #[inline]
    fn position(&self) -> (f64, f64) {
        let c = self.circle();
        (c.x, c.y)
    }
}

/// A projectile in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projectile {
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
    /// X velocity.
    pub vx: f64,
    /// Y velocity.
    pub vy: f64,
    /// Collision radius.
    pub radius: f64,
    /// Damage applied on hit.
    pub damage: f64,
    /// Who fired it.
    pub kind: ProjectileKind,
}

impl Projectile {
    /// Creates a stationary projectile.
    #[must_use]
    pub const fn new(x: f64, y: f64, radius: f64, damage: f64, kind: ProjectileKind) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            radius,
            damage,
            kind,
        }
    }

    /// Sets the velocity.
    #[must_use]
    pub const fn with_velocity(mut self, vx: f64, vy: f64) -> Self {
        self.vx = vx;
        self.vy = vy;
        self
    }
}

impl Body for Projectile {
    #[inline]
    fn circle(&self) -> Circle {
        Circle::new(self.x, self.y, self.radius)
    }
}

/// Per-enemy AI state carried through the full snapshot schema.
///
/// The engine never interprets these values; it only encodes and decodes
/// them so an external AI step sees exactly what it wrote.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyBehavior {
    /// Frames until the next shot.
    pub shoot_cooldown: f64,
    /// Heading in radians.
    pub angle: f64,
    /// Remaining frames of post-bounce speed boost.
    pub bounce_boost_frames: f64,
    /// Frames until contact damage may apply again.
    pub hit_cooldown: f64,
    /// Frames until the next charge may start.
    pub charge_cooldown: f64,
    /// Remaining frames of the current charge.
    pub charge_frames: f64,
    /// Aggression multiplier.
    pub aggression: f64,
    /// Pulse animation phase.
    pub pulse_phase: f64,
    /// Frames left before a zombie expires.
    pub zombie_lifetime: f64,
    /// Stealth shimmer phase.
    pub stealth_wave_phase: f64,
    /// How many times this enemy has split.
    pub split_level: f64,
}

impl Default for EnemyBehavior {
    fn default() -> Self {
        Self {
            shoot_cooldown: 0.0,
            angle: 0.0,
            bounce_boost_frames: 0.0,
            hit_cooldown: 0.0,
            charge_cooldown: 0.0,
            charge_frames: 0.0,
            aggression: 1.0,
            pulse_phase: 0.0,
            zombie_lifetime: 0.0,
            stealth_wave_phase: 0.0,
            split_level: 0.0,
        }
    }
}

/// An enemy ship.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Enemy {
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
    /// X velocity.
    pub vx: f64,
    /// Y velocity.
    pub vy: f64,
    /// Behavioral class.
    pub kind: EnemyKind,
    /// Has switched sides and now hunts its former allies.
    pub is_zombie: bool,
    /// Cloaked.
    pub is_stealth: bool,
    /// Collision radius.
    pub radius: f64,
    /// Current hit points.
    pub hp: f64,
    /// Maximum hit points.
    pub max_hp: f64,
    /// AI state scalars.
    pub behavior: EnemyBehavior,
}

impl Enemy {
    /// Creates a full-health, hostile enemy.
    #[must_use]
    pub fn new(kind: EnemyKind, x: f64, y: f64, radius: f64, hp: f64) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            kind,
            is_zombie: false,
            is_stealth: false,
            radius,
            hp,
            max_hp: hp,
            behavior: EnemyBehavior::default(),
        }
    }

    /// Flips the enemy to the zombie faction.
    #[must_use]
    pub const fn zombie(mut self) -> Self {
        self.is_zombie = true;
        self
    }

    /// Sets the velocity.
    #[must_use]
    pub const fn with_velocity(mut self, vx: f64, vy: f64) -> Self {
        self.vx = vx;
        self.vy = vy;
        self
    }
}

impl Body for Enemy {
    #[inline]
    fn circle(&self) -> Circle {
        Circle::new(self.x, self.y, self.radius)
    }
}

/// The player ship. There is exactly one per simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ship {
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
    /// Collision radius.
    pub radius: f64,
    /// Shield absorbs projectile damage while active.
    pub shield_active: bool,
}

impl Ship {
    /// Creates an unshielded ship with the default radius.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            radius: SHIP_RADIUS,
            shield_active: false,
        }
    }

    /// Sets the shield state.
    #[must_use]
    pub const fn with_shield(mut self, active: bool) -> Self {
        self.shield_active = active;
        self
    }
}

impl Body for Ship {
    #[inline]
    fn circle(&self) -> Circle {
        Circle::new(self.x, self.y, self.radius)
    }
}

macro_rules! circle_entity {
    ($(#[$doc:meta])* $name:ident, $radius:expr) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq)]
        pub struct $name {
            /// X position.
            pub x: f64,
            /// Y position.
            pub y: f64,
            /// Collision radius.
            pub radius: f64,
        }

        impl $name {
            /// Creates one with the default radius.
            #[must_use]
            pub const fn new(x: f64, y: f64) -> Self {
                Self { x, y, radius: $radius }
            }

            /// Overrides the radius.
            #[must_use]
            pub const fn with_radius(mut self, radius: f64) -> Self {
                self.radius = radius;
                self
            }
        }

        impl Body for $name {
            #[inline]
            fn circle(&self) -> Circle {
                Circle::new(self.x, self.y, self.radius)
            }
        }
    };
}

circle_entity!(
    /// A ship-attached module. Independently targetable by enemy fire.
    Module,
    MODULE_RADIUS
);

circle_entity!(
    /// A power-up pickup.
    PowerUp,
    POWERUP_RADIUS
);

circle_entity!(
    /// A module star pickup (grants a new module).
    ModuleStar,
    MODULE_STAR_RADIUS
);
