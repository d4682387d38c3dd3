//! # Kind Tags
//!
//! Closed enumerations replacing string type tags. The numeric codes are
//! part of the snapshot wire format and must never be reordered.

/// Faction/origin of a projectile. Determines which targets it can hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ProjectileKind {
    /// Fired by the player ship.
    Player = 0,
    /// Fired by a ship-attached module.
    Module = 1,
    /// Fired by a zombie-flagged enemy.
    Zombie = 2,
    /// Fired by a hostile enemy.
    Enemy = 3,
}

impl ProjectileKind {
    /// All kinds in code order.
    pub const ALL: [Self; 4] = [Self::Player, Self::Module, Self::Zombie, Self::Enemy];

    /// Returns the snapshot code for this kind.
    #[inline]
    #[must_use]
    pub fn code(self) -> f64 {
        f64::from(self as u8)
    }

    /// Decodes a snapshot code. Unknown codes yield `None`.
    #[must_use]
    pub fn from_code(code: f64) -> Option<Self> {
        // Truncation toward zero matches how the codes were always read
        match code as i32 {
            0 => Some(Self::Player),
            1 => Some(Self::Module),
            2 => Some(Self::Zombie),
            3 => Some(Self::Enemy),
            _ => None,
        }
    }

    /// Returns `true` for projectiles that attack enemies (offense pass).
    #[inline]
    #[must_use]
    pub const fn is_offensive(self) -> bool {
        match self {
            Self::Player | Self::Module | Self::Zombie => true,
            Self::Enemy => false,
        }
    }
}

/// Behavioral class of an enemy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EnemyKind {
    /// Drifting shooter.
    #[default]
    Basic = 0,
    /// Tracking shooter.
    Elite = 1,
    /// Charges the ship.
    Rammer = 2,
    /// Detonates on contact.
    Exploder = 3,
}

impl EnemyKind {
    /// Returns the snapshot code for this kind.
    #[inline]
    #[must_use]
    pub fn code(self) -> f64 {
        f64::from(self as u8)
    }

    /// Decodes a snapshot code. Unknown codes fall back to [`EnemyKind::Basic`].
    #[must_use]
    pub fn from_code(code: f64) -> Self {
        match code as i32 {
            1 => Self::Elite,
            2 => Self::Rammer,
            3 => Self::Exploder,
            _ => Self::Basic,
        }
    }

    /// Returns `true` for kinds that fire projectiles.
    #[inline]
    #[must_use]
    pub const fn shoots(self) -> bool {
        matches!(self, Self::Basic | Self::Elite)
    }
}
