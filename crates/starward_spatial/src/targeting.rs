//! # AI Targeting Queries
//!
//! Nearest-target lookups used by enemy and module AI. All distances are
//! compared squared with strict `<`, so the first candidate at a given
//! distance wins.
//!
//! Indices returned by a grid built earlier in the tick may point past the
//! current collection; those are skipped.

use starward_core::{distance_squared, Enemy, Module, Ship};

use crate::grid::SpatialIndex;

/// A chosen enemy and its position at selection time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Target {
    /// Index into the enemy collection.
    pub index: usize,
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
}

impl Target {
    fn of(index: usize, enemy: &Enemy) -> Self {
        Self {
            index,
            x: enemy.x,
            y: enemy.y,
        }
    }
}

/// Which player-side entity a hostile shooter should aim at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerSide {
    /// The ship.
    Ship,
    /// A module, by index.
    Module(usize),
    /// A zombie enemy, by index.
    Zombie(usize),
}

/// Result of [`nearest_player_side_target`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSideTarget {
    /// The chosen entity.
    pub which: PlayerSide,
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
}

/// Per-module aim.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ModuleTarget {
    /// No eligible enemy.
    #[default]
    None,
    /// Nearest non-zombie enemy.
    Enemy(Target),
}

impl ModuleTarget {
    /// Returns the target, if any.
    #[must_use]
    pub const fn target(&self) -> Option<Target> {
        match self {
            Self::None => None,
            Self::Enemy(target) => Some(*target),
        }
    }
}

/// Tracks the closest candidate seen so far.
struct Nearest<T> {
    best: Option<T>,
    best_d2: f64,
}

impl<T> Nearest<T> {
    const fn new() -> Self {
        Self {
            best: None,
            best_d2: f64::INFINITY,
        }
    }

    #[inline]
    fn offer(&mut self, d2: f64, candidate: impl FnOnce() -> T) {
        if d2 < self.best_d2 {
            self.best_d2 = d2;
            self.best = Some(candidate());
        }
    }
}

/// Nearest non-zombie enemy to enemy `seeker`, excluding the seeker.
///
/// Grid candidates are tried first. When they yield nothing eligible, the
/// whole collection is scanned, so an empty neighborhood never reads as
/// "no target". Returns `None` if `seeker` is out of range or no other
/// hostile enemy exists.
#[must_use]
pub fn nearest_hostile<I>(grid: &I, enemies: &[Enemy], seeker: usize) -> Option<Target>
where
    I: SpatialIndex + ?Sized,
{
    let me = enemies.get(seeker)?;
    let eligible = |&(i, e): &(usize, &Enemy)| i != seeker && !e.is_zombie;

    let mut candidates = Vec::new();
    grid.query_into(me.x, me.y, &mut candidates);

    let mut nearest = Nearest::new();
    let from_grid = candidates
        .into_iter()
        .filter_map(|i| enemies.get(i).map(|e| (i, e)))
        .filter(eligible);
    for (i, e) in from_grid {
        nearest.offer(distance_squared(me.x, me.y, e.x, e.y), || Target::of(i, e));
    }

    if nearest.best.is_none() {
        for (i, e) in enemies.iter().enumerate().filter(eligible) {
            nearest.offer(distance_squared(me.x, me.y, e.x, e.y), || Target::of(i, e));
        }
    }
    nearest.best
}

/// Nearest player-side entity to a hostile shooter at `from`.
///
/// Ship first, then modules in order, then zombie enemies in order; a later
/// candidate must be strictly closer to replace an earlier one.
#[must_use]
pub fn nearest_player_side_target(
    ship: &Ship,
    modules: &[Module],
    enemies: &[Enemy],
    from: (f64, f64),
) -> Option<PlayerSideTarget> {
    let (fx, fy) = from;
    let mut nearest = Nearest::new();

    nearest.offer(distance_squared(fx, fy, ship.x, ship.y), || PlayerSideTarget {
        which: PlayerSide::Ship,
        x: ship.x,
        y: ship.y,
    });
    for (i, m) in modules.iter().enumerate() {
        nearest.offer(distance_squared(fx, fy, m.x, m.y), || PlayerSideTarget {
            which: PlayerSide::Module(i),
            x: m.x,
            y: m.y,
        });
    }
    for (i, e) in enemies.iter().enumerate().filter(|(_, e)| e.is_zombie) {
        nearest.offer(distance_squared(fx, fy, e.x, e.y), || PlayerSideTarget {
            which: PlayerSide::Zombie(i),
            x: e.x,
            y: e.y,
        });
    }
    nearest.best
}

/// Nearest non-zombie enemy for each module, by linear scan.
#[must_use]
pub fn module_targets(modules: &[Module], enemies: &[Enemy]) -> Vec<ModuleTarget> {
    modules
        .iter()
        .map(|m| {
            let mut nearest = Nearest::new();
            for (i, e) in enemies.iter().enumerate().filter(|(_, e)| !e.is_zombie) {
                nearest.offer(distance_squared(m.x, m.y, e.x, e.y), || Target::of(i, e));
            }
            nearest.best.map_or(ModuleTarget::None, ModuleTarget::Enemy)
        })
        .collect()
}

/// Heading from `from` to `to` in radians.
#[inline]
#[must_use]
pub fn aim_angle(from: (f64, f64), to: (f64, f64)) -> f64 {
    (to.1 - from.1).atan2(to.0 - from.0)
}

/// A module fires only at targets farther than `min_dist`.
#[inline]
#[must_use]
pub fn should_module_fire(module: (f64, f64), target: (f64, f64), min_dist: f64) -> bool {
    (target.0 - module.0).hypot(target.1 - module.1) > min_dist
}
