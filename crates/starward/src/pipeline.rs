//! # Tick Pipeline
//!
//! Owns the grid and the collision engine. One [`TickPipeline::step`] per
//! simulation tick: grid first, then collision.

use starward_collision::{CollisionEngine, CollisionFrame, CollisionReport, EngineStats};
use starward_core::{Enemy, Module, ModuleStar, PowerUp, Projectile, Ship};
use starward_spatial::{EnemyGrid, GridStats};

use crate::config::{ConfigError, EngineConfig};

/// The entity collections for one tick, borrowed from the game loop.
#[derive(Clone, Copy, Debug)]
pub struct World<'a> {
    /// Projectiles in flight.
    pub projectiles: &'a [Projectile],
    /// Live enemies.
    pub enemies: &'a [Enemy],
    /// The player ship.
    pub ship: &'a Ship,
    /// Ship modules.
    pub modules: &'a [Module],
    /// Power-ups on the field.
    pub powerups: &'a [PowerUp],
    /// Module stars on the field.
    pub stars: &'a [ModuleStar],
}

impl<'a> World<'a> {
    /// Creates a world with no modules or pickups.
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

    /// Collision view of this world.
    #[must_use]
    pub const fn frame(&self) -> CollisionFrame<'a> {
        CollisionFrame {
            projectiles: self.projectiles,
            enemies: self.enemies,
            ship: self.ship,
            modules: self.modules,
            powerups: self.powerups,
            stars: self.stars,
        }
    }
}

/// Counters across both subsystems.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Completed ticks.
    pub ticks: u64,
    /// Collision engine counters.
    pub collision: EngineStats,
    /// Grid counters.
    pub grid: GridStats,
}

/// Grid rebuild plus collision, once per tick.
#[derive(Debug)]
pub struct TickPipeline {
    engine: CollisionEngine,
    grid: EnemyGrid,
    ticks: u64,
}

impl TickPipeline {
    /// Builds the grid and the collision engine from a configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] if the configuration fails validation.
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let grid = EnemyGrid::new(config.grid.cell_size, config.grid.accelerated)
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        let engine = if config.collision.accelerated {
            CollisionEngine::new(&config.collision.capacities)
        } else {
            CollisionEngine::reference_only()
        };

        tracing::info!(
            collision = engine.active_backend(),
            cell_size = config.grid.cell_size,
            "tick pipeline ready"
        );
        Ok(Self { engine, grid, ticks: 0 })
    }

    /// Runs one tick: rebuilds the grid from current enemy positions, then
    /// detects collisions.
    ///
    /// The report is valid until the next call.
    pub fn step(&mut self, world: &World<'_>) -> &CollisionReport {
        if let Err(err) = self.grid.rebuild_from(world.enemies) {
            // Queries this tick see the previous layout.
            tracing::warn!(error = %err, "grid rebuild failed");
        }
        self.ticks += 1;
        self.engine.detect(&world.frame())
    }

    /// The grid as rebuilt by the latest [`step`](Self::step).
    #[inline]
    #[must_use]
    pub const fn grid(&self) -> &EnemyGrid {
        &self.grid
    }

    /// The latest collision report.
    #[inline]
    #[must_use]
    pub const fn report(&self) -> &CollisionReport {
        self.engine.report()
    }

    /// The collision engine.
    #[inline]
    #[must_use]
    pub const fn engine(&self) -> &CollisionEngine {
        &self.engine
    }

    /// Completed ticks.
    #[inline]
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Counters across both subsystems.
    #[must_use]
    pub fn stats(&self) -> PipelineStats {
        PipelineStats {
            ticks: self.ticks,
            collision: self.engine.stats(),
            grid: self.grid.stats(),
        }
    }
}
