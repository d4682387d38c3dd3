//! # Tick Stress Test
//!
//! Runs a seeded arena through the tick pipeline and reports timing and hit
//! statistics.
//!
//! ```text
//! tick_stress [--ticks N] [--seed S] [--enemies N] [--config PATH]
//! ```

use std::process::ExitCode;
use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use starward::collision::CollisionReport;
use starward::entity::{Enemy, EnemyKind, Module, PowerUp, Projectile, ProjectileKind, Ship, MAX_MODULES};
use starward::spatial::{
    aim_angle, module_targets, nearest_hostile, nearest_player_side_target, should_module_fire, ModuleTarget,
    SpatialIndex,
};
use starward::{EngineConfig, TickPipeline, World};

const ARENA_W: f64 = 1920.0;
const ARENA_H: f64 = 1080.0;
const TICK_RATE: u64 = 60;
const SHOT_SPEED: f64 = 6.0;
const MODULE_MIN_DIST: f64 = 40.0;

struct Options {
    ticks: u64,
    seed: u64,
    enemies: usize,
    config: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            ticks: 3_600,
            seed: 0x5747_4152,
            enemies: 150,
            config: None,
        }
    }
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options::default();
    let mut args = std::env::args().skip(1);

    while let Some(flag) = args.next() {
        let mut value = || args.next().ok_or_else(|| format!("{flag} needs a value"));
        match flag.as_str() {
            "--ticks" => options.ticks = value()?.parse().map_err(|e| format!("--ticks: {e}"))?,
            "--seed" => options.seed = value()?.parse().map_err(|e| format!("--seed: {e}"))?,
            "--enemies" => options.enemies = value()?.parse().map_err(|e| format!("--enemies: {e}"))?,
            "--config" => options.config = Some(value()?),
            other => return Err(format!("unknown argument {other}")),
        }
    }
    Ok(options)
}

#[derive(Default)]
struct Tally {
    min_tick_us: u128,
    max_tick_us: u128,
    total_tick_us: u128,
    projectile_hits: u64,
    enemy_kills: u64,
    ship_hits: u64,
    ship_damage: f64,
    pickups: u64,
    peak_projectiles: usize,
}

struct Arena {
    rng: ChaCha8Rng,
    ship: Ship,
    modules: Vec<Module>,
    enemies: Vec<Enemy>,
    projectiles: Vec<Projectile>,
    powerups: Vec<PowerUp>,
    target_enemies: usize,
}

impl Arena {
    fn new(seed: u64, target_enemies: usize) -> Self {
        let ship = Ship::new(ARENA_W / 2.0, ARENA_H / 2.0);
        let modules = (0..MAX_MODULES)
            .map(|i| {
                let angle = i as f64 / MAX_MODULES as f64 * std::f64::consts::TAU;
                Module::new(ship.x + angle.cos() * 45.0, ship.y + angle.sin() * 45.0)
            })
            .collect();
        let mut arena = Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            ship,
            modules,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            powerups: Vec::new(),
            target_enemies,
        };
        arena.respawn();
        arena
    }

    fn respawn(&mut self) {
        while self.enemies.len() < self.target_enemies {
            let kind = match self.rng.gen_range(0..4) {
                0 => EnemyKind::Basic,
                1 => EnemyKind::Elite,
                2 => EnemyKind::Rammer,
                _ => EnemyKind::Exploder,
            };
            let x = self.rng.gen_range(0.0..ARENA_W);
            let y = self.rng.gen_range(0.0..ARENA_H);
            let enemy = Enemy::new(kind, x, y, self.rng.gen_range(12.0..22.0), 30.0);
            self.enemies.push(if self.rng.gen_bool(0.15) { enemy.zombie() } else { enemy });
        }
        if self.powerups.len() < 4 && self.rng.gen_bool(0.02) {
            let x = self.rng.gen_range(0.0..ARENA_W);
            let y = self.rng.gen_range(0.0..ARENA_H);
            self.powerups.push(PowerUp::new(x, y));
        }
    }

    fn fire(&mut self, pipeline: &TickPipeline) {
        debug_assert_eq!(pipeline.grid().len(), self.enemies.len(), "grid out of date");
        let from = (self.ship.x, self.ship.y);

        // Player
        if self.rng.gen_bool(0.25) {
            let angle = self.rng.gen_range(0.0..std::f64::consts::TAU);
            self.projectiles.push(shot(from, angle, 3.0, 10.0, ProjectileKind::Player));
        }

        // Modules
        for (module, target) in self.modules.iter().zip(module_targets(&self.modules, &self.enemies)) {
            let ModuleTarget::Enemy(target) = target else {
                continue;
            };
            let (m, t) = ((module.x, module.y), (target.x, target.y));
            if should_module_fire(m, t, MODULE_MIN_DIST) && self.rng.gen_bool(0.05) {
                self.projectiles.push(shot(m, aim_angle(m, t), 2.0, 5.0, ProjectileKind::Module));
            }
        }

        // Enemies
        for i in 0..self.enemies.len() {
            let enemy = &self.enemies[i];
            if !enemy.kind.shoots() || !self.rng.gen_bool(0.01) {
                continue;
            }
            let at = (enemy.x, enemy.y);
            let aim = if enemy.is_zombie {
                nearest_hostile(pipeline.grid(), &self.enemies, i).map(|t| (t.x, t.y))
            } else {
                nearest_player_side_target(&self.ship, &self.modules, &self.enemies, at).map(|t| (t.x, t.y))
            };
            if let Some(to) = aim {
                let kind = if enemy.is_zombie {
                    ProjectileKind::Zombie
                } else {
                    ProjectileKind::Enemy
                };
                self.projectiles.push(shot(at, aim_angle(at, to), 3.0, 4.0, kind));
            }
        }
    }

    fn collide(&self, pipeline: &mut TickPipeline) -> CollisionReport {
        let world = World::new(&self.projectiles, &self.enemies, &self.ship)
            .with_modules(&self.modules)
            .with_pickups(&self.powerups, &[]);
        pipeline.step(&world).clone()
    }

    /// Applies damage and removals. Returns the number of enemies killed.
    fn apply(&mut self, report: &CollisionReport) -> u64 {
        for hit in &report.enemy_hits {
            if let Some(enemy) = self.enemies.get_mut(hit.enemy_index) {
                enemy.hp -= hit.damage;
            }
        }
        let mut consumed = vec![false; self.projectiles.len()];
        for &i in &report.projectile_hits {
            if let Some(flag) = consumed.get_mut(i) {
                *flag = true;
            }
        }
        let mut collected = vec![false; self.powerups.len()];
        for &i in &report.powerups_collected {
            if let Some(flag) = collected.get_mut(i) {
                *flag = true;
            }
        }
        remove_flagged(&mut self.projectiles, &consumed);
        remove_flagged(&mut self.powerups, &collected);

        let before = self.enemies.len();
        self.enemies.retain(|e| e.hp > 0.0);
        (before - self.enemies.len()) as u64
    }

    fn advance(&mut self) {
        for p in &mut self.projectiles {
            p.x += p.vx;
            p.y += p.vy;
        }
        self.projectiles
            .retain(|p| (0.0..=ARENA_W).contains(&p.x) && (0.0..=ARENA_H).contains(&p.y));
    }
}

fn shot(from: (f64, f64), angle: f64, radius: f64, damage: f64, kind: ProjectileKind) -> Projectile {
    Projectile::new(from.0, from.1, radius, damage, kind)
        .with_velocity(angle.cos() * SHOT_SPEED, angle.sin() * SHOT_SPEED)
}

/// Keeps the elements whose index is not flagged.
fn remove_flagged<T>(items: &mut Vec<T>, flagged: &[bool]) {
    let mut index = 0;
    items.retain(|_| {
        let keep = !flagged.get(index).copied().unwrap_or(false);
        index += 1;
        keep
    });
}

fn run(options: &Options) -> Result<(), String> {
    let config = match &options.config {
        Some(path) => EngineConfig::load(path).map_err(|e| e.to_string())?,
        None => EngineConfig::default(),
    };
    let mut pipeline = TickPipeline::new(&config).map_err(|e| e.to_string())?;
    let mut arena = Arena::new(options.seed, options.enemies);
    let mut tally = Tally {
        min_tick_us: u128::MAX,
        ..Tally::default()
    };

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         STARWARD - TICK STRESS TEST                              ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();
    println!("┌─ CONFIGURATION ─────────────────────────────────────────────────┐");
    println!("│ Ticks:              {}", options.ticks);
    println!("│ Seed:               {:#x}", options.seed);
    println!("│ Enemies:            {}", options.enemies);
    println!("│ Cell Size:          {}", config.grid.cell_size);
    println!("│ Collision Backend:  {}", pipeline.engine().active_backend());
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();

    let start = Instant::now();
    for _ in 0..options.ticks {
        arena.advance();
        tally.peak_projectiles = tally.peak_projectiles.max(arena.projectiles.len());

        let tick_start = Instant::now();
        let report = arena.collide(&mut pipeline);
        let tick_us = tick_start.elapsed().as_micros();

        tally.min_tick_us = tally.min_tick_us.min(tick_us);
        tally.max_tick_us = tally.max_tick_us.max(tick_us);
        tally.total_tick_us += tick_us;
        tally.projectile_hits += report.projectile_hits.len() as u64;
        tally.pickups += report.powerups_collected.len() as u64;
        if report.ship_hit {
            tally.ship_hits += 1;
            tally.ship_damage += report.ship_damage;
        }

        // The grid indexes the enemy list as stepped; aim before it changes.
        arena.fire(&pipeline);
        tally.enemy_kills += arena.apply(&report);
        arena.respawn();
    }
    let elapsed = start.elapsed();
    let stats = pipeline.stats();
    let avg_us = tally.total_tick_us / u128::from(options.ticks.max(1));
    let budget_us = 1_000_000 / u128::from(TICK_RATE);

    println!("┌─ TIMING ────────────────────────────────────────────────────────┐");
    println!("│ Real Time:          {:.2} seconds", elapsed.as_secs_f64());
    println!("│ Budget per Tick:    {budget_us} μs");
    println!("│ Min Step Time:      {} μs", if options.ticks == 0 { 0 } else { tally.min_tick_us });
    println!("│ Max Step Time:      {} μs", tally.max_tick_us);
    println!("│ Avg Step Time:      {avg_us} μs");
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();
    println!("┌─ COLLISIONS ────────────────────────────────────────────────────┐");
    println!("│ Peak Projectiles:   {}", tally.peak_projectiles);
    println!("│ Projectile Hits:    {}", tally.projectile_hits);
    println!("│ Enemy Kills:        {}", tally.enemy_kills);
    println!("│ Ship Hits:          {} ({:.1} damage)", tally.ship_hits, tally.ship_damage);
    println!("│ Pickups:            {}", tally.pickups);
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();
    println!("┌─ BACKENDS ──────────────────────────────────────────────────────┐");
    println!("│ Accelerated Calls:  {}", stats.collision.accelerated_calls);
    println!("│ Reference Calls:    {}", stats.collision.reference_calls);
    println!("│ Collision Fallbacks:{:>5}", stats.collision.fallbacks);
    println!("│ Sorted Rebuilds:    {}", stats.grid.accelerated_rebuilds);
    println!("│ Hash Rebuilds:      {}", stats.grid.reference_rebuilds);
    println!("│ Grid Fallbacks:     {}", stats.grid.fallbacks);
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();

    println!("╔══════════════════════════════════════════════════════════════════╗");
    if avg_us < budget_us {
        println!("║  ✓ WITHIN BUDGET                                                ║");
    } else {
        println!("║  ✗ OVER BUDGET                                                  ║");
    }
    println!("╚══════════════════════════════════════════════════════════════════╝");
    Ok(())
}

fn main() -> ExitCode {
    let options = match parse_args() {
        Ok(options) => options,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("usage: tick_stress [--ticks N] [--seed S] [--enemies N] [--config PATH]");
            return ExitCode::from(2);
        }
    };

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}
