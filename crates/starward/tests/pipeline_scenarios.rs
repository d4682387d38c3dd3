//! # Pipeline Scenarios
//!
//! End-to-end ticks through `TickPipeline` with configuration loaded the
//! way the game loads it.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use starward::collision::EnemyHit;
use starward::entity::{Enemy, EnemyKind, Module, ModuleStar, PowerUp, Projectile, ProjectileKind, Ship};
use starward::spatial::{nearest_hostile, SpatialIndex};
use starward::{EngineConfig, TickPipeline, World};

fn pipeline(accelerated: bool) -> TickPipeline {
    let text = format!(
        "[grid]\naccelerated = {accelerated}\n\n[collision]\naccelerated = {accelerated}\n\n[collision.capacities]\nprojectiles = 4\nenemies = 4\n"
    );
    TickPipeline::new(&EngineConfig::from_toml_str(&text).unwrap()).unwrap()
}

#[test]
fn test_player_hit_scenario() {
    for accelerated in [true, false] {
        let mut pipeline = pipeline(accelerated);
        let shots = [Projectile::new(100.0, 100.0, 2.0, 10.0, ProjectileKind::Player)];
        let enemies = [Enemy::new(EnemyKind::Basic, 105.0, 100.0, 4.0, 20.0)];
        let ship = Ship::new(800.0, 800.0);

        let report = pipeline.step(&World::new(&shots, &enemies, &ship));
        assert_eq!(report.projectile_hits, vec![0]);
        assert_eq!(report.enemy_hits, vec![EnemyHit { enemy_index: 0, damage: 10.0 }]);
        assert!(!report.ship_hit);
        assert!(report.powerups_collected.is_empty());
        assert!(report.stars_collected.is_empty());
    }
}

#[test]
fn test_shielded_ship_scenario() {
    for accelerated in [true, false] {
        let mut pipeline = pipeline(accelerated);
        let ship = Ship::new(400.0, 300.0).with_shield(true);
        let shots = [Projectile::new(400.0, 300.0, 3.0, 12.0, ProjectileKind::Enemy)];

        let report = pipeline.step(&World::new(&shots, &[], &ship));
        assert_eq!(report.projectile_hits, vec![0]);
        assert!(!report.ship_hit);
        assert!(report.ship_damage.abs() < f64::EPSILON);
    }
}

#[test]
fn test_full_world_tick() {
    let mut pipeline = pipeline(true);
    let ship = Ship::new(500.0, 500.0);
    let modules = [Module::new(540.0, 500.0)];
    let powerups = [PowerUp::new(505.0, 500.0)];
    let stars = [ModuleStar::new(900.0, 900.0), ModuleStar::new(495.0, 500.0)];
    let enemies = [
        Enemy::new(EnemyKind::Elite, 200.0, 200.0, 15.0, 40.0),
        Enemy::new(EnemyKind::Rammer, 210.0, 200.0, 15.0, 40.0).zombie(),
    ];
    let shots = [
        Projectile::new(540.0, 502.0, 3.0, 6.0, ProjectileKind::Enemy),
        Projectile::new(205.0, 200.0, 3.0, 9.0, ProjectileKind::Zombie),
        Projectile::new(1200.0, 900.0, 3.0, 9.0, ProjectileKind::Player),
    ];

    let world = World::new(&shots, &enemies, &ship)
        .with_modules(&modules)
        .with_pickups(&powerups, &stars);
    let report = pipeline.step(&world).clone();

    assert_eq!(report.projectile_hits, vec![1, 0]);
    assert_eq!(report.enemy_hits, vec![EnemyHit { enemy_index: 0, damage: 9.0 }]);
    assert!(!report.ship_hit);
    assert_eq!(report.powerups_collected, vec![0]);
    assert_eq!(report.stars_collected, vec![1]);

    // Grid from this tick serves zombie AI.
    let target = nearest_hostile(pipeline.grid(), &enemies, 1).unwrap();
    assert_eq!(target.index, 0);
    assert_eq!(pipeline.grid().len(), 2);
}

#[test]
fn test_long_run_is_deterministic_and_never_falls_back() {
    let run = || {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut pipeline = pipeline(true);
        let ship = Ship::new(500.0, 500.0);
        let mut hits = Vec::new();

        for _ in 0..120 {
            let enemies: Vec<Enemy> = (0..rng.gen_range(0..80))
                .map(|_| {
                    Enemy::new(
                        EnemyKind::Basic,
                        rng.gen_range(0.0..1000.0),
                        rng.gen_range(0.0..1000.0),
                        12.0,
                        20.0,
                    )
                })
                .collect();
            let shots: Vec<Projectile> = (0..rng.gen_range(0..200))
                .map(|_| {
                    Projectile::new(
                        rng.gen_range(0.0..1000.0),
                        rng.gen_range(0.0..1000.0),
                        3.0,
                        5.0,
                        ProjectileKind::ALL[rng.gen_range(0..4)],
                    )
                })
                .collect();
            hits.push(pipeline.step(&World::new(&shots, &enemies, &ship)).clone());
        }

        let stats = pipeline.stats();
        assert_eq!(stats.ticks, 120);
        assert_eq!(stats.collision.fallbacks, 0);
        assert_eq!(stats.grid.fallbacks, 0);
        hits
    };

    assert_eq!(run(), run());
}
