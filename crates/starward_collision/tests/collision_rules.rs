//! # Collision Rule Tests
//!
//! Hit rules, run through both backends.

use starward_collision::{
    CollisionBackend, CollisionFrame, CollisionReport, EnemyHit, ReferenceBackend, SharedBufferBackend,
};
use starward_core::{ChannelCapacities, Enemy, EnemyKind, Module, ModuleStar, PowerUp, Projectile, ProjectileKind, Ship};

/// Runs a frame through both backends and asserts identical results.
fn detect_both(frame: &CollisionFrame<'_>) -> CollisionReport {
    let mut reference = CollisionReport::new();
    ReferenceBackend::new().detect(frame, &mut reference).unwrap();

    let mut shared = CollisionReport::new();
    SharedBufferBackend::new(&ChannelCapacities::default())
        .unwrap()
        .detect(frame, &mut shared)
        .unwrap();

    assert_eq!(reference, shared, "backends disagree");
    reference
}

fn far_ship() -> Ship {
    Ship::new(5000.0, 5000.0)
}

#[test]
fn test_player_shot_hits_enemy() {
    let shots = [Projectile::new(100.0, 100.0, 2.0, 10.0, ProjectileKind::Player)];
    let enemies = [Enemy::new(EnemyKind::Basic, 105.0, 100.0, 4.0, 20.0)];
    let ship = far_ship();

    let report = detect_both(&CollisionFrame::new(&shots, &enemies, &ship));
    assert_eq!(report.projectile_hits, vec![0]);
    assert_eq!(report.enemy_hits, vec![EnemyHit { enemy_index: 0, damage: 10.0 }]);
    assert!(!report.ship_hit);
    assert!(report.powerups_collected.is_empty());
    assert!(report.stars_collected.is_empty());
}

#[test]
fn test_tangent_circles_do_not_collide() {
    // Distance 6 equals radius sum 2 + 4.
    let shots = [Projectile::new(100.0, 100.0, 2.0, 10.0, ProjectileKind::Player)];
    let enemies = [Enemy::new(EnemyKind::Basic, 106.0, 100.0, 4.0, 20.0)];
    let ship = far_ship();

    let report = detect_both(&CollisionFrame::new(&shots, &enemies, &ship));
    assert!(report.is_empty());
}

#[test]
fn test_zombie_shot_never_hits_zombie() {
    let shots = [Projectile::new(50.0, 50.0, 3.0, 5.0, ProjectileKind::Zombie)];
    let enemies = [Enemy::new(EnemyKind::Elite, 50.0, 50.0, 10.0, 20.0).zombie()];
    let ship = far_ship();

    let report = detect_both(&CollisionFrame::new(&shots, &enemies, &ship));
    assert!(report.projectile_hits.is_empty());
    assert!(report.enemy_hits.is_empty());
}

#[test]
fn test_zombie_shot_skips_to_hostile_enemy() {
    let shots = [Projectile::new(50.0, 50.0, 3.0, 5.0, ProjectileKind::Zombie)];
    let enemies = [
        Enemy::new(EnemyKind::Elite, 50.0, 50.0, 10.0, 20.0).zombie(),
        Enemy::new(EnemyKind::Basic, 52.0, 50.0, 10.0, 20.0),
    ];
    let ship = far_ship();

    let report = detect_both(&CollisionFrame::new(&shots, &enemies, &ship));
    assert_eq!(report.enemy_hits, vec![EnemyHit { enemy_index: 1, damage: 5.0 }]);
}

#[test]
fn test_player_shot_hits_zombie_enemy() {
    let shots = [Projectile::new(50.0, 50.0, 3.0, 5.0, ProjectileKind::Player)];
    let enemies = [Enemy::new(EnemyKind::Exploder, 50.0, 50.0, 10.0, 20.0).zombie()];
    let ship = far_ship();

    let report = detect_both(&CollisionFrame::new(&shots, &enemies, &ship));
    assert_eq!(report.enemy_hits, vec![EnemyHit { enemy_index: 0, damage: 5.0 }]);
}

#[test]
fn test_shield_consumes_without_damage() {
    let ship = Ship::new(300.0, 300.0).with_shield(true);
    let shots = [Projectile::new(300.0, 300.0, 3.0, 15.0, ProjectileKind::Enemy)];

    let report = detect_both(&CollisionFrame::new(&shots, &[], &ship));
    assert_eq!(report.projectile_hits, vec![0]);
    assert!(!report.ship_hit);
    assert!(report.ship_damage.abs() < f64::EPSILON);
}

#[test]
fn test_unshielded_damage_accumulates() {
    let ship = Ship::new(300.0, 300.0);
    let shots = [
        Projectile::new(300.0, 300.0, 3.0, 15.0, ProjectileKind::Enemy),
        Projectile::new(310.0, 300.0, 3.0, 5.0, ProjectileKind::Enemy),
        Projectile::new(900.0, 300.0, 3.0, 50.0, ProjectileKind::Enemy),
    ];

    let report = detect_both(&CollisionFrame::new(&shots, &[], &ship));
    assert_eq!(report.projectile_hits, vec![0, 1]);
    assert!(report.ship_hit);
    assert!((report.ship_damage - 20.0).abs() < f64::EPSILON);
}

#[test]
fn test_enemy_shot_hits_zombie_with_damage_pair() {
    let ship = far_ship();
    let shots = [Projectile::new(200.0, 200.0, 3.0, 8.0, ProjectileKind::Enemy)];
    let enemies = [
        Enemy::new(EnemyKind::Basic, 200.0, 200.0, 10.0, 20.0),
        Enemy::new(EnemyKind::Rammer, 201.0, 200.0, 10.0, 20.0).zombie(),
    ];

    let report = detect_both(&CollisionFrame::new(&shots, &enemies, &ship));
    assert_eq!(report.projectile_hits, vec![0]);
    assert_eq!(report.enemy_hits, vec![EnemyHit { enemy_index: 1, damage: 8.0 }]);
}

#[test]
fn test_offense_resolves_before_defense() {
    // A player shot overlapping the ship is never tested against it.
    let ship = Ship::new(0.0, 0.0);
    let shots = [
        Projectile::new(0.0, 0.0, 3.0, 8.0, ProjectileKind::Player),
        Projectile::new(0.0, 0.0, 3.0, 4.0, ProjectileKind::Enemy),
    ];
    let enemies = [Enemy::new(EnemyKind::Basic, 0.0, 0.0, 10.0, 20.0).zombie()];

    let report = detect_both(&CollisionFrame::new(&shots, &enemies, &ship));
    assert_eq!(report.projectile_hits, vec![0, 1]);
    assert_eq!(report.enemy_hits, vec![EnemyHit { enemy_index: 0, damage: 8.0 }]);
    assert!(report.ship_hit);
    assert!((report.ship_damage - 4.0).abs() < f64::EPSILON);
}

#[test]
fn test_pickups_all_collected() {
    let ship = Ship::new(100.0, 100.0);
    let powerups = [
        PowerUp::new(100.0, 100.0),
        PowerUp::new(900.0, 900.0),
        PowerUp::new(110.0, 100.0),
    ];
    let stars = [ModuleStar::new(90.0, 100.0), ModuleStar::new(100.0, 90.0)];

    let frame = CollisionFrame::new(&[], &[], &ship).with_pickups(&powerups, &stars);
    let report = detect_both(&frame);
    assert_eq!(report.powerups_collected, vec![0, 2]);
    assert_eq!(report.stars_collected, vec![0, 1]);
    assert!(report.projectile_hits.is_empty());
}

#[test]
fn test_module_blocks_enemy_shot() {
    let ship = far_ship();
    let modules = [Module::new(0.0, 0.0), Module::new(400.0, 0.0)];
    let shots = [Projectile::new(405.0, 0.0, 3.0, 8.0, ProjectileKind::Enemy)];

    let frame = CollisionFrame::new(&shots, &[], &ship).with_modules(&modules);
    let report = detect_both(&frame);
    assert_eq!(report.projectile_hits, vec![0]);
    assert!(report.enemy_hits.is_empty());
    assert!(!report.ship_hit);
}

#[test]
fn test_empty_frame() {
    let ship = far_ship();
    let report = detect_both(&CollisionFrame::new(&[], &[], &ship));
    assert!(report.is_empty());
}
