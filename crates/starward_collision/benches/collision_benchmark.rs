//! # Collision Benchmark
//!
//! Reference scan versus shared-buffer kernel on a seeded arena.

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use starward_collision::{CollisionEngine, CollisionFrame};
use starward_core::{ChannelCapacities, Enemy, EnemyKind, Projectile, ProjectileKind, Ship};

fn arena(projectiles: usize, enemies: usize) -> (Vec<Projectile>, Vec<Enemy>) {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let shots = (0..projectiles)
        .map(|_| {
            Projectile::new(
                rng.gen_range(0.0..1920.0),
                rng.gen_range(0.0..1080.0),
                3.0,
                10.0,
                ProjectileKind::ALL[rng.gen_range(0..4)],
            )
        })
        .collect();
    let foes = (0..enemies)
        .map(|_| {
            Enemy::new(
                EnemyKind::Basic,
                rng.gen_range(0.0..1920.0),
                rng.gen_range(0.0..1080.0),
                15.0,
                20.0,
            )
        })
        .collect();
    (shots, foes)
}

fn bench_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group("collision_detect");
    let ship = Ship::new(960.0, 540.0);

    for (projectiles, enemies) in [(200, 50), (1_000, 200), (4_000, 500)] {
        let (shots, foes) = arena(projectiles, enemies);
        let frame = CollisionFrame::new(&shots, &foes, &ship);

        let mut shared = CollisionEngine::new(&ChannelCapacities::default());
        group.bench_with_input(BenchmarkId::new("shared_buffer", projectiles), &frame, |b, frame| {
            b.iter(|| black_box(shared.detect(black_box(frame)).projectile_hits.len()));
        });

        let mut reference = CollisionEngine::reference_only();
        group.bench_with_input(BenchmarkId::new("reference", projectiles), &frame, |b, frame| {
            b.iter(|| black_box(reference.detect(black_box(frame)).projectile_hits.len()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_backends);
criterion_main!(benches);
