//! # Shared Buffer Round-Trip Tests
//!
//! Writes, grows, rewrites and reads back through the channel the way the
//! accelerated backend does every tick.

use starward_core::{
    encode_into, BufferCategory, ChannelCapacities, CircleRecord, Enemy, EnemyHitboxRecord,
    EnemyKind, PowerUp, Projectile, ProjectileHitRecord, ProjectileKind, SharedBufferChannel,
};

fn small_channel() -> SharedBufferChannel {
    let caps = ChannelCapacities {
        projectiles: 4,
        enemies: 4,
        modules: 2,
        powerups: 2,
        stars: 2,
        ..ChannelCapacities::default()
    };
    SharedBufferChannel::new(&caps).unwrap()
}

fn projectile(i: usize) -> Projectile {
    let f = i as f64;
    Projectile::new(f, f * 2.0, 1.0 + f, 10.0 * f, ProjectileKind::ALL[i % 4])
}

/// Test: N records, grow to N+K, rewrite N+K, read back exactly.
#[test]
fn test_capacity_growth_roundtrip() {
    let mut channel = small_channel();
    let n = 4;
    let k = 37;

    let first: Vec<Projectile> = (0..n).map(projectile).collect();
    channel.ensure_capacity(BufferCategory::Projectiles, n).unwrap();
    let address = channel.address(BufferCategory::Projectiles);
    encode_into(&first, channel.projectiles_mut().records_mut(n).unwrap()).unwrap();

    let grew = channel.ensure_capacity(BufferCategory::Projectiles, n + k).unwrap();
    assert!(grew);
    assert!(!channel.is_current(BufferCategory::Projectiles, address));

    // Growth keeps what was written
    let kept = channel.projectiles().records(n).unwrap();
    for (i, rec) in kept.iter().enumerate() {
        assert_eq!(rec.x, first[i].x);
        assert_eq!(rec.damage, first[i].damage);
    }

    let second: Vec<Projectile> = (0..n + k).map(projectile).collect();
    encode_into(&second, channel.projectiles_mut().records_mut(n + k).unwrap()).unwrap();

    let read: &[ProjectileHitRecord] = channel.projectiles().records(n + k).unwrap();
    assert_eq!(read.len(), n + k);
    for (i, rec) in read.iter().enumerate() {
        let p = &second[i];
        assert_eq!(rec.x, p.x);
        assert_eq!(rec.y, p.y);
        assert_eq!(rec.radius, p.radius);
        assert_eq!(rec.damage, p.damage);
        assert_eq!(rec.kind, p.kind.code());
    }

    let words = channel.projectiles().words(n + k).unwrap();
    assert_eq!(words.len(), (n + k) * BufferCategory::Projectiles.stride());
}

/// Test: every growable category survives a grow/rewrite cycle.
#[test]
fn test_all_categories_grow() {
    let mut channel = small_channel();

    let enemies: Vec<Enemy> = (0..20)
        .map(|i| Enemy::new(EnemyKind::Basic, i as f64, 0.0, 10.0, 5.0))
        .collect();
    channel.ensure_capacity(BufferCategory::Enemies, enemies.len()).unwrap();
    encode_into(&enemies, channel.enemies_mut().records_mut(enemies.len()).unwrap()).unwrap();
    let recs: &[EnemyHitboxRecord] = channel.enemies().records(enemies.len()).unwrap();
    assert_eq!(recs[19].x, 19.0);

    let pickups: Vec<PowerUp> = (0..9).map(|i| PowerUp::new(0.0, i as f64)).collect();
    channel.ensure_capacity(BufferCategory::PowerUps, pickups.len()).unwrap();
    encode_into(&pickups, channel.powerups_mut().records_mut(pickups.len()).unwrap()).unwrap();
    let recs: &[CircleRecord] = channel.powerups().records(pickups.len()).unwrap();
    assert_eq!(recs[8].y, 8.0);
    assert_eq!(recs[8].radius, 10.0);

    for category in BufferCategory::ALL {
        if category != BufferCategory::Ship {
            let before = channel.capacity(category);
            channel.ensure_capacity(category, before + 1).unwrap();
            assert!(channel.capacity(category) > before);
        }
    }
}

/// Test: a view taken before growth is simply re-fetched afterwards.
#[test]
fn test_refetch_after_growth() {
    let mut channel = small_channel();
    channel.stars_mut().records_mut(1).unwrap()[0] = CircleRecord { x: 3.0, y: 4.0, radius: 12.0 };
    let generation = channel.stars().generation();

    channel.ensure_capacity(BufferCategory::Stars, 1000).unwrap();
    assert_eq!(channel.stars().generation(), generation + 1);
    assert_eq!(channel.stars().records(1).unwrap()[0].x, 3.0);
}
