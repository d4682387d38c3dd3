//! Reference backend: direct scans over the typed collections.

use starward_core::{circles_overlap, Body, ProjectileKind};

use super::CollisionBackend;
use crate::error::BackendError;
use crate::frame::CollisionFrame;
use crate::report::{CollisionReport, EnemyHit};

/// Always-available backend. Cannot fail.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReferenceBackend;

impl ReferenceBackend {
    /// Creates the backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Runs the three passes into `report`, which must be cleared.
    pub fn run(&self, frame: &CollisionFrame<'_>, report: &mut CollisionReport) {
        offense_pass(frame, report);
        defense_pass(frame, report);
        pickup_pass(frame, report);
    }
}

impl CollisionBackend for ReferenceBackend {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn is_ready(&self) -> bool {
        true
    }

    fn detect(&mut self, frame: &CollisionFrame<'_>, report: &mut CollisionReport) -> Result<(), BackendError> {
        self.run(frame, report);
        Ok(())
    }
}

// Offensive and enemy kinds are disjoint, so each projectile is visited by
// exactly one pass and can be consumed at most once.
fn offense_pass(frame: &CollisionFrame<'_>, report: &mut CollisionReport) {
    for (i, projectile) in frame.projectiles.iter().enumerate() {
        if !projectile.kind.is_offensive() {
            continue;
        }
        let shot = projectile.circle();
        let zombie_shot = projectile.kind == ProjectileKind::Zombie;

        let target = frame
            .enemies
            .iter()
            .enumerate()
            .filter(|(_, enemy)| !(zombie_shot && enemy.is_zombie))
            .find(|(_, enemy)| circles_overlap(shot, enemy.circle()));

        if let Some((j, _)) = target {
            report.projectile_hits.push(i);
            report.enemy_hits.push(EnemyHit {
                enemy_index: j,
                damage: projectile.damage,
            });
        }
    }
}

fn defense_pass(frame: &CollisionFrame<'_>, report: &mut CollisionReport) {
    let ship = frame.ship.circle();

    for (i, projectile) in frame.projectiles.iter().enumerate() {
        if projectile.kind != ProjectileKind::Enemy {
            continue;
        }
        let shot = projectile.circle();

        if circles_overlap(shot, ship) {
            if !frame.shield_active() {
                report.ship_hit = true;
                report.ship_damage += projectile.damage;
            }
            report.projectile_hits.push(i);
            continue;
        }

        if frame.modules.iter().any(|module| circles_overlap(shot, module.circle())) {
            report.projectile_hits.push(i);
            continue;
        }

        let zombie = frame
            .enemies
            .iter()
            .enumerate()
            .filter(|(_, enemy)| enemy.is_zombie)
            .find(|(_, enemy)| circles_overlap(shot, enemy.circle()));

        if let Some((j, _)) = zombie {
            report.projectile_hits.push(i);
            report.enemy_hits.push(EnemyHit {
                enemy_index: j,
                damage: projectile.damage,
            });
        }
    }
}

fn pickup_pass(frame: &CollisionFrame<'_>, report: &mut CollisionReport) {
    let ship = frame.ship.circle();

    report.powerups_collected.extend(
        frame
            .powerups
            .iter()
            .enumerate()
            .filter(|(_, powerup)| circles_overlap(ship, powerup.circle()))
            .map(|(i, _)| i),
    );
    report.stars_collected.extend(
        frame
            .stars
            .iter()
            .enumerate()
            .filter(|(_, star)| circles_overlap(ship, star.circle()))
            .map(|(i, _)| i),
    );
}
