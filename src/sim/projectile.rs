//! Projectiles and hit resolution
//!
//! A projectile flies in a straight line at `PROJECTILE_SPEED` per tick and is
//! removed as soon as it leaves the playfield or registers a hit. Spread
//! pellets (shotgun) lose their punch with distance from where they were
//! fired:
//! - closer than `FALLOFF_NEAR`: always damage
//! - up to `FALLOFF_FAR`: damage on a coin flip
//! - beyond: never damage
//!
//! A pellet that overlaps a target is consumed whatever the outcome.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::rects_overlap;
use super::particle::{Particle, spawn_burst};
use super::rect::Rect;
use super::state::Playfield;
use crate::consts::*;
use crate::{aim_angle, unit_from_angle};

/// Who fired a projectile; decides which targets it is tested against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shooter {
    Player,
    Enemy,
}

/// A projectile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Where the projectile was fired from (for damage falloff)
    pub origin: Vec2,
    pub pos: Vec2,
    pub vel: Vec2,
    pub shooter: Shooter,
    /// Spread pellet with distance-based damage falloff
    pub spread: bool,
}

impl Projectile {
    /// Projectile launched from `origin` along angle `theta` (radians)
    pub fn with_angle(origin: Vec2, theta: f32, shooter: Shooter, spread: bool) -> Self {
        Self {
            origin,
            pos: origin,
            vel: unit_from_angle(theta) * PROJECTILE_SPEED,
            shooter,
            spread,
        }
    }

    /// Projectile launched from `origin` toward `target`
    pub fn toward(origin: Vec2, target: Vec2, shooter: Shooter, spread: bool) -> Self {
        Self::with_angle(origin, aim_angle(origin, target), shooter, spread)
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, PROJECTILE_SIZE)
    }

    /// Move one tick; returns false once the projectile has left the playfield
    pub fn advance(&mut self, playfield: &Playfield) -> bool {
        self.pos += self.vel;
        playfield.contains(self.pos)
    }
}

/// Spawn a projectile from `origin` aimed at `target`
pub fn spawn(
    projectiles: &mut Vec<Projectile>,
    origin: Vec2,
    target: Vec2,
    shooter: Shooter,
    spread: bool,
) {
    projectiles.push(Projectile::toward(origin, target, shooter, spread));
    log::debug!(
        "{:?} projectile spawned at ({:.0}, {:.0})",
        shooter,
        origin.x,
        origin.y
    );
}

/// Advance every projectile and drop those that left the playfield
pub fn advance_all(projectiles: &mut Vec<Projectile>, playfield: &Playfield) {
    projectiles.retain_mut(|p| p.advance(playfield));
}

/// Resolve a projectile against a candidate target
///
/// Returns `None` when the rectangles do not overlap (projectile keeps
/// flying). Otherwise the projectile is spent and the result says whether the
/// target takes damage. A particle burst is spawned at the target's center for
/// every damaging hit.
pub fn resolve_hit<R: Rng + ?Sized>(
    projectile: &Projectile,
    target: &Rect,
    rng: &mut R,
    particles: &mut Vec<Particle>,
) -> Option<bool> {
    if !rects_overlap(&projectile.rect(), target) {
        return None;
    }

    let damaged = if projectile.spread {
        let distance = projectile.origin.distance(target.center);
        if distance < FALLOFF_NEAR {
            true
        } else if distance < FALLOFF_FAR {
            rng.random_bool(FALLOFF_CHANCE)
        } else {
            false
        }
    } else {
        true
    };

    if damaged {
        spawn_burst(particles, target.center, rng);
    }
    Some(damaged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn field() -> Playfield {
        Playfield::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT)
    }

    fn shot(from: (f32, f32), to: (f32, f32), spread: bool) -> Projectile {
        let (from, to) = (Vec2::new(from.0, from.1), Vec2::new(to.0, to.1));
        Projectile::toward(from, to, Shooter::Player, spread)
    }

    #[test]
    fn test_velocity_toward_target() {
        let p = shot((100.0, 100.0), (100.0, 400.0), false);
        assert!(p.vel.x.abs() < 1e-4);
        assert!((p.vel.y - PROJECTILE_SPEED).abs() < 1e-4);
        assert_eq!(p.origin, p.pos);
    }

    #[test]
    fn test_advance_and_leave_playfield() {
        let mut p = shot((795.0, 300.0), (900.0, 300.0), false);
        p.shooter = Shooter::Enemy;
        assert!(!p.advance(&field()));

        let mut projectiles = vec![
            shot((400.0, 300.0), (500.0, 300.0), false),
            shot((5.0, 300.0), (0.0, 300.0), false),
        ];
        advance_all(&mut projectiles, &field());
        assert_eq!(projectiles.len(), 1);
        assert_eq!(projectiles[0].pos, Vec2::new(410.0, 300.0));
    }

    #[test]
    fn test_miss_keeps_projectile() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut particles = Vec::new();
        let p = shot((100.0, 100.0), (200.0, 100.0), false);
        let target = Rect::square(Vec2::new(400.0, 400.0), HOSTILE_SIZE);
        assert_eq!(resolve_hit(&p, &target, &mut rng, &mut particles), None);
        assert!(particles.is_empty());
    }

    #[test]
    fn test_plain_hit_always_damages() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut particles = Vec::new();
        let mut p = shot((100.0, 100.0), (700.0, 100.0), false);
        // Far away from the origin does not matter for plain shots
        p.pos = Vec2::new(700.0, 100.0);
        let target = Rect::square(Vec2::new(705.0, 100.0), HOSTILE_SIZE);
        assert_eq!(resolve_hit(&p, &target, &mut rng, &mut particles), Some(true));
        assert_eq!(particles.len(), BURST_PARTICLES);
    }

    #[test]
    fn test_spread_close_always_damages() {
        let mut particles = Vec::new();
        for seed in 0..50 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut p = shot((100.0, 100.0), (200.0, 100.0), true);
            p.pos = Vec2::new(150.0, 100.0);
            let target = Rect::square(Vec2::new(160.0, 100.0), HOSTILE_SIZE);
            assert_eq!(resolve_hit(&p, &target, &mut rng, &mut particles), Some(true));
        }
    }

    #[test]
    fn test_spread_far_never_damages_but_is_consumed() {
        let mut particles = Vec::new();
        for seed in 0..50 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut p = shot((100.0, 100.0), (400.0, 100.0), true);
            p.pos = Vec2::new(300.0, 100.0);
            let target = Rect::square(Vec2::new(310.0, 100.0), HOSTILE_SIZE);
            assert_eq!(resolve_hit(&p, &target, &mut rng, &mut particles), Some(false));
        }
        assert!(particles.is_empty());
    }

    #[test]
    fn test_spread_mid_range_is_a_coin_flip() {
        let mut particles = Vec::new();
        let mut rng = Pcg32::seed_from_u64(77);
        let mut hits = 0;
        for _ in 0..400 {
            let mut p = shot((100.0, 100.0), (400.0, 100.0), true);
            p.pos = Vec2::new(240.0, 100.0);
            let target = Rect::square(Vec2::new(250.0, 100.0), HOSTILE_SIZE);
            if resolve_hit(&p, &target, &mut rng, &mut particles) == Some(true) {
                hits += 1;
            }
        }
        assert!(hits > 120 && hits < 280, "hits = {hits}");
        assert_eq!(particles.len(), hits * BURST_PARTICLES);
    }
}
