//! Hostile actors
//!
//! One record shape for every hostile; behaviour is selected by `HostileKind`:
//! - Stationary: only shuffles toward the player while touching them, fires
//!   on cadence with no visibility check
//! - Pursuit: chases and fires only with a clear line of sight
//! - Boss: teleports on a fixed interval, never fires

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{has_line_of_sight, rects_overlap};
use super::player::Player;
use super::projectile::{self, Projectile, Shooter};
use super::rect::Rect;
use super::state::Playfield;
use crate::consts::*;

/// Hostile behaviour variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostileKind {
    Stationary,
    Pursuit,
    Boss,
}

impl HostileKind {
    pub fn size(&self) -> f32 {
        match self {
            HostileKind::Boss => BOSS_SIZE,
            _ => HOSTILE_SIZE,
        }
    }

    pub fn max_health(&self) -> u32 {
        match self {
            HostileKind::Boss => BOSS_HEALTH,
            _ => HOSTILE_HEALTH,
        }
    }
}

/// A hostile actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostile {
    /// Unique within its room
    pub id: u32,
    pub kind: HostileKind,
    pub rect: Rect,
    pub health: u32,
    pub last_shot_ms: u64,
    pub last_teleport_ms: u64,
}

impl Hostile {
    /// New hostile spawned at `now_ms`; its first shot and first teleport
    /// each wait one full interval
    pub fn new(id: u32, kind: HostileKind, center: Vec2, now_ms: u64) -> Self {
        Self {
            id,
            kind,
            rect: Rect::square(center, kind.size()),
            health: kind.max_health(),
            last_shot_ms: now_ms,
            last_teleport_ms: now_ms,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Per-tick behaviour
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        player: &Player,
        walls: &[Rect],
        playfield: &Playfield,
        now_ms: u64,
        projectiles: &mut Vec<Projectile>,
        rng: &mut R,
    ) {
        match self.kind {
            HostileKind::Stationary => self.update_stationary(player, now_ms, projectiles),
            HostileKind::Pursuit => self.update_pursuit(player, walls, now_ms, projectiles),
            HostileKind::Boss => self.update_boss(playfield, now_ms, rng),
        }
    }

    fn update_stationary(
        &mut self,
        player: &Player,
        now_ms: u64,
        projectiles: &mut Vec<Projectile>,
    ) {
        let target = player.center();
        if rects_overlap(&self.rect, &player.rect) {
            let here = self.center();
            let step = Vec2::new(axis_step(here.x, target.x), axis_step(here.y, target.y))
                * STATIONARY_SPEED;
            self.rect.translate(step);
        }

        if self.cadence_elapsed(now_ms) {
            self.shoot(target, projectiles);
            self.last_shot_ms = now_ms;
        }
    }

    fn update_pursuit(
        &mut self,
        player: &Player,
        walls: &[Rect],
        now_ms: u64,
        projectiles: &mut Vec<Projectile>,
    ) {
        let target = player.center();
        if has_line_of_sight(self.center(), target, walls) {
            let dir = (target - self.center()).normalize_or_zero();
            self.rect.translate(dir * PURSUIT_SPEED);
        }

        // Visibility is re-checked from the new position
        if self.cadence_elapsed(now_ms) && has_line_of_sight(self.center(), target, walls) {
            self.shoot(target, projectiles);
            self.last_shot_ms = now_ms;
        }
    }

    fn update_boss<R: Rng + ?Sized>(&mut self, playfield: &Playfield, now_ms: u64, rng: &mut R) {
        if now_ms.saturating_sub(self.last_teleport_ms) > BOSS_TELEPORT_MS {
            self.rect.center = playfield.random_point(BOSS_TELEPORT_MARGIN, rng);
            self.last_teleport_ms = now_ms;
            log::debug!(
                "Boss teleported to ({:.0}, {:.0})",
                self.rect.center.x,
                self.rect.center.y
            );
        }
    }

    fn cadence_elapsed(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_shot_ms) >= SHOT_CADENCE_MS
    }

    fn shoot(&self, target: Vec2, projectiles: &mut Vec<Projectile>) {
        projectile::spawn(projectiles, self.center(), target, Shooter::Enemy, false);
    }

    /// Take one hit; returns true only on the hit that kills
    pub fn take_damage(&mut self) -> bool {
        if self.is_dead() {
            return false;
        }
        self.health -= 1;
        log::debug!("{:?} #{} hit, health {}", self.kind, self.id, self.health);
        self.is_dead()
    }
}

/// Unit step along one axis toward `to` (0 when aligned)
#[inline]
fn axis_step(from: f32, to: f32) -> f32 {
    if from < to {
        1.0
    } else if from > to {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn field() -> Playfield {
        Playfield::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT)
    }

    #[test]
    fn test_take_damage_kills_once() {
        let mut h = Hostile::new(0, HostileKind::Stationary, Vec2::new(100.0, 100.0), 0);
        assert!(!h.take_damage());
        assert!(!h.take_damage());
        assert!(h.take_damage());
        assert!(!h.take_damage());
        assert_eq!(h.health, 0);
    }

    #[test]
    fn test_boss_health_pool() {
        let mut boss = Hostile::new(0, HostileKind::Boss, Vec2::new(400.0, 150.0), 0);
        assert_eq!(boss.rect.width(), BOSS_SIZE);
        let deaths = (0..BOSS_HEALTH + 3).filter(|_| boss.take_damage()).count();
        assert_eq!(deaths, 1);
    }

    #[test]
    fn test_stationary_idle_when_apart_but_fires_on_cadence() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut projectiles = Vec::new();
        let player = Player::new(Vec2::new(400.0, 300.0));
        let walls = [Rect::from_top_left(200.0, 0.0, 20.0, 600.0)];
        let mut h = Hostile::new(0, HostileKind::Stationary, Vec2::new(100.0, 300.0), 0);

        h.update(&player, &walls, &field(), 999, &mut projectiles, &mut rng);
        assert!(projectiles.is_empty());
        assert_eq!(h.center(), Vec2::new(100.0, 300.0));

        // Fires straight through walls
        h.update(&player, &walls, &field(), 1000, &mut projectiles, &mut rng);
        assert_eq!(projectiles.len(), 1);
        assert_eq!(projectiles[0].shooter, Shooter::Enemy);
        assert_eq!(h.last_shot_ms, 1000);
    }

    #[test]
    fn test_stationary_steps_per_axis_when_touching() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut projectiles = Vec::new();
        let player = Player::new(Vec2::new(400.0, 300.0));
        let mut h = Hostile::new(0, HostileKind::Stationary, Vec2::new(380.0, 320.0), 0);
        h.update(&player, &[], &field(), 10, &mut projectiles, &mut rng);
        assert_eq!(h.center(), Vec2::new(382.0, 318.0));
    }

    #[test]
    fn test_pursuit_chases_with_sight() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut projectiles = Vec::new();
        let player = Player::new(Vec2::new(400.0, 300.0));
        let mut h = Hostile::new(0, HostileKind::Pursuit, Vec2::new(100.0, 300.0), 0);
        h.update(&player, &[], &field(), 10, &mut projectiles, &mut rng);
        assert!((h.center().x - 103.0).abs() < 1e-4);
        assert!((h.center().y - 300.0).abs() < 1e-4);
        assert!(projectiles.is_empty());

        h.update(&player, &[], &field(), 1000, &mut projectiles, &mut rng);
        assert_eq!(projectiles.len(), 1);
    }

    #[test]
    fn test_pursuit_blocked_does_nothing() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut projectiles = Vec::new();
        let player = Player::new(Vec2::new(400.0, 300.0));
        let walls = [Rect::from_top_left(200.0, 0.0, 20.0, 600.0)];
        let mut h = Hostile::new(0, HostileKind::Pursuit, Vec2::new(100.0, 300.0), 0);
        h.update(&player, &walls, &field(), 5000, &mut projectiles, &mut rng);
        assert_eq!(h.center(), Vec2::new(100.0, 300.0));
        assert!(projectiles.is_empty());
        // Cadence is not consumed by a blocked check
        assert_eq!(h.last_shot_ms, 0);
    }

    #[test]
    fn test_dead_player_still_draws_fire() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut projectiles = Vec::new();
        let mut player = Player::new(Vec2::new(400.0, 300.0));
        player.alive = false;
        player.health = 0;
        let mut a = Hostile::new(0, HostileKind::Stationary, Vec2::new(100.0, 100.0), 0);
        let mut b = Hostile::new(1, HostileKind::Pursuit, Vec2::new(700.0, 500.0), 0);

        a.update(&player, &[], &field(), 999, &mut projectiles, &mut rng);
        b.update(&player, &[], &field(), 999, &mut projectiles, &mut rng);
        assert!(projectiles.is_empty());

        for now in [1000, 2000, 3000] {
            a.update(&player, &[], &field(), now, &mut projectiles, &mut rng);
            b.update(&player, &[], &field(), now, &mut projectiles, &mut rng);
        }
        assert_eq!(projectiles.len(), 6);
        assert!(projectiles.iter().all(|p| p.shooter == Shooter::Enemy));
    }

    #[test]
    fn test_late_spawned_boss_waits_full_interval() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut projectiles = Vec::new();
        let player = Player::new(Vec2::new(400.0, 300.0));
        let start = Vec2::new(400.0, 150.0);
        let mut boss = Hostile::new(0, HostileKind::Boss, start, 60_000);
        assert_eq!(boss.last_teleport_ms, 60_000);

        for now in (60_016..=62_000).step_by(16) {
            boss.update(&player, &[], &field(), now, &mut projectiles, &mut rng);
            assert_eq!(boss.center(), start);
        }
        boss.update(&player, &[], &field(), 62_001, &mut projectiles, &mut rng);
        assert_ne!(boss.center(), start);
        assert_eq!(boss.last_teleport_ms, 62_001);
    }

    #[test]
    fn test_boss_teleports_on_interval() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut projectiles = Vec::new();
        let player = Player::new(Vec2::new(400.0, 300.0));
        let start = Vec2::new(400.0, 150.0);
        let mut boss = Hostile::new(0, HostileKind::Boss, start, 0);
        assert_eq!(boss.last_teleport_ms, 0);

        boss.update(&player, &[], &field(), 2000, &mut projectiles, &mut rng);
        assert_eq!(boss.center(), start);

        boss.update(&player, &[], &field(), 2001, &mut projectiles, &mut rng);
        assert_eq!(boss.last_teleport_ms, 2001);
        let c = boss.center();
        assert!(c.x >= BOSS_TELEPORT_MARGIN && c.x <= PLAYFIELD_WIDTH - BOSS_TELEPORT_MARGIN);
        assert!(c.y >= BOSS_TELEPORT_MARGIN && c.y <= PLAYFIELD_HEIGHT - BOSS_TELEPORT_MARGIN);
        assert!(projectiles.is_empty());
    }
}
