//! Player state machine
//!
//! The player is either alive-active or dead-inert. A dead player stays on
//! the field but ignores movement, fire and reload completion until `reset`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::overlaps_any;
use super::progression::{Perk, Progression, Quest};
use super::projectile::{Projectile, Shooter};
use super::rect::Rect;
use super::room::PickupKind;
use crate::aim_angle;
use crate::consts::*;

/// Weapons in switch order
pub const WEAPONS: [Weapon; 2] = [Weapon::Pistol, Weapon::Shotgun];

/// Weapon identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weapon {
    Pistol,
    Shotgun,
}

impl Weapon {
    pub fn name(&self) -> &'static str {
        match self {
            Weapon::Pistol => "pistol",
            Weapon::Shotgun => "shotgun",
        }
    }

    /// Ammo consumed per trigger pull
    pub fn ammo_cost(&self) -> u32 {
        match self {
            Weapon::Pistol => 1,
            Weapon::Shotgun => 3,
        }
    }

    /// Projectiles per trigger pull
    pub fn pellets(&self) -> usize {
        match self {
            Weapon::Pistol => 1,
            Weapon::Shotgun => SHOTGUN_PELLETS,
        }
    }

    /// Max angular deviation per pellet (degrees, ±)
    pub fn spread_deg(&self) -> f32 {
        match self {
            Weapon::Pistol => 0.0,
            Weapon::Shotgun => SHOTGUN_SPREAD_DEG,
        }
    }

    /// Whether pellets use distance-based damage falloff
    pub fn falloff(&self) -> bool {
        matches!(self, Weapon::Shotgun)
    }
}

/// Directions held this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    /// Per-axis displacement (not normalized on diagonals)
    pub fn delta(&self, speed: f32) -> Vec2 {
        let mut d = Vec2::ZERO;
        if self.up {
            d.y -= speed;
        }
        if self.down {
            d.y += speed;
        }
        if self.left {
            d.x -= speed;
        }
        if self.right {
            d.x += speed;
        }
        d
    }
}

/// What a trigger pull did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    /// Projectiles spawned
    Fired(usize),
    /// Not enough ammo; reload started instead
    ReloadStarted,
    /// Dead or already reloading
    Ignored,
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub health: u32,
    pub ammo: u32,
    pub reloading: bool,
    pub reload_started_ms: u64,
    /// Latched false at zero health until `reset`
    pub alive: bool,
    /// Index into `WEAPONS`
    pub weapon_index: usize,
    pub grenades: u32,
    /// Stationary/pursuit hostiles killed
    pub kills: u32,
    pub progression: Progression,
    pub quest: Quest,
}

impl Player {
    pub fn new(center: Vec2) -> Self {
        Self {
            rect: Rect::square(center, PLAYER_SIZE),
            health: PLAYER_START_HEALTH,
            ammo: MAGAZINE_SIZE,
            reloading: false,
            reload_started_ms: 0,
            alive: true,
            weapon_index: 0,
            grenades: 0,
            kills: 0,
            progression: Progression::default(),
            quest: Quest::kill_quest(),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center
    }

    pub fn weapon(&self) -> Weapon {
        WEAPONS[self.weapon_index]
    }

    /// Per-tick update: movement then reload completion
    pub fn update(&mut self, intent: &MoveIntent, walls: &[Rect], now_ms: u64) {
        if !self.alive {
            return;
        }
        self.move_by(intent, walls);
        self.finish_reload(now_ms);
    }

    /// Apply movement; any wall overlap rolls back the whole move
    pub fn move_by(&mut self, intent: &MoveIntent, walls: &[Rect]) {
        if !self.alive {
            return;
        }
        let moved = self.rect.translated(intent.delta(PLAYER_SPEED));
        if !overlaps_any(&moved, walls) {
            self.rect = moved;
        }
    }

    /// Pull the trigger toward `target`
    pub fn fire<R: Rng + ?Sized>(
        &mut self,
        target: Vec2,
        now_ms: u64,
        projectiles: &mut Vec<Projectile>,
        rng: &mut R,
    ) -> FireOutcome {
        if !self.alive || self.reloading {
            return FireOutcome::Ignored;
        }

        let weapon = self.weapon();
        if self.ammo < weapon.ammo_cost() {
            self.reload(now_ms);
            return FireOutcome::ReloadStarted;
        }

        let origin = self.center();
        let base = aim_angle(origin, target);
        let spread = weapon.spread_deg();
        for _ in 0..weapon.pellets() {
            let theta = if spread > 0.0 {
                base + rng.random_range(-spread..=spread).to_radians()
            } else {
                base
            };
            projectiles.push(Projectile::with_angle(
                origin,
                theta,
                Shooter::Player,
                weapon.falloff(),
            ));
        }
        self.ammo -= weapon.ammo_cost();
        log::debug!("Player fired {} ({} left)", weapon.name(), self.ammo);
        FireOutcome::Fired(weapon.pellets())
    }

    /// Start a reload; it cannot be cancelled
    pub fn reload(&mut self, now_ms: u64) {
        self.reloading = true;
        self.reload_started_ms = now_ms;
        log::debug!("Reload started at {now_ms}ms");
    }

    /// Complete a pending reload once `RELOAD_MS` has elapsed
    pub fn finish_reload(&mut self, now_ms: u64) -> bool {
        if self.reloading && now_ms.saturating_sub(self.reload_started_ms) >= RELOAD_MS {
            self.ammo = MAGAZINE_SIZE;
            self.reloading = false;
            log::debug!("Reload finished at {now_ms}ms");
            return true;
        }
        false
    }

    /// Cycle the weapon list by `direction` (±1)
    pub fn switch_weapon(&mut self, direction: i32) {
        let len = WEAPONS.len() as i32;
        self.weapon_index = (self.weapon_index as i32 + direction).rem_euclid(len) as usize;
        log::debug!("Weapon: {}", self.weapon().name());
    }

    /// Take one hit; returns true if this hit killed the player
    pub fn take_damage(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.health = self.health.saturating_sub(1);
        log::debug!("Player hit, health {}", self.health);
        if self.health == 0 {
            self.alive = false;
            log::info!("Player died");
            return true;
        }
        false
    }

    /// Bring the player back at `center` with a full magazine
    pub fn reset(&mut self, center: Vec2) {
        self.health = PLAYER_START_HEALTH;
        self.rect.center = center;
        self.ammo = MAGAZINE_SIZE;
        self.reloading = false;
        self.alive = true;
    }

    /// Apply a collected pickup
    pub fn collect(&mut self, kind: PickupKind) {
        match kind {
            PickupKind::Medkit => {
                if self.health < MEDKIT_HEALTH_CAP {
                    self.health += 1;
                }
            }
            PickupKind::Grenade => self.grenades += 1,
        }
        log::debug!("Picked up {kind:?}");
    }

    /// Record a perk and apply its effect
    pub fn apply_perk(&mut self, perk: Perk) {
        self.progression.perks.push(perk);
        self.grant(perk);
    }

    /// Add experience, applying any level-up perk
    pub fn gain_xp(&mut self, amount: u32) {
        if let Some(perk) = self.progression.gain_xp(amount) {
            self.grant(perk);
        }
    }

    fn grant(&mut self, perk: Perk) {
        match perk {
            Perk::MaxHp => self.health += 1,
        }
        log::info!("Perk granted: {}", perk.label());
    }
}
