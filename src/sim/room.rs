//! Room generation and room transitions
//!
//! A room is a handful of non-overlapping walls plus a hostile roster. Rooms
//! are never edited after generation except for hostiles dying and pickups
//! being collected; leaving the playfield swaps the whole room out.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::overlaps_any;
use super::hostile::{Hostile, HostileKind};
use super::rect::Rect;
use super::state::Playfield;
use crate::Scenario;
use crate::consts::*;

/// Pickup kinds found in boss-hunt rooms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Medkit,
    Grenade,
}

/// A pickup entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
    pub rect: Rect,
}

/// Size of a pickup
pub const PICKUP_SIZE: f32 = 20.0;

/// Playfield edge the player walked through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Left,
    Right,
    Up,
    Down,
}

impl Exit {
    /// Offset that carries the player back in through the opposite edge
    pub fn reentry_offset(&self, playfield: &Playfield) -> Vec2 {
        let dx = playfield.width - PLAYER_SIZE;
        let dy = playfield.height - PLAYER_SIZE;
        match self {
            Exit::Right => Vec2::new(-dx, 0.0),
            Exit::Left => Vec2::new(dx, 0.0),
            Exit::Down => Vec2::new(0.0, -dy),
            Exit::Up => Vec2::new(0.0, dy),
        }
    }
}

/// A generated room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Value of the room-progress counter this room was generated with
    pub progress: u32,
    pub walls: Vec<Rect>,
    pub hostiles: Vec<Hostile>,
    pub pickups: Vec<Pickup>,
}

impl Room {
    /// Generate a room for the given room-progress counter
    pub fn generate<R: Rng + ?Sized>(
        progress: u32,
        playfield: &Playfield,
        scenario: Scenario,
        now_ms: u64,
        rng: &mut R,
    ) -> Self {
        let walls = generate_walls(playfield, rng);

        let stationary = (3 + progress).min(MAX_STATIONARY);
        let pursuit = progress.min(MAX_PURSUIT);
        let mut hostiles = Vec::with_capacity((stationary + pursuit + 1) as usize);
        let mut next_id = 0;
        for (kind, count) in [
            (HostileKind::Stationary, stationary),
            (HostileKind::Pursuit, pursuit),
        ] {
            for _ in 0..count {
                // Hostiles may spawn inside walls
                let at = playfield.random_point(HOSTILE_SPAWN_MARGIN, rng);
                hostiles.push(Hostile::new(next_id, kind, at, now_ms));
                next_id += 1;
            }
        }

        let mut pickups = Vec::new();
        if scenario == Scenario::BossHunt {
            let at = Vec2::new(playfield.width / 2.0, playfield.height / 4.0);
            hostiles.push(Hostile::new(next_id, HostileKind::Boss, at, now_ms));
            for _ in 0..PICKUPS_PER_ROOM {
                let kind = if rng.random_bool(0.5) {
                    PickupKind::Medkit
                } else {
                    PickupKind::Grenade
                };
                let at = playfield.random_point(BOSS_TELEPORT_MARGIN, rng);
                pickups.push(Pickup {
                    kind,
                    rect: Rect::square(at, PICKUP_SIZE),
                });
            }
        }

        log::info!(
            "Room {}: {} walls, {} hostiles, {} pickups",
            progress,
            walls.len(),
            hostiles.len(),
            pickups.len()
        );

        Self {
            progress,
            walls,
            hostiles,
            pickups,
        }
    }

    pub fn count(&self, kind: HostileKind) -> usize {
        self.hostiles.iter().filter(|h| h.kind == kind).count()
    }

    /// Damage the hostile with `id`; returns its kind if the hit killed it
    ///
    /// Killed hostiles leave the roster at once, so a repeated hit on the same
    /// id finds nothing and returns `None`.
    pub fn damage_hostile(&mut self, id: u32) -> Option<HostileKind> {
        let idx = self.hostiles.iter().position(|h| h.id == id)?;
        if !self.hostiles[idx].take_damage() {
            return None;
        }
        let dead = self.hostiles.remove(idx);
        log::debug!("{:?} #{} killed", dead.kind, dead.id);
        Some(dead.kind)
    }
}

/// Try `WALL_ATTEMPTS` random walls, keeping those that overlap none already kept
pub fn generate_walls<R: Rng + ?Sized>(playfield: &Playfield, rng: &mut R) -> Vec<Rect> {
    let margin = WALL_MARGIN as u32;
    let field_w = playfield.width as u32;
    let field_h = playfield.height as u32;
    let mut walls: Vec<Rect> = Vec::with_capacity(WALL_ATTEMPTS);

    for _ in 0..WALL_ATTEMPTS {
        let width = rng.random_range(WALL_MIN_WIDTH..=WALL_MAX_WIDTH);
        let height = if rng.random_bool(0.5) {
            WALL_THIN_HEIGHT
        } else {
            rng.random_range(WALL_MIN_HEIGHT..=WALL_MAX_HEIGHT)
        };
        let x = rng.random_range(margin..=field_w.saturating_sub(width + margin).max(margin));
        let y = rng.random_range(margin..=field_h.saturating_sub(height + margin).max(margin));
        let candidate = Rect::from_top_left(x as f32, y as f32, width as f32, height as f32);
        if !overlaps_any(&candidate, &walls) {
            walls.push(candidate);
        }
    }
    walls
}

/// Which edge, if any, the player rectangle has fully crossed
pub fn detect_exit(player: &Rect, playfield: &Playfield) -> Option<Exit> {
    if player.left() > playfield.width {
        Some(Exit::Right)
    } else if player.right() < 0.0 {
        Some(Exit::Left)
    } else if player.top() > playfield.height {
        Some(Exit::Down)
    } else if player.bottom() < 0.0 {
        Some(Exit::Up)
    } else {
        None
    }
}

/// Move a freshly re-entered player out of the new room's walls
///
/// Nudges upward `SPAWN_NUDGE` at a time, at most `MAX_SPAWN_NUDGES` times;
/// if still stuck, drops the player at the playfield center.
pub fn clear_spawn(player: &mut Rect, walls: &[Rect], playfield: &Playfield) {
    let mut nudges = 0;
    while overlaps_any(player, walls) {
        if nudges == MAX_SPAWN_NUDGES {
            log::warn!(
                "No wall-free spawn after {} nudges, falling back to center",
                MAX_SPAWN_NUDGES
            );
            player.center = playfield.center();
            return;
        }
        player.translate(Vec2::new(0.0, -SPAWN_NUDGE));
        nudges += 1;
    }
}
