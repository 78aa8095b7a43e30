//! Session state
//!
//! The session owns everything that outlives a single room: the player, the
//! room-progress counter, the RNG and the transient projectile and particle
//! collections. The active room is replaced wholesale on transition.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::hostile::HostileKind;
use super::particle::Particle;
use super::player::Player;
use super::projectile::Projectile;
use super::room::Room;
use crate::Scenario;

/// Playfield bounds, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Check if a point lies on the playfield (edges included)
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }

    /// Uniform random point at least `margin` away from every edge
    pub fn random_point<R: Rng + ?Sized>(&self, margin: f32, rng: &mut R) -> Vec2 {
        let max_x = (self.width - margin).max(margin);
        let max_y = (self.height - margin).max(margin);
        Vec2::new(
            rng.random_range(margin..=max_x),
            rng.random_range(margin..=max_y),
        )
    }
}

/// Complete simulation session (deterministic, serializable)
///
/// A snapshot carries the RNG state too, so a restored session continues
/// exactly where the saved one left off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub playfield: Playfield,
    pub scenario: Scenario,
    /// Rooms generated so far; never reset
    pub rooms_generated: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Active room
    pub room: Room,
    /// In-flight projectiles from every shooter
    pub projectiles: Vec<Projectile>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Rooms left through an edge
    pub transitions: u32,
}

impl GameState {
    /// Create a new session; the first room is generated at `now_ms`
    pub fn new(seed: u64, playfield: Playfield, scenario: Scenario, now_ms: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let room = Room::generate(1, &playfield, scenario, now_ms, &mut rng);
        Self {
            seed,
            rng,
            playfield,
            scenario,
            rooms_generated: 1,
            time_ticks: 0,
            player: Player::new(playfield.center()),
            room,
            projectiles: Vec::new(),
            particles: Vec::new(),
            transitions: 0,
        }
    }

    /// Generate the next room and install it, dropping the old one
    pub fn advance_room(&mut self, now_ms: u64) {
        self.rooms_generated += 1;
        self.room = Room::generate(
            self.rooms_generated,
            &self.playfield,
            self.scenario,
            now_ms,
            &mut self.rng,
        );
    }

    /// Bring a dead player back in a fresh room
    pub fn restart(&mut self, now_ms: u64) {
        self.player.reset(self.playfield.center());
        self.advance_room(now_ms);
        log::info!("Restarted in room {}", self.rooms_generated);
    }

    /// Credit the player for a hostile killed
    pub fn award_kill(&mut self, kind: HostileKind) {
        let player = &mut self.player;
        if kind != HostileKind::Boss {
            player.kills += 1;
            player.gain_xp(1);
        }
        if let Some(reward) = player.quest.advance() {
            player.apply_perk(reward);
        }
    }

    /// Serialize the whole session to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restore a session saved with `to_json`
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let state: Self = serde_json::from_str(json)?;
        log::info!(
            "Restored session (seed {}, room {}, tick {})",
            state.seed,
            state.rooms_generated,
            state.time_ticks
        );
        Ok(state)
    }

    /// Hit the hostile `id` once and credit a kill if it died
    pub fn damage_hostile(&mut self, id: u32) {
        if let Some(kind) = self.room.damage_hostile(id) {
            self.award_kill(kind);
        }
    }
}
