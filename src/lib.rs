//! Arena Shooter - combat simulation core for a top-down room shooter
//!
//! Core modules:
//! - `sim`: Frame-synchronous simulation (movement, visibility, weapons, rooms)
//! - `settings`: Playfield, tick rate and scenario configuration

pub mod settings;
pub mod sim;

pub use settings::{Scenario, Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;
    /// Default simulation rate
    pub const TICK_RATE_HZ: u32 = 60;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_START_HEALTH: u32 = 3;
    /// Magazine size shared by every weapon
    pub const MAGAZINE_SIZE: u32 = 6;
    /// Reload duration (ms)
    pub const RELOAD_MS: u64 = 1000;
    /// Medkits stop healing at this health
    pub const MEDKIT_HEALTH_CAP: u32 = 5;
    /// Grenade blast radius around the player center
    pub const GRENADE_RADIUS: f32 = 100.0;

    /// Shotgun pellets per shot
    pub const SHOTGUN_PELLETS: usize = 5;
    /// Shotgun angular deviation per pellet (degrees, ±)
    pub const SHOTGUN_SPREAD_DEG: f32 = 15.0;

    /// Hostile defaults
    pub const HOSTILE_SIZE: f32 = 40.0;
    pub const HOSTILE_HEALTH: u32 = 3;
    pub const STATIONARY_SPEED: f32 = 2.0;
    pub const PURSUIT_SPEED: f32 = 3.0;
    /// Minimum time between hostile shots (ms)
    pub const SHOT_CADENCE_MS: u64 = 1000;
    /// Margin kept free around hostile spawn points
    pub const HOSTILE_SPAWN_MARGIN: f32 = 50.0;
    /// Stationary hostiles per room (upper bound)
    pub const MAX_STATIONARY: u32 = 3;
    /// Pursuit hostiles per room (upper bound)
    pub const MAX_PURSUIT: u32 = 2;

    /// Boss defaults
    pub const BOSS_SIZE: f32 = 80.0;
    pub const BOSS_HEALTH: u32 = 25;
    pub const BOSS_TELEPORT_MS: u64 = 2000;
    pub const BOSS_TELEPORT_MARGIN: f32 = 100.0;

    /// Projectile defaults
    pub const PROJECTILE_SIZE: f32 = 10.0;
    pub const PROJECTILE_SPEED: f32 = 10.0;
    /// Spread pellets always damage inside this distance from their origin
    pub const FALLOFF_NEAR: f32 = 100.0;
    /// Spread pellets never damage beyond this distance from their origin
    pub const FALLOFF_FAR: f32 = 200.0;
    /// Damage chance between the near and far falloff distances
    pub const FALLOFF_CHANCE: f64 = 0.5;

    /// Line-of-sight sampling
    pub const SIGHT_STEP: f32 = 5.0;
    pub const SIGHT_PROBE_SIZE: f32 = 2.0;

    /// Room generation
    pub const WALL_ATTEMPTS: usize = 3;
    pub const WALL_MARGIN: f32 = 50.0;
    pub const WALL_MIN_WIDTH: u32 = 200;
    pub const WALL_MAX_WIDTH: u32 = 400;
    pub const WALL_THIN_HEIGHT: u32 = 20;
    pub const WALL_MIN_HEIGHT: u32 = 100;
    pub const WALL_MAX_HEIGHT: u32 = 300;
    /// Pickups placed in boss-hunt rooms
    pub const PICKUPS_PER_ROOM: usize = 3;

    /// Room transition spawn correction
    pub const SPAWN_NUDGE: f32 = 5.0;
    pub const MAX_SPAWN_NUDGES: u32 = 200;

    /// Particle burst on hit
    pub const BURST_PARTICLES: usize = 10;
    pub const PARTICLE_MAX_SPEED: f32 = 2.0;
    pub const PARTICLE_MIN_LIFE: i32 = 30;
    pub const PARTICLE_MAX_LIFE: i32 = 60;
    pub const PARTICLE_MIN_SIZE: f32 = 3.0;
    pub const PARTICLE_MAX_SIZE: f32 = 6.0;
    pub const PARTICLE_FADE: f32 = 5.0;
    pub const PARTICLE_SHRINK: f32 = 0.98;

    /// Progression
    pub const XP_FIRST_LEVEL: u32 = 10;
    pub const XP_GROWTH: f32 = 1.5;
    pub const QUEST_KILL_GOAL: u32 = 10;
}

/// Angle (radians) of the direction from `from` to `to`
///
/// Coincident points yield 0, i.e. aiming along +x.
#[inline]
pub fn aim_angle(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit vector for an angle (radians)
#[inline]
pub fn unit_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aim_angle_axes() {
        assert!(aim_angle(Vec2::ZERO, Vec2::new(10.0, 0.0)).abs() < 1e-6);
        let down = aim_angle(Vec2::ZERO, Vec2::new(0.0, 10.0));
        assert!((down - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(aim_angle(Vec2::ONE, Vec2::ONE), 0.0);
    }

    #[test]
    fn test_unit_from_angle_is_normalized() {
        for i in 0..16 {
            let v = unit_from_angle(i as f32 * 0.4);
            assert!((v.length() - 1.0).abs() < 1e-5);
        }
    }
}
