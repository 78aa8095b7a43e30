//! Cosmetic hit particles
//!
//! Particles never affect gameplay; they drift, fade and shrink until their
//! lifetime or opacity runs out.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime in ticks
    pub life: i32,
    /// Opacity, 255 = fully opaque
    pub alpha: f32,
    pub size: f32,
}

impl Particle {
    pub fn new<R: Rng + ?Sized>(pos: Vec2, vel: Vec2, rng: &mut R) -> Self {
        Self {
            pos,
            vel,
            life: rng.random_range(PARTICLE_MIN_LIFE..=PARTICLE_MAX_LIFE),
            alpha: 255.0,
            size: rng.random_range(PARTICLE_MIN_SIZE..=PARTICLE_MAX_SIZE),
        }
    }

    /// Advance one tick; returns false once the particle has expired
    pub fn tick(&mut self) -> bool {
        self.pos += self.vel;
        self.life -= 1;
        self.alpha -= PARTICLE_FADE;
        self.size *= PARTICLE_SHRINK;
        self.is_alive()
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0 && self.alpha > 0.0
    }
}

/// Spawn a burst of particles at `at` with small random velocities
pub fn spawn_burst<R: Rng + ?Sized>(particles: &mut Vec<Particle>, at: Vec2, rng: &mut R) {
    for _ in 0..BURST_PARTICLES {
        let vel = Vec2::new(
            rng.random_range(-PARTICLE_MAX_SPEED..=PARTICLE_MAX_SPEED),
            rng.random_range(-PARTICLE_MAX_SPEED..=PARTICLE_MAX_SPEED),
        );
        particles.push(Particle::new(at, vel, rng));
    }
    log::debug!("Particle burst at ({:.0}, {:.0})", at.x, at.y);
}

/// Tick every particle and drop the expired ones
pub fn tick_particles(particles: &mut Vec<Particle>) {
    particles.retain_mut(|p| p.tick());
}
