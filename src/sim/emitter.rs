//! Particle bursts
//!
//! An emitter fires all of its particles at creation and then only decays.
//! `Emitter::update` reports completion exactly once, on the step in which the
//! last particle dies, so the owner can drop the emitter.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::heading_vec;

/// Shape of a burst
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    /// Particles emitted per burst
    pub count: u32,
    pub speed_min: f32,
    pub speed_max: f32,
    /// Seconds each particle lives
    pub lifespan: f32,
    /// Starting particle radius; shrinks with remaining life
    pub size: f32,
    /// Whether world gravity pulls on the particles
    pub gravity: bool,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            count: 14,
            speed_min: 20.0,
            speed_max: 110.0,
            lifespan: 0.7,
            size: 4.0,
            gravity: true,
        }
    }
}

/// A single blood droplet
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1 at birth, 0 at death
    pub life: f32,
    pub size: f32,
}

/// A self-terminating burst of particles
#[derive(Debug, Clone)]
pub struct Emitter {
    pub id: u32,
    pub origin: Vec2,
    pub particles: Vec<Particle>,
    lifespan: f32,
    gravity: bool,
    finished: bool,
}

impl Emitter {
    /// Emit a full burst at `origin`
    pub fn burst<R: Rng + ?Sized>(id: u32, origin: Vec2, config: &BurstConfig, rng: &mut R) -> Self {
        let speed_max = config.speed_max.max(config.speed_min);
        let particles = (0..config.count)
            .map(|_| {
                let angle = rng.random_range(-std::f32::consts::PI..std::f32::consts::PI);
                let speed = if speed_max > config.speed_min {
                    rng.random_range(config.speed_min..speed_max)
                } else {
                    config.speed_min
                };
                Particle {
                    pos: origin,
                    vel: heading_vec(angle) * speed,
                    life: 1.0,
                    size: config.size,
                }
            })
            .collect();

        Self {
            id,
            origin,
            particles,
            lifespan: config.lifespan,
            gravity: config.gravity,
            finished: false,
        }
    }

    pub fn live_count(&self) -> usize {
        self.particles.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Age and move the particles. Returns true exactly once: on the update in
    /// which the live count reaches zero.
    pub fn update(&mut self, dt: f32, gravity_y: f32) -> bool {
        if self.finished {
            return false;
        }

        let decay = if self.lifespan > 0.0 {
            dt / self.lifespan
        } else {
            1.0
        };
        for p in self.particles.iter_mut() {
            if self.gravity {
                p.vel.y += gravity_y * dt;
            }
            p.pos += p.vel * dt;
            p.life -= decay;
        }
        self.particles.retain(|p| p.life > 0.0);

        if self.particles.is_empty() {
            self.finished = true;
            return true;
        }
        false
    }
}
