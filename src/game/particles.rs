//! Particle System
//!
//! Short-lived visual bursts using a fixed-size pool. Particles are pure
//! decoration: they never feed back into the simulation, so the pool is
//! owned by the host and driven from drained game events.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use super::math::Vec2;

/// Maximum number of live particles. Bursts past this are dropped.
pub const MAX_PARTICLES: usize = 256;

/// Ticks a particle lives
pub const PARTICLE_LIFE: u32 = 60;

/// Downward pull per tick
const PARTICLE_GRAVITY: f64 = 0.3;
/// Horizontal damping per tick
const AIR_FRICTION: f64 = 0.98;
/// Upward kick range added on spawn
const LIFT: f64 = 2.0;

/// A single particle in the pool
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Remaining life in ticks
    pub life: u32,
    /// Total lifetime (for fading)
    pub max_life: u32,
    /// RGB 0-255
    pub color: [u8; 3],
    /// Radius at full life
    pub size: f32,
    /// Is this particle slot active?
    pub alive: bool,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            life: 0,
            max_life: PARTICLE_LIFE,
            color: [255, 255, 255],
            size: 4.0,
            alive: false,
        }
    }
}

impl Particle {
    /// 1.0 when fresh, 0.0 when about to die
    pub fn fade(&self) -> f32 {
        if self.max_life == 0 {
            return 0.0;
        }
        self.life as f32 / self.max_life as f32
    }
}

/// Burst recipe for one kind of game event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    pub count: usize,
    pub color: [u8; 3],
    /// Upper bound on initial speed
    pub speed: f64,
}

impl Burst {
    /// Dash trail; takes the player's color
    pub fn dash(color: [u8; 3]) -> Self {
        Self { count: 15, color, speed: 4.0 }
    }

    pub fn land() -> Self {
        Self { count: 8, color: [0x66, 0x7e, 0xea], speed: 2.0 }
    }

    pub fn collect() -> Self {
        Self { count: 15, color: [0xff, 0xff, 0x00], speed: 4.0 }
    }

    pub fn spike() -> Self {
        Self { count: 20, color: [0xff, 0x00, 0x55], speed: 5.0 }
    }

    pub fn fall() -> Self {
        Self { count: 25, color: [0x00, 0xd4, 0xff], speed: 6.0 }
    }
}

/// The particle pool, manages all live particles
pub struct ParticlePool {
    pub particles: [Particle; MAX_PARTICLES],
    rng: StdRng,
}

impl ParticlePool {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: [Particle::default(); MAX_PARTICLES],
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Find a dead particle slot
    fn find_free_slot(&self) -> Option<usize> {
        self.particles.iter().position(|p| !p.alive)
    }

    /// Spawn `count` particles at `origin`, each flying off at a random angle
    /// with a speed in `[0, speed)` and a small random upward kick.
    pub fn emit(&mut self, origin: Vec2, count: usize, color: [u8; 3], speed: f64) {
        for _ in 0..count {
            let Some(idx) = self.find_free_slot() else {
                return;
            };

            let angle = self.rng.gen_range(0.0..std::f64::consts::TAU);
            let magnitude = self.rng.gen::<f64>() * speed;
            let lift = self.rng.gen::<f64>() * LIFT;
            let velocity = Vec2::new(angle.cos() * magnitude, angle.sin() * magnitude - lift);

            self.particles[idx] = Particle {
                position: origin,
                velocity,
                life: PARTICLE_LIFE,
                max_life: PARTICLE_LIFE,
                color,
                alive: true,
                ..Particle::default()
            };
        }
    }

    pub fn emit_burst(&mut self, origin: Vec2, burst: Burst) {
        self.emit(origin, burst.count, burst.color, burst.speed);
    }

    /// Advance all live particles by one tick
    pub fn update(&mut self) {
        for particle in &mut self.particles {
            if !particle.alive {
                continue;
            }

            particle.position += particle.velocity;
            particle.velocity.y += PARTICLE_GRAVITY;
            particle.velocity.x *= AIR_FRICTION;

            particle.life = particle.life.saturating_sub(1);
            if particle.life == 0 {
                particle.alive = false;
            }
        }
    }

    pub fn iter_alive(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.alive)
    }

    /// Get count of live particles
    pub fn alive_count(&self) -> usize {
        self.iter_alive().count()
    }

    /// Kill all particles
    pub fn clear(&mut self) {
        for p in &mut self.particles {
            p.alive = false;
        }
    }
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::new(0)
    }
}
