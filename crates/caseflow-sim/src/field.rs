//! Pure particle field state machine.
//!
//! The field is deliberately free of clocks, timers, and global RNG: the
//! caller passes the current time and a random source into [`ParticleField::tick`],
//! so the spawn/advance/retire cycle is fully deterministic under a seeded
//! RNG and an explicit clock. The async driver in `engine` owns the real
//! clock; tests drive a synthetic one.

use rand::Rng;

use crate::config::SimConfig;
use crate::particle::Particle;

/// The set of live particles for one node, plus spawn bookkeeping.
#[derive(Debug, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
    last_spawn_ms: f64,
}

impl ParticleField {
    /// Create an empty field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one frame.
    ///
    /// In order: spawn decision (elapsed time since the last spawn exceeds
    /// the derived interval and the field is below the cap), advance every
    /// live particle, retire particles past the right edge. The config is
    /// re-read every tick, so a rate change applies at the next spawn
    /// decision without touching in-flight particles.
    pub fn tick(&mut self, now_ms: f64, config: &SimConfig, rng: &mut impl Rng) {
        if now_ms - self.last_spawn_ms > config.spawn_interval_ms()
            && self.particles.len() < config.max_particles
        {
            self.particles.push(Particle::spawn(rng, config.viewport));
            self.last_spawn_ms = now_ms;
        }

        for particle in &mut self.particles {
            particle.advance();
        }

        let viewport = config.viewport;
        self.particles.retain(|p| !p.is_retired(viewport));
    }

    /// Remove all live particles.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Live particle count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether no particles are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// The live particles, oldest first.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}
