//! Cosmetic effects: explosion particles and muzzle flashes.
//!
//! Fed from engine events after each tick and advanced once per frame. Uses
//! its own RNG so effects never perturb the simulation's random stream, and
//! nothing in the simulation reads effect state back.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use flak_core::constants::*;
use flak_core::events::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Frames left to live.
    pub life: u32,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MuzzleFlash {
    pub position: Vec3,
    pub opacity: f32,
    since_fade: f32,
}

pub struct EffectsSystem {
    rng: ChaCha8Rng,
    particles: Vec<Particle>,
    flashes: Vec<MuzzleFlash>,
}

impl EffectsSystem {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            particles: Vec::new(),
            flashes: Vec::new(),
        }
    }

    /// Start effects for the events of one tick. Other events are ignored.
    pub fn ingest(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Explosion { position, .. } => self.explode(*position),
                GameEvent::MuzzleFlash { position } => self.flashes.push(MuzzleFlash {
                    position: *position,
                    opacity: 1.0,
                    since_fade: 0.0,
                }),
                _ => {}
            }
        }
    }

    fn explode(&mut self, position: Vec3) {
        for _ in 0..EXPLOSION_PARTICLES {
            let velocity = Vec3::new(
                self.rng.gen_range(-1.0..1.0),
                self.rng.gen_range(-1.0..1.0),
                self.rng.gen_range(-1.0..1.0),
            );
            self.particles.push(Particle {
                position,
                velocity,
                life: EXPLOSION_PARTICLE_LIFE,
                opacity: 1.0,
            });
        }
    }

    /// Advance one frame of `frame_delta_secs`.
    ///
    /// Particles move by their velocity once per frame and fade linearly
    /// over their life. Flashes lose a fixed step of opacity per elapsed
    /// fade interval.
    pub fn tick(&mut self, frame_delta_secs: f32) {
        for particle in &mut self.particles {
            particle.position += particle.velocity;
            particle.velocity *= EXPLOSION_PARTICLE_DAMPING;
            particle.life = particle.life.saturating_sub(1);
            particle.opacity = particle.life as f32 / EXPLOSION_PARTICLE_LIFE as f32;
        }
        self.particles.retain(|p| p.life > 0);

        let delta = frame_delta_secs.max(0.0);
        for flash in &mut self.flashes {
            flash.since_fade += delta;
            while flash.since_fade >= MUZZLE_FLASH_FADE_INTERVAL && flash.opacity > 0.0 {
                flash.since_fade -= MUZZLE_FLASH_FADE_INTERVAL;
                flash.opacity -= MUZZLE_FLASH_FADE_STEP;
            }
        }
        // Tolerance absorbs the float residue of ten 0.1 steps.
        self.flashes.retain(|f| f.opacity > 1e-4);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn flashes(&self) -> &[MuzzleFlash] {
        &self.flashes
    }

    pub fn is_idle(&self) -> bool {
        self.particles.is_empty() && self.flashes.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.flashes.clear();
    }
}
