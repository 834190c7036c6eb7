//! Effect cues and cosmetic particles
//!
//! Cues are what the renderer consumes; particles are a ready-made burst for
//! hosts that just want to draw dots. Neither affects gameplay.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{EffectColor, EffectCue, Particle};
use crate::{heading_vector, lerp};

/// Particles per cue
pub const BRICK_HIT_PARTICLES: u32 = 10;
pub const STEEL_HIT_PARTICLES: u32 = 8;
pub const PLAYER_HIT_PARTICLES: u32 = 18;
pub const ENEMY_HIT_PARTICLES: u32 = 8;
pub const ENEMY_DESTROYED_PARTICLES: u32 = 20;

/// Maximum live particles
pub const MAX_PARTICLES: usize = 512;

/// Record a cue and spawn its particle burst
pub fn emit(
    cues: &mut Vec<EffectCue>,
    particles: &mut Vec<Particle>,
    rng: &mut impl Rng,
    pos: Vec2,
    color: EffectColor,
    count: u32,
) {
    cues.push(EffectCue {
        pos,
        color,
        particles: count,
    });

    for _ in 0..count {
        if particles.len() >= MAX_PARTICLES {
            // Drop the oldest to make room
            particles.remove(0);
        }
        let dir = heading_vector(rng.random::<f32>() * TAU);
        let speed = lerp(60.0, 260.0, rng.random());
        particles.push(Particle {
            pos,
            vel: dir * speed,
            radius: lerp(1.5, 3.6, rng.random()),
            life: lerp(0.25, 0.65, rng.random()),
            color,
        });
    }
}

/// Move particles, bleed off their velocity and drop the dead ones
pub fn update_particles(particles: &mut Vec<Particle>, dt: f32) {
    let damping = 0.90f32.powf(60.0 * dt);
    for p in particles.iter_mut() {
        p.pos += p.vel * dt;
        p.vel *= damping;
        p.life -= dt;
    }
    particles.retain(|p| p.life > 0.0);
}
