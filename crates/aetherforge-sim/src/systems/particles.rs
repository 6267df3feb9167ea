//! Decorative particles: spawn-on-event bursts with linear decay.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use aetherforge_core::components::Particle;
use aetherforge_core::constants::PARTICLE_MAX_LIFE;
use aetherforge_core::types::Position;

use super::EntityIds;

/// Scatter `count` particles from `pos` in random directions.
pub fn spawn_burst(
    particles: &mut Vec<Particle>,
    ids: &mut EntityIds,
    rng: &mut ChaCha8Rng,
    pos: Position,
    color: &str,
    count: u32,
    size_mod: f32,
) {
    for _ in 0..count {
        let angle = rng.gen_range(0.0..TAU);
        let speed = rng.gen_range(0.5..2.5);
        let life = rng.gen_range(20.0..PARTICLE_MAX_LIFE);
        let size = rng.gen_range(1.0..4.0) * size_mod;
        particles.push(Particle {
            id: ids.next(),
            position: pos,
            velocity: Vec2::new(angle.cos(), angle.sin()) * speed,
            life,
            max_life: PARTICLE_MAX_LIFE,
            color: color.to_string(),
            size,
        });
    }
}

/// Move and age every particle. Runs even while paused.
pub fn run(particles: &mut Vec<Particle>) {
    for i in (0..particles.len()).rev() {
        let p = &mut particles[i];
        p.life -= 1.0;
        p.position += p.velocity;
        if p.life <= 0.0 {
            particles.remove(i);
        }
    }
}
