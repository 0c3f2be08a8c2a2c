//! Particle system: cosmetic sparks. Particles never affect the
//! simulation outcome.

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use duel_core::components::Particle;
use duel_core::constants::*;
use duel_core::types::Position;

pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    for (entity, particle) in world.query_mut::<&mut Particle>() {
        particle.advance();
        if particle.expired() {
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Spawn a burst of orange sparks scattering from a hit point.
pub fn spawn_hit_burst(world: &mut World, rng: &mut ChaCha8Rng, pos: Position) {
    for _ in 0..HIT_BURST_COUNT {
        let angle = rng.gen_range(0.0..std::f64::consts::TAU);
        let speed = PARTICLE_MIN_SPEED + rng.gen::<f64>() * PARTICLE_SPEED_SPREAD;
        world.spawn((Particle {
            pos,
            vel: DVec2::new(angle.cos() * speed, angle.sin() * speed),
            radius: PARTICLE_MIN_RADIUS + rng.gen::<f64>() * PARTICLE_RADIUS_SPREAD,
            hue: PARTICLE_MIN_HUE + rng.gen::<f64>() * PARTICLE_HUE_SPREAD,
            age: 0,
            lifetime: PARTICLE_MIN_LIFETIME + rng.gen_range(0..=PARTICLE_LIFETIME_SPREAD),
        },));
    }
}
