//! Explosion system: one-shot area damage, then animation until expiry.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use duel_core::components::Explosion;
use duel_core::constants::EXPLOSION_PUSH_FORCE;
use duel_core::ship::Ship;

use crate::engine::ShipSlots;
use crate::systems::particle;

pub fn run(
    world: &mut World,
    ships: &ShipSlots,
    rng: &mut ChaCha8Rng,
    despawn_buffer: &mut Vec<Entity>,
) {
    apply_damage_pass(world, ships, rng);
    advance(world, despawn_buffer);
}

/// Apply each blast's single damage pass: linear-falloff damage plus a
/// radial push on every ship inside the damage radius. Processed in entity
/// id order so the RNG draws are reproducible.
fn apply_damage_pass(world: &mut World, ships: &ShipSlots, rng: &mut ChaCha8Rng) {
    let mut entities: Vec<Entity> = world
        .query::<&Explosion>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();
    entities.sort_by_key(|entity| entity.id());

    for entity in entities {
        let blast = {
            let Ok(explosion) = world.query_one_mut::<&mut Explosion>(entity) else {
                continue;
            };
            if !explosion.claim_damage_pass() {
                continue;
            }
            explosion.clone()
        };

        for ship_entity in ships.iter().flatten() {
            let hit_pos = {
                let Ok(ship) = world.query_one_mut::<&mut Ship>(*ship_entity) else {
                    continue;
                };
                let distance = blast.pos.range_to(&ship.pos);
                let Some((damage, ratio)) = blast.damage_at(distance) else {
                    continue;
                };
                ship.apply_damage(damage);

                // Push directly away from the blast center; no direction
                // exists for a dead-center hit.
                if distance > f64::EPSILON {
                    let dir = (ship.pos.to_vec2() - blast.pos.to_vec2()) / distance;
                    ship.pos.x += dir.x * ratio * EXPLOSION_PUSH_FORCE;
                    ship.pos.y += dir.y * ratio * EXPLOSION_PUSH_FORCE;
                }
                ship.pos
            };
            particle::spawn_hit_burst(world, rng, hit_pos);
        }
    }
}

fn advance(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    for (entity, explosion) in world.query_mut::<&mut Explosion>() {
        explosion.advance();
        if explosion.expired() {
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
