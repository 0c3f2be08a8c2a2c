//! Gunnery system: bullet impacts against ship hulls.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use duel_core::components::{Bullet, Explosion};
use duel_core::constants::BULLET_DAMAGE;
use duel_core::ship::Ship;

use crate::engine::ShipSlots;
use crate::systems::particle;

/// Resolve bullet impacts: a bullet can only strike the slot opposing
/// its shooter. Impacts leave a small blast and a spark burst.
pub fn run(
    world: &mut World,
    ships: &ShipSlots,
    rng: &mut ChaCha8Rng,
    despawn_buffer: &mut Vec<Entity>,
) {
    let mut bullets: Vec<(Entity, Bullet)> = world
        .query::<&Bullet>()
        .iter()
        .map(|(entity, bullet)| (entity, bullet.clone()))
        .collect();
    bullets.sort_by_key(|(entity, _)| entity.id());

    despawn_buffer.clear();
    for (bullet_entity, bullet) in bullets {
        let target = bullet.owner.opponent();
        let Some(ship_entity) = ships[target.index()] else {
            continue;
        };
        let Ok(ship) = world.query_one_mut::<&mut Ship>(ship_entity) else {
            continue;
        };

        let reach = bullet.radius + ship.radius();
        if bullet.pos.range_to(&ship.pos) >= reach {
            continue;
        }

        ship.apply_damage(BULLET_DAMAGE * bullet.damage_multiplier);
        world.spawn((Explosion::impact_at(bullet.pos),));
        particle::spawn_hit_burst(world, rng, bullet.pos);
        despawn_buffer.push(bullet_entity);
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
