//! Movement system: ship motion integration and bullet advancement.

use hecs::{Entity, World};

use duel_core::components::Bullet;
use duel_core::ship::Ship;
use duel_core::types::Arena;

/// Integrate ship motion (friction, heat dissipation, shutdown recovery)
/// and advance bullets, despawning any that leave the arena.
pub fn run(world: &mut World, arena: &Arena, despawn_buffer: &mut Vec<Entity>) {
    for (_entity, ship) in world.query_mut::<&mut Ship>() {
        ship.integrate(arena);
    }

    despawn_buffer.clear();
    for (entity, bullet) in world.query_mut::<&mut Bullet>() {
        bullet.advance();
        if bullet.is_out_of_bounds(arena) {
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
