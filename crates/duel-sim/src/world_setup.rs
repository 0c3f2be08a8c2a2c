//! Entity spawn factories for setting up the match world.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use duel_core::ship::Ship;
use duel_core::types::{Arena, Position};

use crate::engine::ShipSlots;

/// Set up the initial match world: both combatants facing a random
/// direction, player on the left, AI on the right.
pub fn setup_match(world: &mut World, rng: &mut ChaCha8Rng, arena: &Arena) -> ShipSlots {
    let player = spawn_ship(
        world,
        rng,
        Position::new(arena.width / 4.0, arena.height / 2.0),
    );
    let ai = spawn_ship(
        world,
        rng,
        Position::new(arena.width * 3.0 / 4.0, arena.height / 2.0),
    );
    [Some(player), Some(ai)]
}

/// Spawn a ship with a random heading, turret aligned with the hull.
fn spawn_ship(world: &mut World, rng: &mut ChaCha8Rng, pos: Position) -> hecs::Entity {
    let mut ship = Ship::new(pos);
    let angle = rng.gen_range(0.0..std::f64::consts::TAU);
    ship.angle = angle;
    ship.turret_angle = angle;
    world.spawn((ship,))
}
