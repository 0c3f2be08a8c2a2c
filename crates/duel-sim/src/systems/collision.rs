//! Collision system: hull-to-hull ramming and arena wall clamping.

use glam::DVec2;
use hecs::World;

use duel_core::components::Explosion;
use duel_core::constants::{
    BOUNCE_SPEED_TRANSFER, RAM_BASE_DAMAGE, RAM_SPEED_DAMAGE_FACTOR, WALL_SPEED_FACTOR,
};
use duel_core::ship::Ship;
use duel_core::types::{Arena, Position};

use crate::engine::ShipSlots;

pub fn run(world: &mut World, ships: &ShipSlots, arena: &Arena) {
    resolve_ram(world, ships);
    clamp_to_walls(world, ships, arena);
}

/// Resolve hull contact between the two ships: ram damage on both,
/// symmetric separation along the contact normal, a lossy speed exchange,
/// and a small blast at the contact midpoint.
fn resolve_ram(world: &mut World, ships: &ShipSlots) {
    let (Some(a), Some(b)) = (ships[0], ships[1]) else {
        return;
    };
    let Ok(sa) = world.query_one_mut::<&Ship>(a) else {
        return;
    };
    let mut ship_a = sa.clone();
    let Ok(sb) = world.query_one_mut::<&Ship>(b) else {
        return;
    };
    let mut ship_b = sb.clone();

    let min_dist = ship_a.radius() + ship_b.radius();
    let dist = ship_a.pos.range_to(&ship_b.pos);
    if dist >= min_dist {
        return;
    }

    // Contact normal from A to B; arbitrary axis if the centers coincide.
    let normal = if dist > f64::EPSILON {
        (ship_b.pos.to_vec2() - ship_a.pos.to_vec2()) / dist
    } else {
        DVec2::X
    };
    let midpoint = Position::from_vec2((ship_a.pos.to_vec2() + ship_b.pos.to_vec2()) * 0.5);

    // Signed maximum: a reversing ship contributes nothing (or a small
    // rebate) to the ram damage.
    let impact_speed = ship_a.speed.max(ship_b.speed);
    let damage = RAM_BASE_DAMAGE + (RAM_SPEED_DAMAGE_FACTOR * impact_speed).floor();
    ship_a.apply_damage(damage);
    ship_b.apply_damage(damage);

    let push = (min_dist - dist) / 2.0;
    ship_a.pos = Position::from_vec2(ship_a.pos.to_vec2() - normal * push);
    ship_b.pos = Position::from_vec2(ship_b.pos.to_vec2() + normal * push);

    let (va, vb) = (ship_a.speed, ship_b.speed);
    ship_a.speed = vb * BOUNCE_SPEED_TRANSFER;
    ship_b.speed = va * BOUNCE_SPEED_TRANSFER;

    if let Ok(ship) = world.query_one_mut::<&mut Ship>(a) {
        *ship = ship_a;
    }
    if let Ok(ship) = world.query_one_mut::<&mut Ship>(b) {
        *ship = ship_b;
    }
    world.spawn((Explosion::collision_at(midpoint),));
}

/// Clamp ships against the arena walls, bleeding off speed on contact.
fn clamp_to_walls(world: &mut World, ships: &ShipSlots, arena: &Arena) {
    for entity in ships.iter().flatten() {
        let Ok(ship) = world.query_one_mut::<&mut Ship>(*entity) else {
            continue;
        };
        let r = ship.radius();
        if ship.pos.x < r {
            ship.pos.x = r;
            ship.speed *= WALL_SPEED_FACTOR;
        }
        if ship.pos.x > arena.width - r {
            ship.pos.x = arena.width - r;
            ship.speed *= WALL_SPEED_FACTOR;
        }
        if ship.pos.y < r {
            ship.pos.y = r;
            ship.speed *= WALL_SPEED_FACTOR;
        }
        if ship.pos.y > arena.height - r {
            ship.pos.y = arena.height - r;
            ship.speed *= WALL_SPEED_FACTOR;
        }
    }
}
