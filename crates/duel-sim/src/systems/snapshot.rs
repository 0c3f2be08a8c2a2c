//! Snapshot system: queries the ECS world and builds a complete
//! MatchSnapshot.
//!
//! This system is read-only — it never modifies the world.

use hecs::{Entity, World};

use duel_core::components::{Bullet, Explosion, Particle};
use duel_core::constants::{MAX_HEAT, SCAN_CONE_HALF_ANGLE, SCAN_CONE_RADIUS};
use duel_core::enums::{MatchOutcome, MatchPhase, ShipSlot};
use duel_core::events::Alert;
use duel_core::ship::Ship;
use duel_core::state::{
    BulletView, ExplosionView, MatchSnapshot, ParticleView, ScanConeView, ShipView,
};
use duel_core::types::{Arena, SimTime};

use crate::engine::ShipSlots;

#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: MatchPhase,
    outcome: Option<MatchOutcome>,
    arena: &Arena,
    ships: &ShipSlots,
    scan: Option<bool>,
    alerts: Vec<Alert>,
) -> MatchSnapshot {
    MatchSnapshot {
        time: *time,
        phase,
        outcome,
        arena: *arena,
        ships: build_ships(world, ships),
        bullets: build_bullets(world),
        explosions: build_explosions(world),
        particles: build_particles(world),
        scan: build_scan_cone(world, ships, scan),
        alerts,
    }
}

fn build_ships(world: &World, ships: &ShipSlots) -> Vec<ShipView> {
    let mut views = Vec::new();
    for slot in [ShipSlot::Player, ShipSlot::Ai] {
        let Some(entity) = ships[slot.index()] else {
            continue;
        };
        let Some(ship) = ship_at(world, entity) else {
            continue;
        };
        views.push(ShipView {
            slot,
            position: ship.pos,
            angle: ship.angle,
            turret_angle: ship.turret_angle,
            speed: ship.speed,
            health: ship.health,
            heat: ship.heat,
            max_heat: MAX_HEAT,
            shutdown: ship.shutdown,
            overburn: ship.overburn,
        });
    }
    views
}

fn ship_at(world: &World, entity: Entity) -> Option<Ship> {
    let mut query = world.query_one::<&Ship>(entity).ok()?;
    query.get().cloned()
}

fn build_bullets(world: &World) -> Vec<BulletView> {
    let mut bullets: Vec<(u32, BulletView)> = world
        .query::<&Bullet>()
        .iter()
        .map(|(entity, bullet)| {
            (
                entity.id(),
                BulletView {
                    position: bullet.pos,
                    angle: bullet.angle,
                    radius: bullet.radius,
                    owner: bullet.owner,
                },
            )
        })
        .collect();
    bullets.sort_by_key(|(id, _)| *id);
    bullets.into_iter().map(|(_, view)| view).collect()
}

fn build_explosions(world: &World) -> Vec<ExplosionView> {
    let mut explosions: Vec<(u32, ExplosionView)> = world
        .query::<&Explosion>()
        .iter()
        .map(|(entity, explosion)| {
            (
                entity.id(),
                ExplosionView {
                    position: explosion.pos,
                    radius: explosion.current_radius(),
                    progress: explosion.progress(),
                },
            )
        })
        .collect();
    explosions.sort_by_key(|(id, _)| *id);
    explosions.into_iter().map(|(_, view)| view).collect()
}

fn build_particles(world: &World) -> Vec<ParticleView> {
    let mut particles: Vec<(u32, ParticleView)> = world
        .query::<&Particle>()
        .iter()
        .map(|(entity, particle)| {
            (
                entity.id(),
                ParticleView {
                    position: particle.pos,
                    radius: particle.radius,
                    hue: particle.hue,
                },
            )
        })
        .collect();
    particles.sort_by_key(|(id, _)| *id);
    particles.into_iter().map(|(_, view)| view).collect()
}

/// Overlay for the AI ship's sensor cone, present only on ticks where the
/// pilot script actually scanned.
fn build_scan_cone(world: &World, ships: &ShipSlots, scan: Option<bool>) -> Option<ScanConeView> {
    let detected = scan?;
    let entity = ships[ShipSlot::Ai.index()]?;
    let ship = ship_at(world, entity)?;
    Some(ScanConeView {
        origin: ship.pos,
        turret_angle: ship.turret_angle,
        half_angle: SCAN_CONE_HALF_ANGLE,
        radius: SCAN_CONE_RADIUS,
        detected,
    })
}
