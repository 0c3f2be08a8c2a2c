//! Cleanup system: sweeps destroyed ships off the field.

use hecs::World;

use duel_core::components::Explosion;
use duel_core::enums::ShipSlot;
use duel_core::events::Alert;
use duel_core::ship::Ship;
use duel_core::types::SimTime;

use crate::engine::ShipSlots;

/// Despawn any ship whose health has reached zero, regardless of what
/// dealt the final blow, leaving a destruction blast in its place.
pub fn run(world: &mut World, ships: &mut ShipSlots, time: &SimTime, alerts: &mut Vec<Alert>) {
    for slot in [ShipSlot::Player, ShipSlot::Ai] {
        let Some(entity) = ships[slot.index()] else {
            continue;
        };
        let pos = {
            let Ok(ship) = world.query_one_mut::<&Ship>(entity) else {
                continue;
            };
            if !ship.is_destroyed() {
                continue;
            }
            ship.pos
        };

        world.spawn((Explosion::destruction_at(pos),));
        let _ = world.despawn(entity);
        ships[slot.index()] = None;

        let name = match slot {
            ShipSlot::Player => "player",
            ShipSlot::Ai => "AI",
        };
        alerts.push(Alert::critical(format!("{name} ship destroyed"), time.tick));
    }
}
