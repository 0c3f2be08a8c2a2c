//! Control system: keyboard input drives the player ship, the pilot
//! script drives the AI ship.
//!
//! Both channels go through the same `Ship` operations, so shutdown
//! gating and cooldowns cannot diverge between them.

use hecs::World;

use duel_core::commands::InputState;
use duel_core::components::Bullet;
use duel_core::constants::PLAYER_SHOT_COOLDOWN_SECS;
use duel_core::enums::ShipSlot;
use duel_core::events::Alert;
use duel_core::ship::Ship;
use duel_core::types::{Arena, SimTime};
use duel_script::{ControlContext, OpponentTelemetry, ScriptError, ScriptHost};

use crate::engine::ShipSlots;

/// Apply both control channels for this tick. Returns the scan cone state
/// when the pilot script queried its sensor.
pub fn run(
    world: &mut World,
    ships: &ShipSlots,
    input: &InputState,
    script: &mut ScriptHost,
    arena: &Arena,
    time: &SimTime,
    alerts: &mut Vec<Alert>,
) -> Option<bool> {
    run_player_input(world, ships, input, time);
    run_pilot_script(world, ships, script, arena, time, alerts)
}

fn run_player_input(world: &mut World, ships: &ShipSlots, input: &InputState, time: &SimTime) {
    let Some(entity) = ships[ShipSlot::Player.index()] else {
        return;
    };
    let Ok(ship) = world.query_one_mut::<&mut Ship>(entity) else {
        return;
    };

    if input.left {
        ship.rotate(-1.0);
    }
    if input.right {
        ship.rotate(1.0);
    }
    if input.turret_left {
        ship.rotate_turret(-1.0);
    }
    if input.turret_right {
        ship.rotate_turret(1.0);
    }
    if input.forward {
        ship.accelerate();
    }
    if input.back {
        ship.brake();
    }
    // Overburn follows the key level, not edges.
    ship.set_overburn(input.overburn);

    let spawn = if input.shoot {
        ship.try_shoot(time.elapsed_secs, PLAYER_SHOT_COOLDOWN_SECS)
    } else {
        None
    };

    if let Some(spawn) = spawn {
        world.spawn((Bullet::from_spawn(spawn, ShipSlot::Player),));
    }
}

/// Run one pilot script invocation against a copy of the AI ship, then
/// commit the result. A faulting invocation commits nothing: the frame is
/// atomic from the simulation's point of view.
fn run_pilot_script(
    world: &mut World,
    ships: &ShipSlots,
    script: &mut ScriptHost,
    arena: &Arena,
    time: &SimTime,
    alerts: &mut Vec<Alert>,
) -> Option<bool> {
    let Some(entity) = ships[ShipSlot::Ai.index()] else {
        return None;
    };
    if !script.is_loaded() {
        return None;
    }

    let ai_ship = match world.query_one_mut::<&mut Ship>(entity) {
        Ok(ship) => ship.clone(),
        Err(_) => return None,
    };
    let opponent = ships[ShipSlot::Player.index()].and_then(|player| {
        world
            .query_one_mut::<&Ship>(player)
            .ok()
            .map(|ship| OpponentTelemetry {
                pos: ship.pos,
                speed: ship.speed,
            })
    });

    let ctx = ControlContext {
        ship: ai_ship,
        opponent,
        arena: *arena,
        now_secs: time.elapsed_secs,
    };

    match script.run_tick(ctx) {
        Ok(Some(outcome)) => {
            if let Ok(ship) = world.query_one_mut::<&mut Ship>(entity) {
                *ship = outcome.ship;
            }
            for spawn in outcome.shots {
                world.spawn((Bullet::from_spawn(spawn, ShipSlot::Ai),));
            }
            outcome.scan
        }
        Ok(None) => None,
        Err(err) => {
            let alert = match err {
                ScriptError::MissingEntryPoint(_) | ScriptError::Runtime(_) => Alert::critical(
                    format!("pilot script disabled: {err}"),
                    time.tick,
                ),
                ScriptError::EmptySource | ScriptError::Compile(_) => {
                    Alert::warning(format!("pilot script error: {err}"), time.tick)
                }
            };
            alerts.push(alert);
            None
        }
    }
}
