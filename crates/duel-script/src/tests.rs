//! Tests for the scripting sandbox: load contract, fault containment,
//! capability gating, and the sensor cone.

use duel_core::constants::{
    MAX_HEAT, OVERBURN_DAMAGE_MULTIPLIER, ROTATION_SPEED, SCRIPT_SHOT_COOLDOWN_SECS,
};
use duel_core::ship::Ship;
use duel_core::types::Position;

use crate::api::{scan_for_enemy, ControlContext, OpponentTelemetry};
use crate::error::ScriptError;
use crate::host::ScriptHost;

fn ctx_at(now_secs: f64) -> ControlContext {
    ControlContext {
        now_secs,
        ..ControlContext::default()
    }
}

// ---- Load contract ----

#[test]
fn test_empty_source_rejected_without_clearing_binding() {
    let mut host = ScriptHost::new();
    host.load("fn run_ai(ship, api) { api.thrust(); }")
        .expect("valid script");
    assert!(host.is_loaded());

    let err = host.load("   \n\t  ").unwrap_err();
    assert!(matches!(err, ScriptError::EmptySource));
    assert!(
        host.is_loaded(),
        "Empty input must leave the previous routine in place"
    );
}

#[test]
fn test_empty_source_rejected_when_nothing_loaded() {
    let mut host = ScriptHost::new();
    let err = host.load("").unwrap_err();
    assert!(matches!(err, ScriptError::EmptySource));
    assert!(!host.is_loaded());
}

#[test]
fn test_compile_error_reported_and_binding_cleared() {
    let mut host = ScriptHost::new();
    host.load("fn run_ai(ship, api) { api.thrust(); }")
        .expect("valid script");

    let err = host.load("fn run_ai(ship api) {").unwrap_err();
    assert!(matches!(err, ScriptError::Compile(_)));
    assert!(!host.is_loaded(), "Malformed source must clear the binding");

    // With nothing bound the AI ship simply receives no control input.
    let outcome = host.run_tick(ctx_at(0.0)).expect("no fault");
    assert!(outcome.is_none());
}

#[test]
fn test_reload_replaces_routine_wholesale() {
    let mut host = ScriptHost::new();
    host.load("fn run_ai(ship, api) { api.turn_left(); }")
        .expect("valid script");
    host.load("fn run_ai(ship, api) { api.turn_right(); }")
        .expect("valid script");

    let outcome = host.run_tick(ctx_at(0.0)).expect("no fault").expect("bound");
    let baseline = ControlContext::default().ship;
    assert!(
        (outcome.ship.angle - (baseline.angle + ROTATION_SPEED)).abs() < 1e-12,
        "Only the second routine should have run"
    );
}

// ---- Entry point ----

#[test]
fn test_missing_entry_point_faults_on_first_call_and_clears() {
    let mut host = ScriptHost::new();
    host.load("fn not_the_entry(ship, api) { api.thrust(); }")
        .expect("compiles fine");
    assert!(host.is_loaded());

    let err = host.run_tick(ctx_at(0.0)).unwrap_err();
    assert!(matches!(err, ScriptError::MissingEntryPoint(_)));
    assert!(!host.is_loaded(), "Routine must be cleared after the fault");

    // Subsequent ticks are quiet no-ops.
    let outcome = host.run_tick(ctx_at(1.0)).expect("no fault");
    assert!(outcome.is_none());
}

// ---- Fault containment ----

#[test]
fn test_fault_on_third_invocation_disables_routine() {
    let mut host = ScriptHost::new();
    host.load(
        r#"
        fn run_ai(ship, api) {
            let calls = ship.recall("calls", 0) + 1;
            ship.remember("calls", calls);
            if calls >= 3 {
                throw "pilot panic";
            }
            api.thrust();
        }
        "#,
    )
    .expect("valid script");

    assert!(host.run_tick(ctx_at(0.0)).expect("tick 1").is_some());
    assert!(host.run_tick(ctx_at(0.1)).expect("tick 2").is_some());

    let err = host.run_tick(ctx_at(0.2)).unwrap_err();
    assert!(matches!(err, ScriptError::Runtime(_)));
    assert!(!host.is_loaded());

    // Invocation 4 never reaches script code.
    assert!(host.run_tick(ctx_at(0.3)).expect("no fault").is_none());
}

#[test]
fn test_undefined_helper_call_is_runtime_fault() {
    let mut host = ScriptHost::new();
    host.load("fn run_ai(ship, api) { run_ai_helper(); }")
        .expect("compiles fine");

    // The entry point exists; the missing function is something it calls.
    let err = host.run_tick(ctx_at(0.0)).unwrap_err();
    assert!(matches!(err, ScriptError::Runtime(_)));
}

#[test]
fn test_runaway_loop_cut_off_as_runtime_fault() {
    let mut host = ScriptHost::new();
    host.load("fn run_ai(ship, api) { loop { } }")
        .expect("valid script");

    let err = host.run_tick(ctx_at(0.0)).unwrap_err();
    assert!(matches!(err, ScriptError::Runtime(_)));
    assert!(!host.is_loaded());
}

#[test]
fn test_faulting_invocation_discards_partial_commands() {
    let mut host = ScriptHost::new();
    host.load(
        r#"
        fn run_ai(ship, api) {
            api.shoot();
            throw "after the trigger";
        }
        "#,
    )
    .expect("valid script");

    let err = host.run_tick(ctx_at(0.0)).unwrap_err();
    assert!(matches!(err, ScriptError::Runtime(_)));
    // The caller never sees the outcome of a failed frame, so the shot
    // request dies with it; nothing asserts here beyond the fail-stop.
    assert!(!host.is_loaded());
}

// ---- Memory ----

#[test]
fn test_memory_persists_across_invocations() {
    let mut host = ScriptHost::new();
    host.load(
        r#"
        fn run_ai(ship, api) {
            let n = ship.recall("n", 0) + 1;
            ship.remember("n", n);
            if n == 3 {
                api.thrust();
            }
        }
        "#,
    )
    .expect("valid script");

    let baseline_speed = ControlContext::default().ship.speed;
    for tick in 0..2 {
        let outcome = host
            .run_tick(ctx_at(tick as f64))
            .expect("no fault")
            .expect("bound");
        assert_eq!(outcome.ship.speed, baseline_speed);
    }

    let outcome = host.run_tick(ctx_at(2.0)).expect("no fault").expect("bound");
    assert!(
        outcome.ship.speed > baseline_speed,
        "Third invocation should see the counter reach 3 and thrust"
    );
}

// ---- Commands ----

#[test]
fn test_commands_drive_ship_operations() {
    let mut host = ScriptHost::new();
    host.load(
        r#"
        fn run_ai(ship, api) {
            api.turn_right();
            api.set_turret_angle(90);
            api.thrust();
            api.shoot();
        }
        "#,
    )
    .expect("valid script");

    let outcome = host.run_tick(ctx_at(0.0)).expect("no fault").expect("bound");
    let baseline = ControlContext::default().ship;

    assert!((outcome.ship.angle - (baseline.angle + ROTATION_SPEED)).abs() < 1e-12);
    assert!((outcome.ship.turret_angle - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    assert!(outcome.ship.speed > baseline.speed);
    assert_eq!(outcome.shots.len(), 1);
    assert_eq!(outcome.shots[0].damage_multiplier, 1.0);
}

#[test]
fn test_script_shot_cooldown_longer_than_player() {
    let mut host = ScriptHost::new();
    host.load("fn run_ai(ship, api) { api.shoot(); }")
        .expect("valid script");

    let mut ship = ControlContext::default().ship;

    // First call fires.
    let ctx = ControlContext {
        ship: ship.clone(),
        ..ctx_at(0.0)
    };
    let outcome = host.run_tick(ctx).expect("no fault").expect("bound");
    assert_eq!(outcome.shots.len(), 1);
    ship = outcome.ship;

    // 0.3s later: inside the script cooldown (though past the player's).
    let ctx = ControlContext {
        ship: ship.clone(),
        ..ctx_at(0.3)
    };
    let outcome = host.run_tick(ctx).expect("no fault").expect("bound");
    assert!(outcome.shots.is_empty(), "0.3s is inside the 0.5s cooldown");
    ship = outcome.ship;

    // Past the cooldown.
    let ctx = ControlContext {
        ship,
        ..ctx_at(SCRIPT_SHOT_COOLDOWN_SECS + 0.01)
    };
    let outcome = host.run_tick(ctx).expect("no fault").expect("bound");
    assert_eq!(outcome.shots.len(), 1);
}

#[test]
fn test_overburn_shot_carries_multiplier() {
    let mut host = ScriptHost::new();
    host.load(
        r#"
        fn run_ai(ship, api) {
            api.enable_overburn();
            api.shoot();
        }
        "#,
    )
    .expect("valid script");

    let outcome = host.run_tick(ctx_at(0.0)).expect("no fault").expect("bound");
    assert_eq!(outcome.shots.len(), 1);
    assert_eq!(outcome.shots[0].damage_multiplier, OVERBURN_DAMAGE_MULTIPLIER);
}

#[test]
fn test_shutdown_ship_ignores_script_commands() {
    let mut host = ScriptHost::new();
    host.load(
        r#"
        fn run_ai(ship, api) {
            api.turn_left();
            api.thrust();
            api.set_overburn(true);
            api.shoot();
            ship.remember("saw_shutdown", ship.is_shutdown);
        }
        "#,
    )
    .expect("valid script");

    let mut ctx = ctx_at(0.0);
    ctx.ship.add_heat(MAX_HEAT);
    let before = ctx.ship.clone();

    let outcome = host.run_tick(ctx).expect("no fault").expect("bound");
    assert_eq!(outcome.ship.angle, before.angle);
    assert_eq!(outcome.ship.speed, before.speed);
    assert!(!outcome.ship.overburn);
    assert!(outcome.shots.is_empty());
}

// ---- Sensor ----

#[test]
fn test_scan_detects_opponent_dead_ahead() {
    let mut ship = Ship::new(Position::new(100.0, 100.0));
    ship.turret_angle = 0.0;
    let opponent = OpponentTelemetry {
        pos: Position::new(200.0, 100.0),
        speed: 2.5,
    };

    let contact = scan_for_enemy(&ship, &opponent).expect("in cone");
    assert!((contact.distance - 100.0).abs() < 1e-12);
    assert_eq!(contact.angle, 0.0);
    assert_eq!(contact.pos, opponent.pos);
    assert_eq!(contact.speed, 2.5);
}

#[test]
fn test_scan_cone_boundary() {
    let mut ship = Ship::new(Position::new(0.0, 0.0));
    ship.turret_angle = 0.0;

    // Just inside the 45° half-angle.
    let inside = OpponentTelemetry {
        pos: Position::new(100.0, 99.0),
        speed: 0.0,
    };
    assert!(scan_for_enemy(&ship, &inside).is_some());

    // Just outside.
    let outside = OpponentTelemetry {
        pos: Position::new(100.0, 101.0),
        speed: 0.0,
    };
    assert!(scan_for_enemy(&ship, &outside).is_none());
}

#[test]
fn test_scan_bearing_is_turret_relative() {
    let mut ship = Ship::new(Position::new(0.0, 0.0));
    // Turret pointing up-left; opponent to the right: way outside.
    ship.turret_angle = std::f64::consts::PI;
    let opponent = OpponentTelemetry {
        pos: Position::new(100.0, 0.0),
        speed: 0.0,
    };
    assert!(scan_for_enemy(&ship, &opponent).is_none());

    // Swing the turret onto the target.
    ship.turret_angle = 0.3;
    let contact = scan_for_enemy(&ship, &opponent).expect("in cone");
    assert!((contact.angle - (-0.3)).abs() < 1e-12);
}

#[test]
fn test_scan_through_script_reports_cone_state() {
    let mut host = ScriptHost::new();
    host.load(
        r#"
        fn run_ai(ship, api) {
            let target = api.scan_enemy();
            if target != () {
                ship.remember("distance", target.distance);
            }
        }
        "#,
    )
    .expect("valid script");

    // No opponent: scan performed, nothing acquired.
    let outcome = host.run_tick(ctx_at(0.0)).expect("no fault").expect("bound");
    assert_eq!(outcome.scan, Some(false));

    // Opponent dead ahead of the turret.
    let mut ctx = ctx_at(1.0);
    ctx.ship.turret_angle = 0.0;
    ctx.opponent = Some(OpponentTelemetry {
        pos: Position::new(ctx.ship.pos.x + 50.0, ctx.ship.pos.y),
        speed: 1.0,
    });
    let outcome = host.run_tick(ctx).expect("no fault").expect("bound");
    assert_eq!(outcome.scan, Some(true));
}

#[test]
fn test_no_scan_leaves_cone_unreported() {
    let mut host = ScriptHost::new();
    host.load("fn run_ai(ship, api) { api.thrust(); }")
        .expect("valid script");

    let outcome = host.run_tick(ctx_at(0.0)).expect("no fault").expect("bound");
    assert_eq!(outcome.scan, None);
}

// ---- Telemetry ----

#[test]
fn test_telemetry_getters_match_ship_state() {
    let mut host = ScriptHost::new();
    host.load(
        r#"
        fn run_ai(ship, api) {
            ship.remember("x", ship.x);
            ship.remember("heat", ship.heat);
            ship.remember("w", api.arena_width());
            ship.remember("h", api.arena_height());
        }
        "#,
    )
    .expect("valid script");

    let mut ctx = ctx_at(0.0);
    ctx.ship.pos.x = 123.0;
    ctx.ship.heat = 40.0;
    host.run_tick(ctx).expect("no fault").expect("bound");

    // Round-trip the values through a second invocation.
    host.load(
        r#"
        fn run_ai(ship, api) {
            if ship.recall("x") != 123.0 { throw "bad x"; }
            if ship.recall("heat") != 40.0 { throw "bad heat"; }
            if ship.recall("w") != 800.0 { throw "bad width"; }
            if ship.recall("h") != 600.0 { throw "bad height"; }
        }
        "#,
    )
    .expect("valid script");
    host.run_tick(ctx_at(1.0)).expect("telemetry mismatch");
}
