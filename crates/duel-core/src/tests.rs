//! Tests for the core vocabulary: ship operation rules, overheat
//! hysteresis, explosion one-shot damage, and geometry helpers.

use crate::components::{Bullet, Explosion};
use crate::constants::*;
use crate::enums::ShipSlot;
use crate::ship::Ship;
use crate::types::{normalize_angle, signed_angle, Arena, Position, SimTime};

fn ship_at_center() -> Ship {
    Ship::new(Position::new(400.0, 300.0))
}

// ---- Overheat hysteresis ----

#[test]
fn test_shutdown_triggers_exactly_at_max_heat() {
    let mut ship = ship_at_center();

    ship.add_heat(MAX_HEAT - 0.001);
    assert!(!ship.shutdown, "Just below the cap must not shut down");

    ship.add_heat(0.001);
    assert!(ship.shutdown, "Reaching the cap must shut down");
    assert_eq!(ship.heat, MAX_HEAT, "Heat clamps at the cap");
}

#[test]
fn test_shutdown_recovery_below_seventy_percent() {
    let arena = Arena::default();
    let mut ship = ship_at_center();
    ship.add_heat(MAX_HEAT);
    assert!(ship.shutdown);

    // Dissipate until just above the recovery threshold: still shutdown.
    while ship.heat - HEAT_DISSIPATION_PER_TICK >= MAX_HEAT * SHUTDOWN_RECOVERY_FRACTION {
        ship.integrate(&arena);
        assert!(
            ship.shutdown,
            "Must stay shutdown at heat {} (threshold {})",
            ship.heat,
            MAX_HEAT * SHUTDOWN_RECOVERY_FRACTION
        );
    }

    // One more dissipation tick crosses the threshold.
    ship.integrate(&arena);
    assert!(!ship.shutdown, "Must recover below 70% of max heat");
}

#[test]
fn test_no_recovery_at_epsilon_below_max() {
    let arena = Arena::default();
    let mut ship = ship_at_center();
    ship.add_heat(MAX_HEAT);

    ship.integrate(&arena);
    assert!(
        ship.shutdown,
        "A single dissipation tick (heat {}) must not clear shutdown",
        ship.heat
    );
}

// ---- Shutdown gating ----

#[test]
fn test_shutdown_gates_all_commands() {
    let mut ship = ship_at_center();
    ship.add_heat(MAX_HEAT);

    let angle = ship.angle;
    let turret = ship.turret_angle;
    let speed = ship.speed;
    let heat = ship.heat;

    ship.rotate(1.0);
    ship.rotate_turret(-1.0);
    ship.set_turret_angle(1.5);
    ship.accelerate();
    ship.set_overburn(true);
    let shot = ship.try_shoot(100.0, 0.0);

    assert_eq!(ship.angle, angle);
    assert_eq!(ship.turret_angle, turret);
    assert_eq!(ship.speed, speed);
    assert!(!ship.overburn);
    assert!(shot.is_none(), "Shutdown ship must not fire");
    assert_eq!(ship.heat, heat, "Gated commands must not generate heat");
}

#[test]
fn test_shutdown_still_allows_disabling_overburn() {
    let mut ship = ship_at_center();
    ship.set_overburn(true);
    assert!(ship.overburn);

    ship.add_heat(MAX_HEAT);
    ship.set_overburn(false);
    assert!(!ship.overburn, "Disabling overburn is allowed while shutdown");
}

// ---- Movement ----

#[test]
fn test_accelerate_clamps_at_max_speed() {
    let mut ship = ship_at_center();
    for _ in 0..200 {
        ship.accelerate();
    }
    assert_eq!(ship.speed, MAX_SPEED);
}

#[test]
fn test_overburn_raises_speed_cap_and_heats() {
    let mut ship = ship_at_center();
    ship.set_overburn(true);

    ship.accelerate();
    assert!(ship.heat > 0.0, "Overburn thrust must generate heat");

    for _ in 0..200 {
        ship.heat = 0.0; // keep the reactor clear for the speed assertion
        ship.accelerate();
    }
    assert_eq!(ship.speed, MAX_SPEED * OVERBURN_SPEED_MULTIPLIER);
}

#[test]
fn test_friction_zeroes_small_speeds() {
    let arena = Arena::default();
    let mut ship = ship_at_center();
    ship.speed = SPEED_EPSILON;

    ship.integrate(&arena);
    assert_eq!(ship.speed, 0.0, "Speeds below epsilon must snap to zero");
}

#[test]
fn test_integrate_moves_along_heading() {
    let arena = Arena::default();
    let mut ship = ship_at_center();
    ship.angle = 0.0;
    ship.speed = 2.0;

    ship.integrate(&arena);
    assert!((ship.pos.x - (400.0 + 2.0 * FRICTION)).abs() < 1e-12);
    assert_eq!(ship.pos.y, 300.0);
}

#[test]
fn test_toroidal_wrap() {
    let arena = Arena::default();
    let mut ship = Ship::new(Position::new(1.0, 300.0));
    ship.angle = std::f64::consts::PI; // heading left
    ship.speed = 3.0;

    ship.integrate(&arena);
    assert_eq!(
        ship.pos.x, arena.width,
        "Exiting the left edge wraps to the right edge"
    );
}

#[test]
fn test_brake_then_reverse() {
    let mut ship = ship_at_center();
    ship.speed = 4.0;

    ship.brake();
    assert!((ship.speed - 4.0 * BRAKE_FACTOR).abs() < 1e-12);

    ship.speed = 0.0;
    ship.brake();
    assert_eq!(ship.speed, -REVERSE_SPEED);
}

// ---- Shooting ----

#[test]
fn test_shot_cooldown() {
    let mut ship = ship_at_center();

    assert!(ship.try_shoot(0.0, PLAYER_SHOT_COOLDOWN_SECS).is_some());
    assert!(
        ship.try_shoot(0.1, PLAYER_SHOT_COOLDOWN_SECS).is_none(),
        "Second shot inside the cooldown window must be suppressed"
    );
    assert!(ship.try_shoot(0.25, PLAYER_SHOT_COOLDOWN_SECS).is_some());
}

#[test]
fn test_shot_spawns_at_muzzle_and_heats() {
    let mut ship = ship_at_center();
    ship.turret_angle = 0.0;

    let spawn = ship.try_shoot(0.0, 0.0).expect("shot");
    assert!((spawn.pos.x - (400.0 + SHIP_RADIUS)).abs() < 1e-12);
    assert_eq!(spawn.pos.y, 300.0);
    assert_eq!(spawn.angle, 0.0);
    assert_eq!(spawn.damage_multiplier, 1.0);
    assert_eq!(ship.heat, HEAT_PER_SHOT);
}

#[test]
fn test_overburn_shot_tagged_with_multiplier() {
    let mut ship = ship_at_center();
    ship.set_overburn(true);

    let spawn = ship.try_shoot(0.0, 0.0).expect("shot");
    assert_eq!(spawn.damage_multiplier, OVERBURN_DAMAGE_MULTIPLIER);
}

#[test]
fn test_firing_into_shutdown_still_releases_round() {
    // Heat cost lands after the shutdown check: the shot that trips the
    // reactor still leaves the barrel.
    let mut ship = ship_at_center();
    ship.heat = MAX_HEAT - 1.0;

    let spawn = ship.try_shoot(0.0, 0.0);
    assert!(spawn.is_some());
    assert!(ship.shutdown, "Shot heat must trip the reactor");
}

// ---- Damage ----

#[test]
fn test_damage_clamps_at_zero() {
    let mut ship = ship_at_center();
    ship.apply_damage(250.0);
    assert_eq!(ship.health, 0.0);
    assert!(ship.is_destroyed());
}

// ---- Bullets ----

#[test]
fn test_bullet_advance_and_bounds() {
    let arena = Arena::default();
    let spawn = ship_at_center().try_shoot(0.0, 0.0).expect("shot");
    let mut bullet = Bullet::from_spawn(spawn, ShipSlot::Player);

    let x0 = bullet.pos.x;
    bullet.advance();
    assert!((bullet.pos.x - (x0 + BULLET_SPEED)).abs() < 1e-12);
    assert!(!bullet.is_out_of_bounds(&arena));

    bullet.pos.x = arena.width + 1.0;
    assert!(bullet.is_out_of_bounds(&arena));
}

// ---- Explosions ----

#[test]
fn test_explosion_damage_pass_claimed_once() {
    let mut explosion = Explosion::impact_at(Position::new(100.0, 100.0));
    assert!(explosion.claim_damage_pass());
    assert!(!explosion.claim_damage_pass());
    assert!(!explosion.claim_damage_pass());
}

#[test]
fn test_explosion_damage_falloff() {
    let explosion = Explosion::destruction_at(Position::new(0.0, 0.0));

    let (at_center, ratio_center) = explosion.damage_at(0.0).expect("in radius");
    assert_eq!(at_center, EXPLOSION_MAX_DAMAGE);
    assert_eq!(ratio_center, 1.0);

    let (at_half, _) = explosion.damage_at(EXPLOSION_DAMAGE_RADIUS / 2.0).expect("in radius");
    assert_eq!(at_half, (EXPLOSION_MAX_DAMAGE / 2.0).floor());

    assert!(explosion.damage_at(EXPLOSION_DAMAGE_RADIUS).is_none());
}

#[test]
fn test_explosion_lifecycle() {
    let mut explosion = Explosion::collision_at(Position::new(0.0, 0.0));
    assert_eq!(explosion.current_radius(), EXPLOSION_INITIAL_RADIUS);

    for _ in 0..COLLISION_EXPLOSION_TICKS {
        assert!(!explosion.expired());
        explosion.advance();
    }
    assert!(explosion.expired());
    assert_eq!(explosion.current_radius(), COLLISION_EXPLOSION_RADIUS);
}

// ---- Geometry helpers ----

#[test]
fn test_normalize_angle() {
    assert!((normalize_angle(-0.1) - (std::f64::consts::TAU - 0.1)).abs() < 1e-12);
    assert!((normalize_angle(std::f64::consts::TAU + 0.5) - 0.5).abs() < 1e-12);
}

#[test]
fn test_signed_angle() {
    assert!((signed_angle(3.5 * std::f64::consts::PI) - (-0.5 * std::f64::consts::PI)).abs() < 1e-9);
    assert!((signed_angle(0.25) - 0.25).abs() < 1e-12);
}

#[test]
fn test_sim_time_advance() {
    let mut time = SimTime::default();
    for _ in 0..TICK_RATE {
        time.advance();
    }
    assert_eq!(time.tick, TICK_RATE as u64);
    assert!((time.elapsed_secs - 1.0).abs() < 1e-9);
}

#[test]
fn test_slot_opponent_pairing() {
    assert_eq!(ShipSlot::Player.opponent(), ShipSlot::Ai);
    assert_eq!(ShipSlot::Ai.opponent(), ShipSlot::Player);
    assert_eq!(ShipSlot::Player.opponent().index(), 1);
}
