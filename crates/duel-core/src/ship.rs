//! Ship state and operation rules.
//!
//! Unlike the pure-data components, the ship carries its operation rules as
//! methods: the overheat gating must live in exactly one place because both
//! the keyboard path and the script capability API drive ships through it.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::{normalize_angle, Arena, Position};

/// A combatant ship. Used directly as an ECS component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Position,
    /// Hull heading in radians, normalized to [0, 2π).
    pub angle: f64,
    /// Turret heading in radians, normalized to [0, 2π).
    pub turret_angle: f64,
    /// Scalar speed along the hull heading. Negative while reversing.
    pub speed: f64,
    /// Hull health, clamped to [0, MAX_HEALTH].
    pub health: f64,
    /// Reactor heat, clamped to [0, MAX_HEAT].
    pub heat: f64,
    pub overburn: bool,
    /// Set when heat reaches MAX_HEAT; cleared once heat falls below
    /// SHUTDOWN_RECOVERY_FRACTION of MAX_HEAT.
    pub shutdown: bool,
    /// Simulation timestamp of the last shot, for cooldown gating.
    pub last_shot_secs: f64,
}

/// A shot request produced by `Ship::try_shoot`, turned into a bullet
/// entity by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BulletSpawn {
    pub pos: Position,
    pub angle: f64,
    pub damage_multiplier: f64,
}

impl Ship {
    pub fn new(pos: Position) -> Self {
        Self {
            pos,
            angle: 0.0,
            turret_angle: 0.0,
            speed: 0.0,
            health: MAX_HEALTH,
            heat: 0.0,
            overburn: false,
            shutdown: false,
            last_shot_secs: f64::NEG_INFINITY,
        }
    }

    pub fn radius(&self) -> f64 {
        SHIP_RADIUS
    }

    /// Rotate the hull. `dir` is -1.0 for left, 1.0 for right.
    /// No-op while shutdown.
    pub fn rotate(&mut self, dir: f64) {
        if self.shutdown {
            return;
        }
        self.angle = normalize_angle(self.angle + ROTATION_SPEED * dir);
    }

    /// Rotate the turret independently of the hull. No-op while shutdown.
    pub fn rotate_turret(&mut self, dir: f64) {
        if self.shutdown {
            return;
        }
        self.turret_angle = normalize_angle(self.turret_angle + TURRET_ROTATION_SPEED * dir);
    }

    /// Point the turret at an absolute angle (radians). No-op while shutdown.
    pub fn set_turret_angle(&mut self, angle: f64) {
        if self.shutdown {
            return;
        }
        self.turret_angle = normalize_angle(angle);
    }

    /// Thrust along the hull heading. Speed clamps at MAX_SPEED, or
    /// MAX_SPEED × OVERBURN_SPEED_MULTIPLIER while overburning, which
    /// also generates extra heat per invocation. No-op while shutdown.
    pub fn accelerate(&mut self) {
        if self.shutdown {
            return;
        }
        self.speed += ACCELERATION;

        let effective_max = if self.overburn {
            MAX_SPEED * OVERBURN_SPEED_MULTIPLIER
        } else {
            MAX_SPEED
        };
        if self.speed > effective_max {
            self.speed = effective_max;
        }

        if self.overburn {
            self.add_heat(OVERBURN_HEAT_PER_TICK);
        }
    }

    /// Brake while moving forward, otherwise reverse slowly.
    /// Keyboard-only; scripts have no reverse gear.
    pub fn brake(&mut self) {
        if self.speed > 0.0 {
            self.speed *= BRAKE_FACTOR;
        } else {
            self.speed = -REVERSE_SPEED;
        }
    }

    /// Toggle overburn. Enabling is a no-op while shutdown; disabling is
    /// always allowed.
    pub fn set_overburn(&mut self, enable: bool) {
        if enable && self.shutdown {
            return;
        }
        self.overburn = enable;
    }

    /// Accumulate heat; hitting the cap trips the reactor into shutdown.
    pub fn add_heat(&mut self, amount: f64) {
        self.heat += amount;
        if self.heat >= MAX_HEAT {
            self.heat = MAX_HEAT;
            self.shutdown = true;
        }
    }

    /// Fire the cannon if the cooldown has elapsed and the ship is not
    /// shutdown. Returns the spawn request for the simulation to realize.
    ///
    /// The cooldown is caller-supplied: the player fires faster than a
    /// script is allowed to.
    pub fn try_shoot(&mut self, now_secs: f64, cooldown_secs: f64) -> Option<BulletSpawn> {
        if self.shutdown {
            return None;
        }
        if now_secs - self.last_shot_secs < cooldown_secs {
            return None;
        }

        let muzzle = Position::new(
            self.pos.x + self.turret_angle.cos() * SHIP_RADIUS,
            self.pos.y + self.turret_angle.sin() * SHIP_RADIUS,
        );
        let damage_multiplier = if self.overburn {
            OVERBURN_DAMAGE_MULTIPLIER
        } else {
            1.0
        };

        self.add_heat(HEAT_PER_SHOT);
        self.last_shot_secs = now_secs;

        Some(BulletSpawn {
            pos: muzzle,
            angle: self.turret_angle,
            damage_multiplier,
        })
    }

    /// Per-tick passive update: friction, motion integration, toroidal
    /// wrap, heat dissipation, and shutdown recovery hysteresis.
    pub fn integrate(&mut self, arena: &Arena) {
        self.speed *= FRICTION;
        if self.speed.abs() < SPEED_EPSILON {
            self.speed = 0.0;
        }

        self.pos.x += self.angle.cos() * self.speed;
        self.pos.y += self.angle.sin() * self.speed;

        if self.pos.x < 0.0 {
            self.pos.x = arena.width;
        }
        if self.pos.x > arena.width {
            self.pos.x = 0.0;
        }
        if self.pos.y < 0.0 {
            self.pos.y = arena.height;
        }
        if self.pos.y > arena.height {
            self.pos.y = 0.0;
        }

        self.heat = (self.heat - HEAT_DISSIPATION_PER_TICK).max(0.0);
        if self.shutdown && self.heat < MAX_HEAT * SHUTDOWN_RECOVERY_FRACTION {
            self.shutdown = false;
        }
    }

    /// Apply damage, clamping health at zero.
    pub fn apply_damage(&mut self, amount: f64) {
        self.health = (self.health - amount).max(0.0);
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0.0
    }
}
