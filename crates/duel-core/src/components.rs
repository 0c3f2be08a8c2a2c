//! ECS components for projectiles and effects.
//!
//! These are simple state containers with their own per-tick mutation
//! rules; cross-entity logic (collision, damage application) lives in the
//! simulation systems.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::ShipSlot;
use crate::ship::BulletSpawn;
use crate::types::{Arena, Position};

/// A cannon round in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Position,
    pub angle: f64,
    pub speed: f64,
    pub radius: f64,
    /// Firing ship, for render attribution.
    pub owner: ShipSlot,
    /// 1.0 normally, OVERBURN_DAMAGE_MULTIPLIER if fired while overburning.
    pub damage_multiplier: f64,
}

impl Bullet {
    pub fn from_spawn(spawn: BulletSpawn, owner: ShipSlot) -> Self {
        Self {
            pos: spawn.pos,
            angle: spawn.angle,
            speed: BULLET_SPEED,
            radius: BULLET_RADIUS,
            owner,
            damage_multiplier: spawn.damage_multiplier,
        }
    }

    /// Advance along the heading by one tick.
    pub fn advance(&mut self) {
        self.pos.x += self.angle.cos() * self.speed;
        self.pos.y += self.angle.sin() * self.speed;
    }

    pub fn is_out_of_bounds(&self, arena: &Arena) -> bool {
        self.pos.x < 0.0 || self.pos.x > arena.width || self.pos.y < 0.0 || self.pos.y > arena.height
    }
}

/// An expanding blast. Visual growth and area damage use separate radii;
/// damage is applied exactly once per instance regardless of how many
/// ticks observe it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Position,
    pub age: u32,
    pub duration: u32,
    pub initial_radius: f64,
    pub max_radius: f64,
    pub damage_radius: f64,
    pub max_damage: f64,
    damage_done: bool,
}

impl Explosion {
    pub fn new(pos: Position, max_radius: f64, duration: u32) -> Self {
        Self {
            pos,
            age: 0,
            duration,
            initial_radius: EXPLOSION_INITIAL_RADIUS,
            max_radius,
            damage_radius: EXPLOSION_DAMAGE_RADIUS,
            max_damage: EXPLOSION_MAX_DAMAGE,
            damage_done: false,
        }
    }

    /// Small blast where two hulls ground against each other.
    pub fn collision_at(pos: Position) -> Self {
        Self::new(pos, COLLISION_EXPLOSION_RADIUS, COLLISION_EXPLOSION_TICKS)
    }

    /// Small blast at a bullet impact point.
    pub fn impact_at(pos: Position) -> Self {
        Self::new(pos, IMPACT_EXPLOSION_RADIUS, IMPACT_EXPLOSION_TICKS)
    }

    /// Large blast marking a ship's destruction.
    pub fn destruction_at(pos: Position) -> Self {
        Self::new(pos, DESTRUCTION_EXPLOSION_RADIUS, DESTRUCTION_EXPLOSION_TICKS)
    }

    /// Claim the single damage pass. Returns true only on the first call.
    pub fn claim_damage_pass(&mut self) -> bool {
        if self.damage_done {
            return false;
        }
        self.damage_done = true;
        true
    }

    /// Damage and push ratio for a ship at the given distance, or None
    /// outside the damage radius. Damage falls off linearly and is floored
    /// to integer granularity.
    pub fn damage_at(&self, distance: f64) -> Option<(f64, f64)> {
        if distance >= self.damage_radius {
            return None;
        }
        let ratio = 1.0 - distance / self.damage_radius;
        Some(((self.max_damage * ratio).floor(), ratio))
    }

    pub fn advance(&mut self) {
        self.age += 1;
    }

    pub fn expired(&self) -> bool {
        self.age >= self.duration
    }

    /// Current visual radius for rendering.
    pub fn current_radius(&self) -> f64 {
        let progress = self.progress();
        self.initial_radius + (self.max_radius - self.initial_radius) * progress
    }

    /// Animation progress in [0, 1].
    pub fn progress(&self) -> f64 {
        (self.age as f64 / self.duration as f64).min(1.0)
    }
}

/// Short-lived cosmetic spark. Never affects simulation state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Position,
    pub vel: DVec2,
    pub radius: f64,
    /// HSL hue in degrees for rendering.
    pub hue: f64,
    pub age: u32,
    pub lifetime: u32,
}

impl Particle {
    pub fn advance(&mut self) {
        self.pos.x += self.vel.x;
        self.pos.y += self.vel.y;
        self.age += 1;
    }

    pub fn expired(&self) -> bool {
        self.age >= self.lifetime
    }
}
