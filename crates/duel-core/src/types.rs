//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{ARENA_HEIGHT, ARENA_WIDTH, TICK_RATE};

/// 2D position in arena space. x grows right, y grows down,
/// matching the rendering surface the snapshot is drawn onto.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn range_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Absolute angle from this position to another, in radians.
    pub fn angle_to(&self, other: &Position) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    pub fn to_vec2(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn from_vec2(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// Arena dimensions, queryable by pilot scripts through the capability API.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f64 {
        1.0 / TICK_RATE as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Normalize an angle into [0, 2π).
pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(std::f64::consts::TAU)
}

/// Normalize an angle into [-π, π].
pub fn signed_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(std::f64::consts::TAU);
    if a > std::f64::consts::PI {
        a - std::f64::consts::TAU
    } else {
        a
    }
}
