//! Match snapshot — the complete visible state handed to the renderer each
//! tick. This is the entire rendering contract: the frontend draws from it
//! and never touches the ECS world.

use serde::{Deserialize, Serialize};

use crate::enums::{MatchOutcome, MatchPhase, ShipSlot};
use crate::events::Alert;
use crate::types::{Arena, Position, SimTime};

/// Complete match state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub time: SimTime,
    pub phase: MatchPhase,
    /// Set once the roster drops to at most one ship.
    pub outcome: Option<MatchOutcome>,
    pub arena: Arena,
    pub ships: Vec<ShipView>,
    pub bullets: Vec<BulletView>,
    pub explosions: Vec<ExplosionView>,
    pub particles: Vec<ParticleView>,
    /// Scan cone overlay for the AI ship, present on ticks where the pilot
    /// script queried its sensor.
    pub scan: Option<ScanConeView>,
    /// Diagnostics drained from the engine this tick.
    pub alerts: Vec<Alert>,
}

/// A live ship on the field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipView {
    pub slot: ShipSlot,
    pub position: Position,
    pub angle: f64,
    pub turret_angle: f64,
    pub speed: f64,
    pub health: f64,
    pub heat: f64,
    pub max_heat: f64,
    pub shutdown: bool,
    pub overburn: bool,
}

/// A bullet in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletView {
    pub position: Position,
    pub angle: f64,
    pub radius: f64,
    pub owner: ShipSlot,
}

/// An explosion mid-animation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionView {
    pub position: Position,
    /// Current visual radius.
    pub radius: f64,
    /// Animation progress in [0, 1] (drives alpha fade).
    pub progress: f64,
}

/// A cosmetic spark.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleView {
    pub position: Position,
    pub radius: f64,
    /// HSL hue in degrees.
    pub hue: f64,
}

/// Sensor cone overlay for the AI ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConeView {
    pub origin: Position,
    pub turret_angle: f64,
    pub half_angle: f64,
    pub radius: f64,
    /// Whether the scan acquired the opponent (drives the overlay color).
    pub detected: bool,
}
