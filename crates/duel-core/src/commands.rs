//! Input and commands sent from the embedder to the simulation.

use serde::{Deserialize, Serialize};

/// The player's control surface: a boolean map written asynchronously by
/// the embedder's key handlers and read once per tick by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub forward: bool,
    pub left: bool,
    pub right: bool,
    pub back: bool,
    pub turret_left: bool,
    pub turret_right: bool,
    pub shoot: bool,
    pub overburn: bool,
}

/// Discrete actions, validated and processed at the next tick boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MatchCommand {
    /// Load (or replace) the pilot script controlling the AI ship.
    LoadScript { source: String },
    /// Drop the pilot script; the AI ship goes idle but stays simulated.
    ClearScript,
}
