//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Which combatant a ship (or bullet) belongs to.
///
/// The slot order is load-bearing: the destruction sweep and snapshot
/// listings run in ascending slot order, reproducing the legacy roster
/// ordering. Bullets target their owner's opponent slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipSlot {
    /// Keyboard-controlled ship.
    Player,
    /// Script-controlled ship.
    Ai,
}

impl ShipSlot {
    pub fn index(self) -> usize {
        match self {
            ShipSlot::Player => 0,
            ShipSlot::Ai => 1,
        }
    }

    pub fn opponent(self) -> ShipSlot {
        match self {
            ShipSlot::Player => ShipSlot::Ai,
            ShipSlot::Ai => ShipSlot::Player,
        }
    }
}

/// Match phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Ticks advance and all systems run.
    #[default]
    Active,
    /// The match has ended; `tick()` no longer advances the simulation.
    Over,
}

/// Final result of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    PlayerWins,
    AiWins,
    /// Both ships destroyed on the same tick.
    Draw,
}

/// Alert severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}
