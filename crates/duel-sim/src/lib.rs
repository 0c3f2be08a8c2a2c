//! Arena duel simulation.
//!
//! Owns the hecs ECS world, runs the per-tick system pipeline at a fixed
//! tick rate, and produces `MatchSnapshot`s for the frontend. Completely
//! headless, enabling deterministic testing.

pub mod engine;
pub mod systems;
pub mod world_setup;

pub use duel_core as core;
pub use engine::{SimConfig, SimulationEngine};
