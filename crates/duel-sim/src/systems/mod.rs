//! Per-tick simulation systems, run in a fixed order by the engine.

pub mod cleanup;
pub mod collision;
pub mod control;
pub mod explosion;
pub mod gunnery;
pub mod movement;
pub mod particle;
pub mod snapshot;
