//! Core types and definitions for the arena duel simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! entity components, the ship operation rules, input, commands, alerts,
//! snapshot views, and constants. It has no dependency on the scripting
//! runtime or any frontend framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod ship;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
