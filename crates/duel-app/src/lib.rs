//! Host shell for the arena duel: owns the game loop thread and the
//! shared state an embedder polls for snapshots.

pub mod game_loop;
pub mod state;

pub use game_loop::spawn_game_loop;
pub use state::{AppState, GameLoopCommand};
