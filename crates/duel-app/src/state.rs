//! Application state shared between the embedder and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use duel_core::commands::{InputState, MatchCommand};
use duel_core::state::MatchSnapshot;

/// Commands sent from the embedder to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// Replace the player input state.
    Input(InputState),
    /// A match command to forward to the simulation engine.
    Match(MatchCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared application state for an embedder.
///
/// Embedder frameworks generally require shared state to be Send + Sync:
/// the `mpsc::Sender` is wrapped in a `Mutex` (Sender is Send but not
/// Sync), and the latest snapshot lives behind `Arc<Mutex<...>>` so the
/// game loop thread can publish into it.
pub struct AppState {
    /// Channel sender to forward commands to the game loop thread.
    /// `None` before the loop has been spawned.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot for synchronous queries.
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<MatchSnapshot>>>,
    /// Whether the game loop is currently running.
    pub running: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
