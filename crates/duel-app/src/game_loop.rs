//! Game loop thread: runs the simulation engine at the fixed tick rate
//! and publishes snapshots.
//!
//! The engine is created inside this thread because the script host is
//! not Send; the engine must live where it ticks. Commands arrive via
//! `mpsc` channel. Snapshots are stored in shared state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use duel_core::constants::TICK_RATE;
use duel_core::state::MatchSnapshot;
use duel_sim::engine::{SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the embedder to use.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<MatchSnapshot>>>,
) -> mpsc::Sender<GameLoopCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    std::thread::Builder::new()
        .name("duel-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot);
        })
        .expect("Failed to spawn game loop thread");

    cmd_tx
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<MatchSnapshot>>,
) {
    let mut engine = SimulationEngine::new(config);
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Input(input)) => engine.set_input(input),
                Ok(GameLoopCommand::Match(command)) => engine.queue_command(command),
                Ok(GameLoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick (engine handles match-over semantics internally)
        let snapshot = engine.tick();

        // 3. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind; reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}
