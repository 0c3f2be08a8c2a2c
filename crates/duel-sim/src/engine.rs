//! Simulation engine — the core of the duel.
//!
//! `SimulationEngine` owns the hecs ECS world, processes match commands,
//! runs all systems, and produces `MatchSnapshot`s. Completely headless
//! (no windowing or rendering dependency), enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use duel_core::commands::{InputState, MatchCommand};
use duel_core::constants::WIN_DELAY_TICKS;
use duel_core::enums::{MatchOutcome, MatchPhase};
use duel_core::events::Alert;
use duel_core::state::MatchSnapshot;
use duel_core::types::{Arena, SimTime};
use duel_script::ScriptHost;

use crate::systems;
use crate::world_setup;

/// Ship entity handles indexed by `ShipSlot::index()`. A destroyed ship's
/// slot goes to `None` while the other keeps its index, which bullet
/// targeting and the destruction sweep rely on.
pub type ShipSlots = [Option<hecs::Entity>; 2];

/// Configuration for starting a new match.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same match.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// The simulation engine. Owns the ECS world and all match state.
///
/// Not `Send`: the embedded script host keeps interior-mutable state, so
/// the engine must be created on the thread that ticks it.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: MatchPhase,
    outcome: Option<MatchOutcome>,
    arena: Arena,
    input: InputState,
    rng: ChaCha8Rng,
    script: ScriptHost,
    ships: ShipSlots,
    command_queue: VecDeque<MatchCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    alerts: Vec<Alert>,
    /// Tick at which the match halts, latched when the roster drops to at
    /// most one ship.
    end_at_tick: Option<u64>,
    last_scan: Option<bool>,
}

impl SimulationEngine {
    /// Create a new engine with both ships on the field.
    pub fn new(config: SimConfig) -> Self {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let arena = Arena::default();
        let ships = world_setup::setup_match(&mut world, &mut rng, &arena);

        Self {
            world,
            time: SimTime::default(),
            phase: MatchPhase::default(),
            outcome: None,
            arena,
            input: InputState::default(),
            rng,
            script: ScriptHost::new(),
            ships,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            alerts: Vec::new(),
            end_at_tick: None,
            last_scan: None,
        }
    }

    /// Replace the player input state. Written asynchronously by the
    /// embedder's key handlers, read once per tick.
    pub fn set_input(&mut self, input: InputState) {
        self.input = input;
    }

    /// Queue a match command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: MatchCommand) {
        self.command_queue.push_back(command);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    ///
    /// Once the match is over, ticks stop advancing the simulation but
    /// still produce snapshots of the final state.
    pub fn tick(&mut self) -> MatchSnapshot {
        self.process_commands();
        self.last_scan = None;

        if self.phase == MatchPhase::Active {
            self.run_systems();
            self.check_win_condition();
            self.time.advance();
        }

        let alerts = std::mem::take(&mut self.alerts);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.outcome,
            &self.arena,
            &self.ships,
            self.last_scan,
            alerts,
        )
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: MatchCommand) {
        match command {
            MatchCommand::LoadScript { source } => match self.script.load(&source) {
                Ok(()) => {
                    self.alerts
                        .push(Alert::info("pilot script loaded", self.time.tick));
                }
                Err(err) => {
                    self.alerts
                        .push(Alert::warning(err.to_string(), self.time.tick));
                }
            },
            MatchCommand::ClearScript => {
                self.script.clear();
                self.alerts
                    .push(Alert::info("pilot script cleared", self.time.tick));
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Control (keyboard input + pilot script)
        self.last_scan = systems::control::run(
            &mut self.world,
            &self.ships,
            &self.input,
            &mut self.script,
            &self.arena,
            &self.time,
            &mut self.alerts,
        );
        // 2. Motion integration + bullet advancement
        systems::movement::run(&mut self.world, &self.arena, &mut self.despawn_buffer);
        // 3. Hull contact + wall clamping
        systems::collision::run(&mut self.world, &self.ships, &self.arena);
        // 4. Bullet impacts
        systems::gunnery::run(
            &mut self.world,
            &self.ships,
            &mut self.rng,
            &mut self.despawn_buffer,
        );
        // 5. Explosion damage pass + animation
        systems::explosion::run(
            &mut self.world,
            &self.ships,
            &mut self.rng,
            &mut self.despawn_buffer,
        );
        // 6. Particle advancement
        systems::particle::run(&mut self.world, &mut self.despawn_buffer);
        // 7. Destruction sweep
        systems::cleanup::run(
            &mut self.world,
            &mut self.ships,
            &self.time,
            &mut self.alerts,
        );
    }

    /// Latch the outcome when the roster drops to at most one ship, then
    /// halt the match after the win delay so the final blast can animate.
    fn check_win_condition(&mut self) {
        let alive = self.ships.iter().filter(|slot| slot.is_some()).count();
        if self.end_at_tick.is_none() && alive <= 1 {
            self.end_at_tick = Some(self.time.tick + WIN_DELAY_TICKS);
            let outcome = match (self.ships[0].is_some(), self.ships[1].is_some()) {
                (true, false) => MatchOutcome::PlayerWins,
                (false, true) => MatchOutcome::AiWins,
                _ => MatchOutcome::Draw,
            };
            self.outcome = Some(outcome);
            let message = match outcome {
                MatchOutcome::PlayerWins => "player wins",
                MatchOutcome::AiWins => "AI wins",
                MatchOutcome::Draw => "mutual destruction",
            };
            self.alerts.push(Alert::info(message, self.time.tick));
        }

        if let Some(end) = self.end_at_tick {
            if self.time.tick >= end {
                self.phase = MatchPhase::Over;
            }
        }
    }
}

#[cfg(test)]
impl SimulationEngine {
    /// Clone a ship's state out of the world (for assertions).
    pub fn ship(&self, slot: duel_core::enums::ShipSlot) -> Option<duel_core::ship::Ship> {
        let entity = self.ships[slot.index()]?;
        let mut query = self.world.query_one::<&duel_core::ship::Ship>(entity).ok()?;
        query.get().cloned()
    }

    /// Mutate a ship in place (for test setup).
    pub fn with_ship_mut(
        &mut self,
        slot: duel_core::enums::ShipSlot,
        f: impl FnOnce(&mut duel_core::ship::Ship),
    ) {
        if let Some(entity) = self.ships[slot.index()] {
            if let Ok(ship) = self
                .world
                .query_one_mut::<&mut duel_core::ship::Ship>(entity)
            {
                f(ship);
            }
        }
    }

    pub fn bullet_count(&self) -> usize {
        self.world
            .query::<&duel_core::components::Bullet>()
            .iter()
            .count()
    }

    pub fn explosion_count(&self) -> usize {
        self.world
            .query::<&duel_core::components::Explosion>()
            .iter()
            .count()
    }

    pub fn script_loaded(&self) -> bool {
        self.script.is_loaded()
    }
}
