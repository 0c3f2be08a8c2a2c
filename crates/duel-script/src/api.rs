//! The capability API exposed to pilot scripts.
//!
//! Scripts receive two handles sharing one `Rc<RefCell<ApiState>>`:
//! `ship` carries telemetry reads and the persistent memory store, `api`
//! carries commands and the sensor. The state holds a copy of the AI
//! ship taken at the start of the invocation; command methods drive it
//! through the same `Ship` operations the keyboard path uses, so the
//! shutdown gating cannot diverge between the two control channels.

use std::cell::RefCell;
use std::rc::Rc;

use rhai::{Dynamic, Engine, Map};

use duel_core::constants::{
    ARENA_HEIGHT, ARENA_WIDTH, SCAN_CONE_HALF_ANGLE, SCRIPT_SHOT_COOLDOWN_SECS,
};
use duel_core::ship::{BulletSpawn, Ship};
use duel_core::types::{signed_angle, Arena, Position};

/// Everything a single invocation needs from the simulation.
#[derive(Debug, Clone)]
pub struct ControlContext {
    /// Copy of the AI ship at the start of the tick's control phase.
    pub ship: Ship,
    /// Opposing ship telemetry, if it is still on the field.
    pub opponent: Option<OpponentTelemetry>,
    pub arena: Arena,
    /// Simulation clock, for the script-side shot cooldown.
    pub now_secs: f64,
}

/// The slice of opponent state the sensor may reveal.
#[derive(Debug, Clone, Copy)]
pub struct OpponentTelemetry {
    pub pos: Position,
    pub speed: f64,
}

/// What an invocation produced: the mutated ship plus side requests.
#[derive(Debug, Clone)]
pub struct ControlOutcome {
    pub ship: Ship,
    pub shots: Vec<BulletSpawn>,
    /// None if the script never scanned this tick; otherwise whether the
    /// scan acquired the opponent (drives the cone overlay color).
    pub scan: Option<bool>,
}

/// A successful sensor return.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanContact {
    pub distance: f64,
    /// Bearing relative to the turret heading, normalized to [-π, π].
    pub angle: f64,
    pub pos: Position,
    pub speed: f64,
}

/// Bounded sensor query: the opponent is revealed only within the fixed
/// cone around the scanning ship's turret heading. Range is unbounded.
pub fn scan_for_enemy(ship: &Ship, opponent: &OpponentTelemetry) -> Option<ScanContact> {
    let distance = ship.pos.range_to(&opponent.pos);
    let bearing = ship.pos.angle_to(&opponent.pos);
    let delta = signed_angle(bearing - ship.turret_angle);

    if delta.abs() <= SCAN_CONE_HALF_ANGLE {
        Some(ScanContact {
            distance,
            angle: delta,
            pos: opponent.pos,
            speed: opponent.speed,
        })
    } else {
        None
    }
}

/// Mutable state shared by the two script-visible handles for the
/// duration of one invocation. Memory is threaded through by the host so
/// it survives across ticks.
pub(crate) struct ApiState {
    pub ship: Ship,
    pub opponent: Option<OpponentTelemetry>,
    pub arena: Arena,
    pub now_secs: f64,
    pub shots: Vec<BulletSpawn>,
    pub scan: Option<bool>,
    pub memory: Map,
}

impl ApiState {
    pub fn new(ctx: ControlContext, memory: Map) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            ship: ctx.ship,
            opponent: ctx.opponent,
            arena: ctx.arena,
            now_secs: ctx.now_secs,
            shots: Vec::new(),
            scan: None,
            memory,
        }))
    }
}

/// Telemetry + memory handle, passed as the first `run_ai` argument.
#[derive(Clone)]
pub(crate) struct ShipApi {
    state: Rc<RefCell<ApiState>>,
}

/// Command + sensor handle, passed as the second `run_ai` argument.
#[derive(Clone)]
pub(crate) struct PilotApi {
    state: Rc<RefCell<ApiState>>,
}

impl ShipApi {
    pub fn new(state: Rc<RefCell<ApiState>>) -> Self {
        Self { state }
    }

    fn x(&mut self) -> f64 {
        self.state.borrow().ship.pos.x
    }

    fn y(&mut self) -> f64 {
        self.state.borrow().ship.pos.y
    }

    fn angle(&mut self) -> f64 {
        self.state.borrow().ship.angle
    }

    fn turret_angle(&mut self) -> f64 {
        self.state.borrow().ship.turret_angle
    }

    fn speed(&mut self) -> f64 {
        self.state.borrow().ship.speed
    }

    fn health(&mut self) -> f64 {
        self.state.borrow().ship.health
    }

    fn heat(&mut self) -> f64 {
        self.state.borrow().ship.heat
    }

    fn max_heat(&mut self) -> f64 {
        duel_core::constants::MAX_HEAT
    }

    fn is_shutdown(&mut self) -> bool {
        self.state.borrow().ship.shutdown
    }

    fn is_overburn(&mut self) -> bool {
        self.state.borrow().ship.overburn
    }

    fn info(&mut self) -> Map {
        let state = self.state.borrow();
        let ship = &state.ship;
        let mut map = Map::new();
        map.insert("angle".into(), Dynamic::from_float(ship.angle));
        map.insert("turret_angle".into(), Dynamic::from_float(ship.turret_angle));
        map.insert("x".into(), Dynamic::from_float(ship.pos.x));
        map.insert("y".into(), Dynamic::from_float(ship.pos.y));
        map.insert("speed".into(), Dynamic::from_float(ship.speed));
        map.insert("health".into(), Dynamic::from_float(ship.health));
        map.insert("heat".into(), Dynamic::from_float(ship.heat));
        map.insert(
            "max_heat".into(),
            Dynamic::from_float(duel_core::constants::MAX_HEAT),
        );
        map.insert("is_shutdown".into(), Dynamic::from_bool(ship.shutdown));
        map.insert("is_overburn".into(), Dynamic::from_bool(ship.overburn));
        map
    }

    /// Store a value in the ship's persistent memory. The simulation
    /// never reads this; it belongs to the pilot script alone.
    fn remember(&mut self, key: &str, value: Dynamic) {
        self.state.borrow_mut().memory.insert(key.into(), value);
    }

    fn recall(&mut self, key: &str) -> Dynamic {
        self.state
            .borrow()
            .memory
            .get(key)
            .cloned()
            .unwrap_or(Dynamic::UNIT)
    }

    fn recall_or(&mut self, key: &str, default: Dynamic) -> Dynamic {
        self.state
            .borrow()
            .memory
            .get(key)
            .cloned()
            .unwrap_or(default)
    }
}

impl PilotApi {
    pub fn new(state: Rc<RefCell<ApiState>>) -> Self {
        Self { state }
    }

    fn turn_left(&mut self) {
        self.state.borrow_mut().ship.rotate(-1.0);
    }

    fn turn_right(&mut self) {
        self.state.borrow_mut().ship.rotate(1.0);
    }

    fn turn_turret_left(&mut self) {
        self.state.borrow_mut().ship.rotate_turret(-1.0);
    }

    fn turn_turret_right(&mut self) {
        self.state.borrow_mut().ship.rotate_turret(1.0);
    }

    fn set_turret_angle(&mut self, degrees: f64) {
        let radians = degrees.to_radians();
        self.state.borrow_mut().ship.set_turret_angle(radians);
    }

    fn set_turret_angle_int(&mut self, degrees: i64) {
        self.set_turret_angle(degrees as f64);
    }

    fn thrust(&mut self) {
        self.state.borrow_mut().ship.accelerate();
    }

    fn enable_overburn(&mut self) {
        self.state.borrow_mut().ship.set_overburn(true);
    }

    fn set_overburn(&mut self, enable: bool) {
        self.state.borrow_mut().ship.set_overburn(enable);
    }

    /// Fire, subject to the script-side cooldown (longer than the
    /// player's — deliberate asymmetry).
    fn shoot(&mut self) {
        let mut state = self.state.borrow_mut();
        let now = state.now_secs;
        if let Some(spawn) = state.ship.try_shoot(now, SCRIPT_SHOT_COOLDOWN_SECS) {
            state.shots.push(spawn);
        }
    }

    /// Sensor sweep along the turret heading. Returns a map with
    /// `distance`, `angle`, `x`, `y`, `speed` on acquisition, unit
    /// otherwise.
    fn scan_enemy(&mut self) -> Dynamic {
        let mut state = self.state.borrow_mut();
        let contact = state
            .opponent
            .as_ref()
            .and_then(|opponent| scan_for_enemy(&state.ship, opponent));
        state.scan = Some(contact.is_some());

        match contact {
            Some(contact) => {
                let mut map = Map::new();
                map.insert("distance".into(), Dynamic::from_float(contact.distance));
                map.insert("angle".into(), Dynamic::from_float(contact.angle));
                map.insert("x".into(), Dynamic::from_float(contact.pos.x));
                map.insert("y".into(), Dynamic::from_float(contact.pos.y));
                map.insert("speed".into(), Dynamic::from_float(contact.speed));
                Dynamic::from_map(map)
            }
            None => Dynamic::UNIT,
        }
    }

    fn arena_width(&mut self) -> f64 {
        self.state.borrow().arena.width
    }

    fn arena_height(&mut self) -> f64 {
        self.state.borrow().arena.height
    }
}

/// Register the capability surface on a fresh engine. This is the entire
/// world a pilot script can touch.
pub(crate) fn register_api(engine: &mut Engine) {
    engine.register_type_with_name::<ShipApi>("Ship");
    engine.register_get("x", ShipApi::x);
    engine.register_get("y", ShipApi::y);
    engine.register_get("angle", ShipApi::angle);
    engine.register_get("turret_angle", ShipApi::turret_angle);
    engine.register_get("speed", ShipApi::speed);
    engine.register_get("health", ShipApi::health);
    engine.register_get("heat", ShipApi::heat);
    engine.register_get("max_heat", ShipApi::max_heat);
    engine.register_get("is_shutdown", ShipApi::is_shutdown);
    engine.register_get("is_overburn", ShipApi::is_overburn);
    engine.register_fn("info", ShipApi::info);
    engine.register_fn("remember", ShipApi::remember);
    engine.register_fn("recall", ShipApi::recall);
    engine.register_fn("recall", ShipApi::recall_or);

    engine.register_type_with_name::<PilotApi>("Api");
    engine.register_fn("turn_left", PilotApi::turn_left);
    engine.register_fn("turn_right", PilotApi::turn_right);
    engine.register_fn("turn_turret_left", PilotApi::turn_turret_left);
    engine.register_fn("turn_turret_right", PilotApi::turn_turret_right);
    engine.register_fn("set_turret_angle", PilotApi::set_turret_angle);
    engine.register_fn("set_turret_angle", PilotApi::set_turret_angle_int);
    engine.register_fn("thrust", PilotApi::thrust);
    engine.register_fn("enable_overburn", PilotApi::enable_overburn);
    engine.register_fn("set_overburn", PilotApi::set_overburn);
    engine.register_fn("shoot", PilotApi::shoot);
    engine.register_fn("scan_enemy", PilotApi::scan_enemy);
    engine.register_fn("arena_width", PilotApi::arena_width);
    engine.register_fn("arena_height", PilotApi::arena_height);
}

impl Default for ControlContext {
    fn default() -> Self {
        Self {
            ship: Ship::new(Position::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0)),
            opponent: None,
            arena: Arena::default(),
            now_secs: 0.0,
        }
    }
}
