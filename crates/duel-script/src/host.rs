//! Rhai script host: compiles pilot source and runs it once per tick.

use rhai::{Dynamic, Engine, EvalAltResult, Map, Scope, AST};

use crate::api::{self, ApiState, ControlContext, ControlOutcome, PilotApi, ShipApi};
use crate::error::ScriptError;

/// Operation budget per invocation. A script that spins past this is cut
/// off and treated as a runtime fault instead of hanging the host loop.
const MAX_OPERATIONS_PER_TICK: u64 = 500_000;

/// Name of the entry point a pilot script must define.
pub const ENTRY_POINT: &str = "run_ai";

/// Owns the scripting engine, the compiled routine (if any), and the
/// pilot's persistent memory.
///
/// The host is single-threaded by design: it lives on the game-loop
/// thread and every invocation is a synchronous, in-process call.
pub struct ScriptHost {
    engine: Engine,
    program: Option<AST>,
    memory: Map,
}

impl ScriptHost {
    pub fn new() -> Self {
        let mut engine = Engine::new();
        engine.set_fast_operators(true);
        engine.set_max_operations(MAX_OPERATIONS_PER_TICK);
        api::register_api(&mut engine);

        Self {
            engine,
            program: None,
            memory: Map::new(),
        }
    }

    /// Whether a control routine is currently bound.
    pub fn is_loaded(&self) -> bool {
        self.program.is_some()
    }

    /// Drop the bound routine. The ship goes idle but stays simulated.
    pub fn clear(&mut self) {
        self.program = None;
    }

    /// Compile and bind a new routine, replacing any previous one.
    ///
    /// Empty input is rejected without touching the existing binding;
    /// a parse failure clears it.
    pub fn load(&mut self, source: &str) -> Result<(), ScriptError> {
        if source.trim().is_empty() {
            return Err(ScriptError::EmptySource);
        }

        match self.engine.compile(source) {
            Ok(ast) => {
                self.program = Some(ast);
                Ok(())
            }
            Err(err) => {
                self.program = None;
                Err(ScriptError::Compile(err.to_string()))
            }
        }
    }

    /// Invoke `run_ai(ship, api)` for one tick.
    ///
    /// Returns `Ok(None)` when no routine is bound. On any fault the
    /// binding is permanently cleared (fail-stop) and the partially
    /// applied commands of the failing invocation are discarded; memory
    /// writes made before the fault persist.
    pub fn run_tick(&mut self, ctx: ControlContext) -> Result<Option<ControlOutcome>, ScriptError> {
        let Some(ast) = &self.program else {
            return Ok(None);
        };

        let state = ApiState::new(ctx, std::mem::take(&mut self.memory));
        let ship = ShipApi::new(state.clone());
        let pilot = PilotApi::new(state.clone());

        let mut scope = Scope::new();
        let result = self
            .engine
            .call_fn::<Dynamic>(&mut scope, ast, ENTRY_POINT, (ship, pilot));

        // Reclaim memory whether or not the call succeeded.
        let outcome = {
            let mut state = state.borrow_mut();
            self.memory = std::mem::take(&mut state.memory);
            ControlOutcome {
                ship: state.ship.clone(),
                shots: std::mem::take(&mut state.shots),
                scan: state.scan,
            }
        };

        match result {
            Ok(_) => Ok(Some(outcome)),
            Err(err) => {
                self.program = None;
                if is_missing_entry_point(&err) {
                    Err(ScriptError::MissingEntryPoint(err.to_string()))
                } else {
                    Err(ScriptError::Runtime(err.to_string()))
                }
            }
        }
    }
}

impl Default for ScriptHost {
    fn default() -> Self {
        Self::new()
    }
}

/// The not-found name carries the argument list ("run_ai (x, y)"), so an
/// exact match on the name portion is required; a script calling some
/// other undefined function is an ordinary runtime fault.
fn is_missing_entry_point(err: &EvalAltResult) -> bool {
    matches!(
        err,
        EvalAltResult::ErrorFunctionNotFound(name, _)
            if name
                .strip_prefix(ENTRY_POINT)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with(" ("))
    )
}
