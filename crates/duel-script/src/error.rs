//! Script failure taxonomy.

use thiserror::Error;

/// Everything that can go wrong with a pilot script, from load to tick.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// Empty or whitespace-only source. The previously loaded routine,
    /// if any, is left in place.
    #[error("no script source provided")]
    EmptySource,

    /// The source failed to parse. No routine is installed.
    #[error("script compile error: {0}")]
    Compile(String),

    /// The compiled script defines no `run_ai(ship, api)` entry point.
    /// Raised on the first invocation attempt; the routine is cleared.
    #[error("script has no `run_ai(ship, api)` entry point: {0}")]
    MissingEntryPoint(String),

    /// The routine raised during a tick (thrown error, type error, or
    /// operation budget exceeded). The routine is cleared; the ship goes
    /// uncontrolled for the rest of the match.
    #[error("script runtime fault: {0}")]
    Runtime(String),
}
