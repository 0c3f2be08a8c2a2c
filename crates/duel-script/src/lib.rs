//! Sandboxed pilot scripting for the AI ship.
//!
//! User-authored Rhai source is compiled into a control routine invoked
//! once per tick with two handles: `ship` (telemetry + persistent memory)
//! and `api` (commands + sensor). Faults are caught, reported, and
//! permanently disable the routine; they never reach the host loop.

pub mod api;
pub mod error;
pub mod host;

pub use api::{ControlContext, ControlOutcome, OpponentTelemetry, ScanContact};
pub use error::ScriptError;
pub use host::ScriptHost;

#[cfg(test)]
mod tests;
