//! Alerts emitted by the simulation for the diagnostic output surface.
//!
//! Script load notices, compile errors, runtime faults, and match-flow
//! messages all travel through the alert queue on the snapshot. The
//! frontend decides how to present them.

use serde::{Deserialize, Serialize};

use crate::enums::AlertLevel;

/// A human-readable diagnostic message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    pub tick: u64,
}

impl Alert {
    pub fn info(message: impl Into<String>, tick: u64) -> Self {
        Self {
            level: AlertLevel::Info,
            message: message.into(),
            tick,
        }
    }

    pub fn warning(message: impl Into<String>, tick: u64) -> Self {
        Self {
            level: AlertLevel::Warning,
            message: message.into(),
            tick,
        }
    }

    pub fn critical(message: impl Into<String>, tick: u64) -> Self {
        Self {
            level: AlertLevel::Critical,
            message: message.into(),
            tick,
        }
    }
}
