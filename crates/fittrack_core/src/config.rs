//! Store configuration.
//!
//! # Responsibility
//! - Hold host-tunable knobs for opening and writing to the workout store.
//! - Stay deserializable so a host can load it from its own settings file.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How `add` treats `reps`/`weight`/`date` input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Store whatever was submitted, including non-numeric text.
    #[default]
    Legacy,
    /// Reject non-numeric values and malformed dates before writing.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub input_mode: InputMode,
    /// Wait on a locked database file for at most this long.
    pub busy_timeout_ms: u64,
}

impl StoreConfig {
    pub fn strict() -> Self {
        Self {
            input_mode: InputMode::Strict,
            ..Self::default()
        }
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            input_mode: InputMode::Legacy,
            busy_timeout_ms: 5_000,
        }
    }
}
