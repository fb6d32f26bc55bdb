//! Configuration for the simulator.
//!
//! This module defines the configuration structure used to parameterize a
//! [`Simulator`](crate::sim::Simulator). It provides:
//! 1. **Defaults:** Baseline constants sized for classroom programs.
//! 2. **Policy:** The strict/permissive switch for malformed operands and
//!    out-of-range memory accesses.
//! 3. **Deserialization:** `Config` is serde-deserializable so an embedding
//!    UI can supply it as JSON.

use serde::Deserialize;

/// Default configuration constants.
mod defaults {
    /// Data memory size in 32-bit words.
    pub const MEMORY_WORDS: usize = 256;

    /// Minimum data memory size; smaller requests are clamped up.
    pub const MEMORY_WORDS_MIN: usize = 256;

    /// Execution log capacity; oldest entries are evicted first.
    pub const LOG_CAPACITY: usize = 50;

    /// Delay between steps in continuous-run mode, in milliseconds.
    pub const STEP_INTERVAL_MS: u64 = 500;
}

/// Error policy for malformed operands and out-of-range memory accesses.
///
/// Classroom datapath tools traditionally resolve unknown register tokens
/// to `x0` and ignore out-of-range addresses. [`Policy::Permissive`]
/// reproduces that behavior; [`Policy::Strict`] (the default) turns both
/// into recoverable step errors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Unknown registers and out-of-range addresses fail the step.
    #[default]
    Strict,
    /// Unknown registers read as `x0`; out-of-range accesses are no-ops.
    Permissive,
}

/// Simulator configuration.
///
/// All fields have defaults; deserialize from JSON to override a subset.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Data memory size in 32-bit words (clamped to at least 256).
    pub memory_words: usize,
    /// Error policy for operands and memory bounds.
    pub policy: Policy,
    /// Execution log capacity in entries.
    pub log_capacity: usize,
    /// Delay between steps in continuous-run mode, in milliseconds.
    pub step_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            memory_words: defaults::MEMORY_WORDS,
            policy: Policy::default(),
            log_capacity: defaults::LOG_CAPACITY,
            step_interval_ms: defaults::STEP_INTERVAL_MS,
        }
    }
}

impl Config {
    /// Effective memory size after clamping to the minimum.
    pub fn effective_memory_words(&self) -> usize {
        self.memory_words.max(defaults::MEMORY_WORDS_MIN)
    }
}
