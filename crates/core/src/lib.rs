//! Educational single-step RISC-V (RV32I subset) simulator core.
//!
//! This crate implements the instruction-set simulation engine behind a
//! datapath-visualization teaching tool. It provides:
//! 1. **Assembly loading:** per-line parsing and two-pass label resolution
//!    into relative instruction offsets ([`asm`]).
//! 2. **Architectural state:** 32 general-purpose registers (`x0`
//!    hardwired to zero), flat word-addressable data memory, and a PC held
//!    in instruction units ([`core`]).
//! 3. **Execution:** per-instruction semantics for the RV32I subset with a
//!    control-signal snapshot derived from each step ([`core::exec`],
//!    [`core::signals`]).
//! 4. **Driving:** a step/run/pause/reset state machine with a bounded
//!    execution log, built for a pull-based display layer ([`sim`]).
//!
//! Rendering and UI are external collaborators: they issue the four driver
//! commands and read back PC, registers, memory, signals, and the log.
//! They never participate in instruction semantics.

/// Assembly-text parsing and label resolution.
pub mod asm;
/// Simulator configuration.
pub mod config;
/// Architectural state and the decoder/executor.
pub mod core;
/// Load- and step-error types.
pub mod error;
/// Instruction set tables and register names.
pub mod isa;
/// Execution driver and log.
pub mod sim;

pub use crate::config::{Config, Policy};
pub use crate::error::{LoadError, StepError};
pub use crate::sim::{RunTick, Simulator, Status, StepOutcome};
