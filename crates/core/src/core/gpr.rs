//! General-purpose register file.
//!
//! This module implements the 32-entry integer register file. It performs:
//! 1. **Storage:** 32 signed 32-bit registers (`x0`-`x31`).
//! 2. **Invariant enforcement:** register `x0` is hardwired to zero; writes
//!    to it are discarded.

use crate::isa::abi::REG_COUNT;

/// General-purpose register file.
///
/// Register `x0` always reads as zero and cannot be modified.
#[derive(Clone, Debug)]
pub struct Gpr {
    regs: [i32; REG_COUNT],
}

impl Default for Gpr {
    fn default() -> Self {
        Self::new()
    }
}

impl Gpr {
    /// Creates a register file with all registers zeroed.
    pub fn new() -> Self {
        Self {
            regs: [0; REG_COUNT],
        }
    }

    /// Reads a register. `x0` always returns 0.
    pub fn read(&self, idx: usize) -> i32 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a register. Writes to `x0` are ignored.
    pub fn write(&mut self, idx: usize, val: i32) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Zeroes every register.
    pub fn reset(&mut self) {
        self.regs = [0; REG_COUNT];
    }

    /// Full register snapshot for display layers.
    pub fn snapshot(&self) -> [i32; REG_COUNT] {
        self.regs
    }
}
