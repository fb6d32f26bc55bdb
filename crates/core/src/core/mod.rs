//! Architectural state and the decoder/executor.
//!
//! This module holds everything an instruction can observe or mutate:
//! 1. **Registers:** the 32-entry general-purpose register file ([`gpr`]).
//! 2. **Memory:** flat word-addressable data memory ([`memory`]).
//! 3. **PC:** the program counter, an instruction index.
//! 4. **Execution:** the pure compute phase ([`exec`]) and the
//!    control-signal snapshot it derives ([`signals`]).

/// Instruction execution (pure compute phase).
pub mod exec;
/// General-purpose register file.
pub mod gpr;
/// Word-addressable data memory.
pub mod memory;
/// Control-signal snapshot.
pub mod signals;

use crate::isa::abi::REG_COUNT;
use exec::Effects;
use gpr::Gpr;
use memory::DataMemory;

/// Architectural state: register file, data memory, and program counter.
///
/// Constructed once per simulator and mutated only by [`ArchState::apply`]
/// (the commit phase of a step) and [`ArchState::reset`].
#[derive(Clone, Debug)]
pub struct ArchState {
    /// General-purpose registers.
    pub gpr: Gpr,
    /// Data memory.
    pub mem: DataMemory,
    /// Program counter, in instruction units.
    pub pc: usize,
}

impl ArchState {
    /// Creates zeroed state with `memory_words` words of data memory.
    pub fn new(memory_words: usize) -> Self {
        Self {
            gpr: Gpr::new(),
            mem: DataMemory::new(memory_words),
            pc: 0,
        }
    }

    /// Reads a register; `x0` always reads 0.
    pub fn read_register(&self, idx: usize) -> i32 {
        self.gpr.read(idx)
    }

    /// Writes a register; writes to `x0` are discarded.
    pub fn write_register(&mut self, idx: usize, val: i32) {
        self.gpr.write(idx, val);
    }

    /// Reads a memory word; out-of-range addresses read as 0.
    pub fn read_memory(&self, index: i64) -> i32 {
        self.mem.read(index).unwrap_or(0)
    }

    /// Writes a memory word; out-of-range addresses are ignored.
    pub fn write_memory(&mut self, index: i64, val: i32) {
        let _ = self.mem.write(index, val);
    }

    /// Zero-fills registers and memory and returns the PC to 0.
    pub fn reset(&mut self) {
        self.gpr.reset();
        self.mem.reset();
        self.pc = 0;
    }

    /// Commits the effects of an executed instruction: write-back, then
    /// the PC update.
    pub fn apply(&mut self, effects: &Effects) {
        if let Some((idx, val)) = effects.reg_write {
            self.gpr.write(idx, val);
        }
        if let Some((index, val)) = effects.mem_write {
            self.write_memory(index as i64, val);
        }
        self.pc = effects.next_pc;
    }

    /// Full register snapshot for display layers.
    pub fn registers(&self) -> [i32; REG_COUNT] {
        self.gpr.snapshot()
    }
}
