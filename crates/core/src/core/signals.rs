//! Control-signal snapshot derived from each executed instruction.
//!
//! The snapshot is a closed enum with one variant per instruction class,
//! each carrying only the fields meaningful for that class; the boolean
//! datapath flags a display layer needs (write-enables, source selects)
//! are derived through accessor methods instead of being stored
//! redundantly.

use serde::Serialize;

use crate::isa::{AluOp, InstrClass};

/// Which value feeds the ALU's second input port.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AluSrc {
    /// The second source register (`rs2`).
    Register,
    /// The sign-extended immediate.
    Immediate,
}

/// Datapath activity of the most recently executed instruction.
///
/// Exactly one snapshot is current at a time; the driver replaces it
/// wholesale on every step and clears it on reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "class")]
pub enum SignalSnapshot {
    /// Register-register arithmetic/logic.
    RType {
        /// Operation performed by the ALU.
        alu_op: AluOp,
    },
    /// Register-immediate arithmetic/logic.
    IType {
        /// Operation performed by the ALU.
        alu_op: AluOp,
    },
    /// Memory read into a register.
    Load,
    /// Register written to memory.
    Store,
    /// Conditional branch.
    Branch {
        /// Comparison the ALU performed.
        alu_op: AluOp,
        /// Whether the branch redirected the PC.
        taken: bool,
    },
    /// Unconditional jump with link.
    Jump,
    /// Upper-immediate write (`lui`/`auipc`).
    UpperImm,
}

impl SignalSnapshot {
    /// The instruction class this snapshot was derived from.
    pub fn class(&self) -> InstrClass {
        match self {
            Self::RType { .. } => InstrClass::RType,
            Self::IType { .. } => InstrClass::IType,
            Self::Load => InstrClass::Load,
            Self::Store => InstrClass::Store,
            Self::Branch { .. } => InstrClass::Branch,
            Self::Jump => InstrClass::Jump,
            Self::UpperImm => InstrClass::UpperImm,
        }
    }

    /// The ALU operation tag; address computations and upper-immediate
    /// writes report [`AluOp::Add`].
    pub fn alu_op(&self) -> AluOp {
        match self {
            Self::RType { alu_op } | Self::IType { alu_op } | Self::Branch { alu_op, .. } => *alu_op,
            Self::Load | Self::Store | Self::Jump | Self::UpperImm => AluOp::Add,
        }
    }

    /// Register-file write enable.
    pub fn reg_write(&self) -> bool {
        !matches!(self, Self::Store | Self::Branch { .. })
    }

    /// Which source drives the ALU's second input.
    pub fn alu_src(&self) -> AluSrc {
        match self {
            Self::RType { .. } | Self::Branch { .. } => AluSrc::Register,
            _ => AluSrc::Immediate,
        }
    }

    /// True when the register write-back value comes from memory rather
    /// than the ALU.
    pub fn mem_to_reg(&self) -> bool {
        matches!(self, Self::Load)
    }

    /// Data memory write enable.
    pub fn mem_write(&self) -> bool {
        matches!(self, Self::Store)
    }

    /// True for branch instructions, taken or not.
    pub fn branch(&self) -> bool {
        matches!(self, Self::Branch { .. })
    }

    /// True when a branch actually redirected the PC.
    pub fn branch_taken(&self) -> bool {
        matches!(self, Self::Branch { taken: true, .. })
    }

    /// True for unconditional jumps.
    pub fn jump(&self) -> bool {
        matches!(self, Self::Jump)
    }
}
