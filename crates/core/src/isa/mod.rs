//! Instruction set tables for the simulated RV32I subset.
//!
//! This module replaces string-driven dispatch with a closed instruction
//! table. It provides:
//! 1. **Opcodes:** An exhaustive [`Opcode`] enum, one variant per supported mnemonic.
//! 2. **Classification:** The datapath format of each instruction ([`InstrClass`]).
//! 3. **ALU tags:** The [`AluOp`] driven onto the ALU by the control unit.
//! 4. **Lookup:** A mnemonic-to-[`InstrSpec`] table used by the decoder.

use serde::Serialize;

/// ABI and numeric register-name resolution.
pub mod abi;

/// Every mnemonic the executor understands.
///
/// The executor matches on this enum exhaustively; adding a mnemonic to the
/// [`lookup`] table without handling it in the executor is a compile error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum Opcode {
    // R-type
    Add,
    Sub,
    And,
    Or,
    Xor,
    Sll,
    Srl,
    Sra,
    Slt,
    Sltu,
    // I-type
    Addi,
    Andi,
    Ori,
    Xori,
    Slti,
    Sltiu,
    Slli,
    Srli,
    Srai,
    // Loads
    Lw,
    Lh,
    Lb,
    Lhu,
    Lbu,
    // Stores
    Sw,
    Sh,
    Sb,
    // Branches
    Beq,
    Bne,
    Blt,
    Bge,
    Bltu,
    Bgeu,
    // Jumps
    Jal,
    Jalr,
    // Upper immediates
    Lui,
    Auipc,
    // Pseudo: addi x0, x0, 0
    Nop,
}

/// Datapath format of an instruction.
///
/// The control-signal snapshot is derived purely from this class plus the
/// ALU operation; it is not a bit-level decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum InstrClass {
    /// Register-register arithmetic/logic (`rd, rs1, rs2`).
    RType,
    /// Register-immediate arithmetic/logic (`rd, rs1, imm`).
    IType,
    /// Memory read (`rd, imm(rs1)`).
    Load,
    /// Memory write (`rs2, imm(rs1)`).
    Store,
    /// Conditional PC-relative branch (`rs1, rs2, offset`).
    Branch,
    /// Unconditional jump with link (`jal`/`jalr`).
    Jump,
    /// Upper-immediate (`lui`/`auipc`).
    UpperImm,
}

/// Operation tag driven onto the ALU.
///
/// Branches reuse the comparison tags: `beq`/`bne` report [`AluOp::Eq`] /
/// [`AluOp::Ne`], while `blt`/`bge` and `bltu`/`bgeu` report the `slt`-family
/// tag of the comparison the ALU actually performs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum AluOp {
    #[default]
    Add,
    Sub,
    And,
    Or,
    Xor,
    Sll,
    Srl,
    Sra,
    Slt,
    Sltu,
    Eq,
    Ne,
}

/// What the decoder needs to know about a mnemonic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstrSpec {
    /// The decoded opcode, used for exhaustive dispatch in the executor.
    pub opcode: Opcode,
    /// Datapath format; determines operand layout and control signals.
    pub class: InstrClass,
    /// ALU operation tag reported in the signal snapshot.
    pub alu_op: AluOp,
}

impl InstrSpec {
    const fn new(opcode: Opcode, class: InstrClass, alu_op: AluOp) -> Self {
        Self {
            opcode,
            class,
            alu_op,
        }
    }
}

/// Looks up a (lower-case) mnemonic in the instruction table.
///
/// Returns `None` for unsupported mnemonics; the executor turns that into a
/// recoverable step error rather than a load failure, so programs containing
/// unknown instructions still load and fail only when reached.
pub fn lookup(mnemonic: &str) -> Option<InstrSpec> {
    use AluOp as A;
    use InstrClass as C;
    use Opcode as O;

    let spec = match mnemonic {
        "add" => InstrSpec::new(O::Add, C::RType, A::Add),
        "sub" => InstrSpec::new(O::Sub, C::RType, A::Sub),
        "and" => InstrSpec::new(O::And, C::RType, A::And),
        "or" => InstrSpec::new(O::Or, C::RType, A::Or),
        "xor" => InstrSpec::new(O::Xor, C::RType, A::Xor),
        "sll" => InstrSpec::new(O::Sll, C::RType, A::Sll),
        "srl" => InstrSpec::new(O::Srl, C::RType, A::Srl),
        "sra" => InstrSpec::new(O::Sra, C::RType, A::Sra),
        "slt" => InstrSpec::new(O::Slt, C::RType, A::Slt),
        "sltu" => InstrSpec::new(O::Sltu, C::RType, A::Sltu),

        "addi" => InstrSpec::new(O::Addi, C::IType, A::Add),
        "andi" => InstrSpec::new(O::Andi, C::IType, A::And),
        "ori" => InstrSpec::new(O::Ori, C::IType, A::Or),
        "xori" => InstrSpec::new(O::Xori, C::IType, A::Xor),
        "slti" => InstrSpec::new(O::Slti, C::IType, A::Slt),
        "sltiu" => InstrSpec::new(O::Sltiu, C::IType, A::Sltu),
        "slli" => InstrSpec::new(O::Slli, C::IType, A::Sll),
        "srli" => InstrSpec::new(O::Srli, C::IType, A::Srl),
        "srai" => InstrSpec::new(O::Srai, C::IType, A::Sra),

        "lw" => InstrSpec::new(O::Lw, C::Load, A::Add),
        "lh" => InstrSpec::new(O::Lh, C::Load, A::Add),
        "lb" => InstrSpec::new(O::Lb, C::Load, A::Add),
        "lhu" => InstrSpec::new(O::Lhu, C::Load, A::Add),
        "lbu" => InstrSpec::new(O::Lbu, C::Load, A::Add),

        "sw" => InstrSpec::new(O::Sw, C::Store, A::Add),
        "sh" => InstrSpec::new(O::Sh, C::Store, A::Add),
        "sb" => InstrSpec::new(O::Sb, C::Store, A::Add),

        "beq" => InstrSpec::new(O::Beq, C::Branch, A::Eq),
        "bne" => InstrSpec::new(O::Bne, C::Branch, A::Ne),
        "blt" => InstrSpec::new(O::Blt, C::Branch, A::Slt),
        "bge" => InstrSpec::new(O::Bge, C::Branch, A::Slt),
        "bltu" => InstrSpec::new(O::Bltu, C::Branch, A::Sltu),
        "bgeu" => InstrSpec::new(O::Bgeu, C::Branch, A::Sltu),

        "jal" => InstrSpec::new(O::Jal, C::Jump, A::Add),
        "jalr" => InstrSpec::new(O::Jalr, C::Jump, A::Add),

        "lui" => InstrSpec::new(O::Lui, C::UpperImm, A::Add),
        "auipc" => InstrSpec::new(O::Auipc, C::UpperImm, A::Add),

        "nop" => InstrSpec::new(O::Nop, C::IType, A::Add),

        _ => return None,
    };
    Some(spec)
}

/// True if a taken label operand makes sense for this class, i.e. the final
/// operand of the instruction may be a symbolic branch/jump target.
pub fn takes_label(spec: InstrSpec) -> bool {
    spec.class == InstrClass::Branch || spec.opcode == Opcode::Jal
}
