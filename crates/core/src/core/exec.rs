//! Decoder/executor: computes the effects of one instruction.
//!
//! Execution is split into a pure compute phase and a commit phase. This
//! module is the compute phase: given the current architectural state and a
//! parsed instruction, it resolves operands, runs the ALU/memory/branch
//! logic, and returns an [`Effects`] record describing the write-back,
//! next-PC, and control-signal outcome. Nothing is mutated here, so a step
//! that fails leaves state from before the failing instruction intact; the
//! driver commits the effects via [`ArchState::apply`](super::ArchState::apply).

use crate::asm::Instruction;
use crate::config::{Config, Policy};
use crate::core::ArchState;
use crate::core::signals::SignalSnapshot;
use crate::error::StepError;
use crate::isa::{self, AluOp, Opcode, abi};

/// Computed outcome of one instruction, ready for commit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Effects {
    /// Register write-back, if the instruction produces one. Writes to
    /// `x0` are recorded here and discarded by the register file.
    pub reg_write: Option<(usize, i32)>,
    /// Data-memory write-back (word index, value), if any.
    pub mem_write: Option<(usize, i32)>,
    /// The PC after this instruction, in instruction units.
    pub next_pc: usize,
    /// Control-signal snapshot for the display layer.
    pub signals: SignalSnapshot,
}

/// Executes `inst` against `state` without mutating it.
///
/// # Errors
///
/// Returns a [`StepError`] for unsupported mnemonics, malformed operands,
/// and (under [`Policy::Strict`]) unknown registers, out-of-range shift
/// amounts, and out-of-range memory addresses. Control transfers to a
/// negative instruction index fail under either policy.
pub fn execute(inst: &Instruction, state: &ArchState, config: &Config) -> Result<Effects, StepError> {
    let spec = isa::lookup(&inst.mnemonic)
        .ok_or_else(|| StepError::UnknownMnemonic(inst.mnemonic.clone()))?;
    let pc = state.pc;

    match spec.opcode {
        Opcode::Nop => Ok(Effects {
            reg_write: None,
            mem_write: None,
            next_pc: pc + 1,
            signals: SignalSnapshot::IType { alu_op: AluOp::Add },
        }),

        Opcode::Add
        | Opcode::Sub
        | Opcode::And
        | Opcode::Or
        | Opcode::Xor
        | Opcode::Sll
        | Opcode::Srl
        | Opcode::Sra
        | Opcode::Slt
        | Opcode::Sltu => {
            let rd = reg_index(operand(inst, 0)?, config.policy)?;
            let a = state.gpr.read(reg_index(operand(inst, 1)?, config.policy)?);
            let b = state.gpr.read(reg_index(operand(inst, 2)?, config.policy)?);
            Ok(Effects {
                reg_write: Some((rd, alu(spec.alu_op, a, b))),
                mem_write: None,
                next_pc: pc + 1,
                signals: SignalSnapshot::RType {
                    alu_op: spec.alu_op,
                },
            })
        }

        Opcode::Addi
        | Opcode::Andi
        | Opcode::Ori
        | Opcode::Xori
        | Opcode::Slti
        | Opcode::Sltiu
        | Opcode::Slli
        | Opcode::Srli
        | Opcode::Srai => {
            let rd = reg_index(operand(inst, 0)?, config.policy)?;
            let a = state.gpr.read(reg_index(operand(inst, 1)?, config.policy)?);
            let raw = parse_imm(operand(inst, 2)?)?;
            // Shifts take a 5-bit shamt field, never sign-extended.
            let b = if matches!(spec.opcode, Opcode::Slli | Opcode::Srli | Opcode::Srai) {
                shamt(raw, config.policy)?
            } else {
                sign_extend(raw, 12)
            };
            Ok(Effects {
                reg_write: Some((rd, alu(spec.alu_op, a, b))),
                mem_write: None,
                next_pc: pc + 1,
                signals: SignalSnapshot::IType {
                    alu_op: spec.alu_op,
                },
            })
        }

        Opcode::Lw | Opcode::Lh | Opcode::Lb | Opcode::Lhu | Opcode::Lbu => {
            let rd = reg_index(operand(inst, 0)?, config.policy)?;
            let offset = sign_extend(parse_imm(operand(inst, 1)?)?, 12);
            let base = state.gpr.read(reg_index(operand(inst, 2)?, config.policy)?);
            let addr = i64::from(base) + i64::from(offset);
            let reg_write = match state.mem.read(addr) {
                Some(word) => Some((rd, narrow_load(spec.opcode, word))),
                None if config.policy == Policy::Strict => {
                    return Err(StepError::AddressOutOfRange(addr));
                }
                // Permissive: an out-of-range load leaves rd untouched.
                None => None,
            };
            Ok(Effects {
                reg_write,
                mem_write: None,
                next_pc: pc + 1,
                signals: SignalSnapshot::Load,
            })
        }

        Opcode::Sw | Opcode::Sh | Opcode::Sb => {
            let src = state.gpr.read(reg_index(operand(inst, 0)?, config.policy)?);
            let offset = sign_extend(parse_imm(operand(inst, 1)?)?, 12);
            let base = state.gpr.read(reg_index(operand(inst, 2)?, config.policy)?);
            let addr = i64::from(base) + i64::from(offset);
            let mem_write = match state.mem.read(addr) {
                Some(old) => Some((addr as usize, narrow_store(spec.opcode, old, src))),
                None if config.policy == Policy::Strict => {
                    return Err(StepError::AddressOutOfRange(addr));
                }
                // Permissive: an out-of-range store is silently dropped.
                None => None,
            };
            Ok(Effects {
                reg_write: None,
                mem_write,
                next_pc: pc + 1,
                signals: SignalSnapshot::Store,
            })
        }

        Opcode::Beq | Opcode::Bne | Opcode::Blt | Opcode::Bge | Opcode::Bltu | Opcode::Bgeu => {
            let a = state.gpr.read(reg_index(operand(inst, 0)?, config.policy)?);
            let b = state.gpr.read(reg_index(operand(inst, 1)?, config.policy)?);
            let offset = parse_imm(operand(inst, 2)?)?;
            let taken = branch_taken(spec.opcode, a, b);
            let next_pc = if taken {
                relative_target(pc, offset)?
            } else {
                pc + 1
            };
            Ok(Effects {
                reg_write: None,
                mem_write: None,
                next_pc,
                signals: SignalSnapshot::Branch {
                    alu_op: spec.alu_op,
                    taken,
                },
            })
        }

        Opcode::Jal => {
            let rd = reg_index(operand(inst, 0)?, config.policy)?;
            let offset = parse_imm(operand(inst, 1)?)?;
            Ok(Effects {
                reg_write: Some((rd, link_value(pc))),
                mem_write: None,
                next_pc: relative_target(pc, offset)?,
                signals: SignalSnapshot::Jump,
            })
        }

        Opcode::Jalr => {
            let rd = reg_index(operand(inst, 0)?, config.policy)?;
            let base = state.gpr.read(reg_index(operand(inst, 1)?, config.policy)?);
            let imm = sign_extend(parse_imm(operand(inst, 2)?)?, 12);
            // jalr's target is absolute, in the same instruction units as
            // the link value, so `ra`-based returns work out of the box.
            let target = i64::from(base) + i64::from(imm);
            if target < 0 {
                return Err(StepError::BadJumpTarget(target));
            }
            Ok(Effects {
                reg_write: Some((rd, link_value(pc))),
                mem_write: None,
                next_pc: target as usize,
                signals: SignalSnapshot::Jump,
            })
        }

        Opcode::Lui => {
            let rd = reg_index(operand(inst, 0)?, config.policy)?;
            let imm = parse_imm(operand(inst, 1)?)?;
            Ok(Effects {
                reg_write: Some((rd, imm.wrapping_shl(12))),
                mem_write: None,
                next_pc: pc + 1,
                signals: SignalSnapshot::UpperImm,
            })
        }

        Opcode::Auipc => {
            let rd = reg_index(operand(inst, 0)?, config.policy)?;
            let imm = parse_imm(operand(inst, 1)?)?;
            // The PC is an instruction index; the byte-address view the
            // datapath displays is pc * 4.
            let pc_bytes = (pc as i32).wrapping_mul(4);
            Ok(Effects {
                reg_write: Some((rd, pc_bytes.wrapping_add(imm.wrapping_shl(12)))),
                mem_write: None,
                next_pc: pc + 1,
                signals: SignalSnapshot::UpperImm,
            })
        }
    }
}

/// Fetches operand `idx` or reports it missing.
fn operand(inst: &Instruction, idx: usize) -> Result<&str, StepError> {
    inst.operands
        .get(idx)
        .map(String::as_str)
        .ok_or_else(|| StepError::MissingOperand {
            mnemonic: inst.mnemonic.clone(),
            index: idx,
        })
}

/// Resolves a register token, honoring the configured policy.
fn reg_index(token: &str, policy: Policy) -> Result<usize, StepError> {
    match abi::register_index(token) {
        Some(idx) => Ok(idx),
        None if policy == Policy::Permissive => Ok(abi::REG_ZERO),
        None => Err(StepError::BadRegister(token.to_string())),
    }
}

/// Parses a decimal immediate/offset token.
fn parse_imm(token: &str) -> Result<i32, StepError> {
    token
        .parse::<i64>()
        .map(|v| v as i32)
        .map_err(|_| StepError::BadImmediate(token.to_string()))
}

/// Sign-extends the low `bits` bits of `value`.
fn sign_extend(value: i32, bits: u32) -> i32 {
    let shift = 32 - bits;
    value.wrapping_shl(shift) >> shift
}

/// Validates (strict) or masks (permissive) an immediate shift amount.
fn shamt(raw: i32, policy: Policy) -> Result<i32, StepError> {
    if (0..32).contains(&raw) {
        Ok(raw)
    } else if policy == Policy::Permissive {
        Ok(raw & 0x1f)
    } else {
        Err(StepError::BadShiftAmount(raw))
    }
}

/// The value written to `rd` by `jal`/`jalr`: the return point in
/// instruction units.
fn link_value(pc: usize) -> i32 {
    (pc as i32).wrapping_add(1)
}

/// Computes `pc + offset`, rejecting targets before instruction 0.
/// Targets at or past the end of the program are valid; they halt the
/// machine on the next step.
fn relative_target(pc: usize, offset: i32) -> Result<usize, StepError> {
    let target = pc as i64 + i64::from(offset);
    if target < 0 {
        return Err(StepError::BadJumpTarget(target));
    }
    Ok(target as usize)
}

/// Integer ALU. Shift amounts use the low five bits of `b`; all
/// arithmetic wraps at 32 bits.
fn alu(op: AluOp, a: i32, b: i32) -> i32 {
    match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::And => a & b,
        AluOp::Or => a | b,
        AluOp::Xor => a ^ b,
        AluOp::Sll => a.wrapping_shl((b & 0x1f) as u32),
        AluOp::Srl => ((a as u32) >> (b & 0x1f)) as i32,
        AluOp::Sra => a >> (b & 0x1f),
        AluOp::Slt => i32::from(a < b),
        AluOp::Sltu => i32::from((a as u32) < (b as u32)),
        AluOp::Eq => i32::from(a == b),
        AluOp::Ne => i32::from(a != b),
    }
}

/// Branch comparison. `blt`/`bge` are signed, `bltu`/`bgeu` unsigned.
fn branch_taken(opcode: Opcode, a: i32, b: i32) -> bool {
    match opcode {
        Opcode::Beq => a == b,
        Opcode::Bne => a != b,
        Opcode::Blt => a < b,
        Opcode::Bge => a >= b,
        Opcode::Bltu => (a as u32) < (b as u32),
        Opcode::Bgeu => (a as u32) >= (b as u32),
        _ => unreachable!("branch_taken called for non-branch opcode"),
    }
}

/// Extracts the loaded value from the addressed word for sub-word loads.
///
/// Memory has no byte lanes in this word-indexed design, so `lh`/`lb` read
/// the low halfword/byte of the addressed word, sign- or zero-extended.
fn narrow_load(opcode: Opcode, word: i32) -> i32 {
    match opcode {
        Opcode::Lw => word,
        Opcode::Lh => i32::from(word as i16),
        Opcode::Lhu => i32::from(word as u16),
        Opcode::Lb => i32::from(word as i8),
        Opcode::Lbu => i32::from(word as u8),
        _ => unreachable!("narrow_load called for non-load opcode"),
    }
}

/// Merges a sub-word store into the addressed word, preserving its
/// upper bits.
fn narrow_store(opcode: Opcode, old: i32, src: i32) -> i32 {
    match opcode {
        Opcode::Sw => src,
        Opcode::Sh => (old & !0xFFFF) | (src & 0xFFFF),
        Opcode::Sb => (old & !0xFF) | (src & 0xFF),
        _ => unreachable!("narrow_store called for non-store opcode"),
    }
}
