//! Error types for program loading and instruction stepping.
//!
//! Two failure domains exist:
//! 1. **Load errors** are fatal for the load attempt: the program is not
//!    (re)placed and the previous program, if any, stays loaded.
//! 2. **Step errors** are recoverable: the failing step mutates nothing,
//!    continuous-run mode stops, and architectural state from before the
//!    failing instruction remains inspectable.

use thiserror::Error;

/// Fatal errors raised while assembling a program from source text.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    /// A branch or jump names a label that is never declared.
    #[error("line {line}: unresolved label `{label}`")]
    UnresolvedLabel {
        /// The label name as written in the operand.
        label: String,
        /// 1-based source line number of the referencing instruction.
        line: usize,
    },
}

/// Recoverable errors raised while executing a single instruction.
///
/// A step error leaves registers, memory, and the PC exactly as they were
/// before the step.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StepError {
    /// The mnemonic is not in the instruction table.
    #[error("unsupported instruction `{0}`")]
    UnknownMnemonic(String),

    /// A register token is neither `x0`-`x31` nor an ABI name
    /// (strict policy only).
    #[error("unknown register `{0}`")]
    BadRegister(String),

    /// An immediate or offset operand is not a decimal integer.
    #[error("malformed immediate `{0}`")]
    BadImmediate(String),

    /// The instruction has fewer operands than its format requires.
    #[error("`{mnemonic}` is missing operand {index}")]
    MissingOperand {
        /// The instruction's mnemonic.
        mnemonic: String,
        /// 0-based index of the first missing operand.
        index: usize,
    },

    /// Effective address outside the data memory (strict policy only).
    #[error("memory address {0} out of range")]
    AddressOutOfRange(i64),

    /// Immediate shift amount outside 0..=31 (strict policy only).
    #[error("shift amount {0} out of range")]
    BadShiftAmount(i32),

    /// A taken branch or jump would move the PC before instruction 0.
    #[error("control transfer to negative instruction index {0}")]
    BadJumpTarget(i64),
}
