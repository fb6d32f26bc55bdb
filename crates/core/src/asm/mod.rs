//! Assembly-text loading: parsing plus label resolution.
//!
//! [`assemble`] turns free-form source text (one instruction or label per
//! line, `#` comments) into an immutable [`Program`]. Label resolution is
//! a pure function of the source text: loading the same text twice yields
//! identical programs.

/// Two-pass label collection and resolution.
pub mod labels;
/// Per-line tokenizer/parser.
pub mod parser;

use serde::Serialize;

pub use parser::{Instruction, SourceLine};

use crate::error::LoadError;

/// An ordered, immutable-once-loaded sequence of parsed instructions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// True if the program contains no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The instruction at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    /// Iterates over the instructions in order.
    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.instructions.iter()
    }
}

/// Assembles source text into a program with labels resolved to relative
/// instruction offsets.
///
/// # Errors
///
/// [`LoadError::UnresolvedLabel`] if a branch/jump references a label that
/// is never declared; the load aborts and no partial program is produced.
pub fn assemble(source: &str) -> Result<Program, LoadError> {
    let lines: Vec<&str> = source.lines().collect();
    let labels = labels::collect(&lines);

    let mut instructions = Vec::new();
    for (line_no, line) in lines.iter().enumerate() {
        if let Some(SourceLine::Instruction(mut inst)) = parser::parse_line(line) {
            labels::resolve(&mut inst, instructions.len(), line_no + 1, &labels)?;
            instructions.push(inst);
        }
    }
    Ok(Program { instructions })
}
