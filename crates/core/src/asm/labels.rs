//! Two-pass label resolution.
//!
//! Pass 1 ([`collect`]) maps each label to the instruction index of the
//! next real instruction. Pass 2 ([`resolve`]) rewrites the symbolic final
//! operand of branch/`jal` instructions into a relative offset in
//! instruction units, the same units the PC advances in.

use std::collections::HashMap;

use super::parser::{self, Instruction, SourceLine};
use crate::error::LoadError;
use crate::isa;

/// Collect pass: scans the raw lines and maps each label to the index of
/// the instruction that follows it.
///
/// A label declared after the last instruction maps to `program.len()`,
/// so branching to it halts the machine. Duplicate declarations keep the
/// last occurrence.
pub fn collect(lines: &[&str]) -> HashMap<String, usize> {
    let mut labels = HashMap::new();
    let mut index = 0usize;
    for line in lines {
        match parser::parse_line(line) {
            Some(SourceLine::Label(name)) => {
                let _ = labels.insert(name, index);
            }
            Some(SourceLine::Instruction(_)) => index += 1,
            None => {}
        }
    }
    labels
}

/// Resolve pass: rewrites a symbolic target operand to `target - source`
/// in instruction units.
///
/// Only branch and `jal` instructions carry label targets, and only when
/// the final operand is not already a numeric literal. `source_index` is
/// the instruction's position in the resolved program, not its raw line
/// number.
///
/// # Errors
///
/// [`LoadError::UnresolvedLabel`] if the operand is symbolic but absent
/// from the label map; `source_line` (1-based) is reported for context.
pub fn resolve(
    inst: &mut Instruction,
    source_index: usize,
    source_line: usize,
    labels: &HashMap<String, usize>,
) -> Result<(), LoadError> {
    let Some(spec) = isa::lookup(&inst.mnemonic) else {
        // Unknown mnemonics load fine and fail at step time.
        return Ok(());
    };
    if !isa::takes_label(spec) {
        return Ok(());
    }
    let Some(target) = inst.operands.last_mut() else {
        // Missing operands are a step-time error, not a load error.
        return Ok(());
    };
    if target.parse::<i64>().is_ok() {
        return Ok(());
    }
    match labels.get(target.as_str()) {
        Some(&target_index) => {
            let offset = target_index as i64 - source_index as i64;
            *target = offset.to_string();
            Ok(())
        }
        None => Err(LoadError::UnresolvedLabel {
            label: target.clone(),
            line: source_line,
        }),
    }
}
