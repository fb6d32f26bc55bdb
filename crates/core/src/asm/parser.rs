//! Per-line assembly parser.
//!
//! Parsing is a pure function of one source line. It performs:
//! 1. **Comment stripping:** everything after `#` is discarded.
//! 2. **Label recognition:** a line consisting solely of `identifier:`.
//! 3. **Load/store form:** `mnemonic reg, offset(reg)` is captured as the
//!    canonical operand order `[data, offset, base]`.
//! 4. **Generic form:** all other instructions split on runs of
//!    whitespace, commas, and parentheses.
//!
//! Register tokens and immediates are kept as raw strings here; they are
//! resolved at step time so that operand errors are recoverable per
//! instruction instead of failing the whole load.

use serde::Serialize;

use crate::isa::{self, InstrClass};

/// One parsed instruction: the raw source text (for display), the
/// lower-cased mnemonic, and its operand tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Instruction {
    /// The source line with comments stripped, for display layers.
    pub raw: String,
    /// Lower-cased mnemonic.
    pub mnemonic: String,
    /// Operand tokens, in canonical order for loads/stores.
    pub operands: Vec<String>,
}

/// A meaningful source line: either a label declaration or an instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceLine {
    /// A label declaration (`name:` on its own line).
    Label(String),
    /// An instruction.
    Instruction(Instruction),
}

/// Parses one line of source text.
///
/// Returns `None` for blank and comment-only lines.
pub fn parse_line(line: &str) -> Option<SourceLine> {
    let code = line.split('#').next().unwrap_or_default().trim();
    if code.is_empty() {
        return None;
    }

    if let Some(name) = code.strip_suffix(':') {
        let name = name.trim();
        if is_identifier(name) {
            return Some(SourceLine::Label(name.to_string()));
        }
    }

    let mut tokens = split_operands(code);
    if tokens.is_empty() {
        return None;
    }
    let mnemonic = tokens.remove(0).to_ascii_lowercase();

    // Loads/stores written as `reg, offset(reg)` split into the canonical
    // [data, offset, base] order already, but normalize through the
    // explicit form so `lw x5 , -4 ( x0 )` and friends parse the same way.
    if let Some(spec) = isa::lookup(&mnemonic) {
        if matches!(spec.class, InstrClass::Load | InstrClass::Store) {
            if let Some(operands) = parse_mem_operands(code, &mnemonic) {
                return Some(SourceLine::Instruction(Instruction {
                    raw: code.to_string(),
                    mnemonic,
                    operands,
                }));
            }
        }
    }

    Some(SourceLine::Instruction(Instruction {
        raw: code.to_string(),
        mnemonic,
        operands: tokens,
    }))
}

/// Splits an instruction body on runs of whitespace, commas, and parens.
fn split_operands(code: &str) -> Vec<String> {
    code.split(|c: char| c.is_whitespace() || c == ',' || c == '(' || c == ')')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Captures the `reg, offset(base)` form, returning `[data, offset, base]`.
///
/// Falls back to `None` (generic splitting) when the parentheses are
/// absent or malformed; the generic split yields the same canonical order
/// for well-formed input anyway.
fn parse_mem_operands(code: &str, mnemonic: &str) -> Option<Vec<String>> {
    let rest = code[mnemonic.len()..].trim();
    let (data, addr) = rest.split_once(',')?;
    let (offset, base) = addr.trim().split_once('(')?;
    let base = base.trim().strip_suffix(')')?;
    Some(vec![
        data.trim().to_string(),
        offset.trim().to_string(),
        base.trim().to_string(),
    ])
}

/// A label identifier: starts with a letter or `_`, continues with
/// alphanumerics and `_`.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
