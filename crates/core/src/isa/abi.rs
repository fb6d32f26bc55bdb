//! Register-name resolution for numeric (`x0`-`x31`) and ABI mnemonic names.
//!
//! The parser keeps register operands as raw tokens; the executor resolves
//! them through this module at step time, so a bad register name surfaces as
//! a step error (or as `x0` under the permissive policy) rather than a load
//! failure.

/// Number of general-purpose registers.
pub const REG_COUNT: usize = 32;

/// Register x0 (hardwired zero).
pub const REG_ZERO: usize = 0;
/// Register x1 (return address, `ra`).
pub const REG_RA: usize = 1;
/// Register x2 (stack pointer, `sp`).
pub const REG_SP: usize = 2;

/// Standard ABI names, indexed by register number.
const ABI_NAMES: [&str; REG_COUNT] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// Resolves a register token to its index.
///
/// Accepts the numeric form (`x0`..`x31`), the standard ABI names
/// (`zero`, `ra`, `sp`, `t0`-`t6`, `s0`-`s11`, `a0`-`a7`), and `fp` as an
/// alias for `s0`. Matching is case-insensitive.
///
/// Returns `None` for anything else; the caller decides whether that is an
/// error or a permissive fallback to `x0`.
pub fn register_index(token: &str) -> Option<usize> {
    let name = token.to_ascii_lowercase();
    if let Some(digits) = name.strip_prefix('x') {
        if let Ok(idx) = digits.parse::<usize>() {
            if idx < REG_COUNT && !digits.starts_with('+') {
                return Some(idx);
            }
        }
        return None;
    }
    if name == "fp" {
        return Some(8);
    }
    ABI_NAMES.iter().position(|&n| n == name)
}

/// Returns the canonical ABI name for a register index.
///
/// # Panics
///
/// Panics if `idx >= 32`.
pub fn register_name(idx: usize) -> &'static str {
    ABI_NAMES[idx]
}
