//! # Branch Instruction Tests
//!
//! This module covers conditional branches: taken and not-taken paths,
//! offsets measured in instruction units, signed versus unsigned
//! comparison, and backward loops.

use rvstep_core::isa::{AluOp, InstrClass};
use rvstep_core::{StepError, StepOutcome};

use crate::common::TestContext;

fn run(source: &str) -> TestContext {
    let mut ctx = TestContext::new().load(source);
    ctx.run_to_halt();
    ctx
}

/// A taken branch skips the instructions between it and its target.
#[test]
fn taken_branch_skips_instructions() {
    let ctx = run(
        "beq x0, x0, skip\n\
         addi x1, x0, 1\n\
         skip:\n\
         addi x2, x0, 2\n",
    );
    assert_eq!(ctx.reg(1), 0, "skipped");
    assert_eq!(ctx.reg(2), 2);
}

/// A not-taken branch falls through to the next instruction.
#[test]
fn not_taken_branch_falls_through() {
    let ctx = run(
        "addi x1, x0, 1\n\
         bne x1, x1, skip\n\
         addi x2, x0, 2\n\
         skip:\n",
    );
    assert_eq!(ctx.reg(2), 2);
}

/// Branch offsets are in instruction units: the PC moves by the literal
/// offset, not by a byte distance.
#[test]
fn offset_is_in_instruction_units() {
    let mut ctx = TestContext::new().load(
        "beq x0, x0, 2\n\
         addi x1, x0, 1\n\
         addi x2, x0, 2\n",
    );
    ctx.step_n(1);
    assert_eq!(ctx.sim.pc(), 2);
}

#[test]
fn blt_and_bge_are_signed() {
    let ctx = run(
        "addi x1, x0, -1\n\
         addi x2, x0, 1\n\
         blt x1, x2, a\n\
         addi x3, x0, 99\n\
         a:\n\
         bge x1, x2, b\n\
         addi x4, x0, 4\n\
         b:\n",
    );
    assert_eq!(ctx.reg(3), 0, "blt -1 < 1 taken");
    assert_eq!(ctx.reg(4), 4, "bge -1 >= 1 not taken");
}

/// `bltu`/`bgeu` treat -1 as the largest unsigned value.
#[test]
fn bltu_and_bgeu_are_unsigned() {
    let ctx = run(
        "addi x1, x0, -1\n\
         addi x2, x0, 1\n\
         bltu x1, x2, a\n\
         addi x3, x0, 3\n\
         a:\n\
         bgeu x1, x2, b\n\
         addi x4, x0, 99\n\
         b:\n",
    );
    assert_eq!(ctx.reg(3), 3, "0xFFFFFFFF is not < 1 unsigned");
    assert_eq!(ctx.reg(4), 0, "bgeu taken");
}

/// A backward branch implements a countdown loop.
#[test]
fn backward_loop_terminates() {
    let ctx = run(
        "addi x1, x0, 5\n\
         loop:\n\
         addi x2, x2, 3\n\
         addi x1, x1, -1\n\
         bne x1, x0, loop\n",
    );
    assert_eq!(ctx.reg(1), 0);
    assert_eq!(ctx.reg(2), 15);
}

/// Branching past the last instruction halts the machine cleanly.
#[test]
fn branch_to_end_halts() {
    let mut ctx = TestContext::new().load(
        "beq x0, x0, done\n\
         addi x1, x0, 1\n\
         done:\n",
    );
    ctx.step_n(1);
    assert_eq!(ctx.sim.pc(), 2);
    assert!(matches!(ctx.sim.step(), StepOutcome::Finished));
}

/// A taken branch to before instruction 0 faults instead of wrapping.
#[test]
fn branch_before_program_start_faults() {
    let mut ctx = TestContext::new().load("beq x0, x0, -1\n");
    assert!(matches!(
        ctx.sim.step(),
        StepOutcome::Faulted(StepError::BadJumpTarget(-1))
    ));
}

/// A not-taken branch with a bad target does not fault; the offset is
/// only evaluated when the branch is taken.
#[test]
fn not_taken_branch_ignores_bad_target() {
    let mut ctx = TestContext::new().load(
        "addi x1, x0, 1\n\
         beq x1, x0, -5\n",
    );
    ctx.run_to_halt();
    assert_eq!(ctx.sim.pc(), 2);
}

/// Branch snapshots carry the comparison tag and the taken flag.
#[test]
fn branch_signal_snapshot() {
    let mut ctx = TestContext::new().load(
        "beq x0, x0, 1\n\
         bne x0, x0, 1\n",
    );
    ctx.step_n(1);
    let taken = ctx.sim.signals().unwrap();
    assert_eq!(taken.class(), InstrClass::Branch);
    assert_eq!(taken.alu_op(), AluOp::Eq);
    assert!(taken.branch());
    assert!(taken.branch_taken());
    assert!(!taken.reg_write());

    ctx.step_n(1);
    let not_taken = ctx.sim.signals().unwrap();
    assert_eq!(not_taken.alu_op(), AluOp::Ne);
    assert!(not_taken.branch());
    assert!(!not_taken.branch_taken());
}
