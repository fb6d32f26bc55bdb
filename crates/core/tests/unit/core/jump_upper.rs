//! # Jump and Upper-Immediate Tests
//!
//! This module covers `jal`/`jalr` call-and-return behavior, the link
//! value in instruction units, and the `lui`/`auipc` upper-immediate
//! instructions.

use rvstep_core::isa::InstrClass;
use rvstep_core::{StepError, StepOutcome};

use crate::common::TestContext;

fn run(source: &str) -> TestContext {
    let mut ctx = TestContext::new().load(source);
    ctx.run_to_halt();
    ctx
}

/// `jal` links the return point (the following instruction's index) and
/// transfers control.
#[test]
fn jal_links_and_jumps() {
    let mut ctx = TestContext::new().load(
        "jal ra, target\n\
         addi x3, x0, 1\n\
         target:\n\
         addi x4, x0, 2\n",
    );
    ctx.step_n(1);
    assert_eq!(ctx.sim.pc(), 2);
    assert_eq!(ctx.reg(1), 1, "link value is the instruction after the jal");
}

/// A full call-and-return: `jal` into a subroutine, `jalr` back through
/// `ra`. The link value and the `jalr` target share the same units, so
/// the return lands on the instruction after the call.
#[test]
fn jal_jalr_call_and_return() {
    let ctx = run(
        "addi x10, x0, 5\n\
         jal ra, double\n\
         addi x11, x10, 0\n\
         beq x0, x0, end\n\
         double:\n\
         add x10, x10, x10\n\
         jalr x0, ra, 0\n\
         end:\n",
    );
    assert_eq!(ctx.reg(10), 10);
    assert_eq!(ctx.reg(11), 10, "execution resumed after the call site");
}

/// `jalr` targets `rs1 + imm` as an absolute instruction index.
#[test]
fn jalr_target_is_absolute() {
    let mut ctx = TestContext::new().load(
        "addi x1, x0, 3\n\
         jalr x5, x1, 1\n\
         addi x2, x0, 1\n\
         addi x3, x0, 1\n\
         addi x4, x0, 1\n",
    );
    ctx.step_n(2);
    assert_eq!(ctx.sim.pc(), 4);
    assert_eq!(ctx.reg(5), 2, "link still points after the jalr");
}

/// A jump to a negative index faults under either policy.
#[test]
fn negative_jump_targets_fault() {
    let mut jal = TestContext::new().load("jal x0, -1\n");
    assert!(matches!(
        jal.sim.step(),
        StepOutcome::Faulted(StepError::BadJumpTarget(-1))
    ));

    let mut jalr = TestContext::permissive().load(
        "addi x1, x0, -2\n\
         jalr x0, x1, 0\n",
    );
    jalr.step_n(1);
    assert!(matches!(
        jalr.sim.step(),
        StepOutcome::Faulted(StepError::BadJumpTarget(-2))
    ));
}

/// Jumping past the end of the program halts on the next step.
#[test]
fn jump_past_end_halts() {
    let mut ctx = TestContext::new().load("jal x0, 5\n");
    ctx.step_n(1);
    assert_eq!(ctx.sim.pc(), 5);
    assert!(matches!(ctx.sim.step(), StepOutcome::Finished));
}

/// `lui` places the immediate in the upper twenty bits.
#[test]
fn lui_shifts_into_upper_bits() {
    let ctx = run(
        "lui x1, 1\n\
         lui x2, 524288\n",
    );
    assert_eq!(ctx.reg(1), 4096);
    // 524288 << 12 wraps into the sign bit.
    assert_eq!(ctx.reg(2), i32::MIN);
}

/// `auipc` adds the shifted immediate to the PC's byte-address view
/// (instruction index times four).
#[test]
fn auipc_uses_byte_address_view() {
    let ctx = run(
        "nop\n\
         nop\n\
         auipc x1, 1\n\
         auipc x2, 0\n",
    );
    assert_eq!(ctx.reg(1), 2 * 4 + 4096);
    assert_eq!(ctx.reg(2), 3 * 4);
}

#[test]
fn jump_and_upper_signal_snapshots() {
    let mut ctx = TestContext::new().load(
        "jal x0, 1\n\
         lui x1, 1\n",
    );
    ctx.step_n(1);
    let jump = ctx.sim.signals().unwrap();
    assert_eq!(jump.class(), InstrClass::Jump);
    assert!(jump.jump());
    assert!(jump.reg_write());
    assert!(!jump.branch());

    ctx.step_n(1);
    let upper = ctx.sim.signals().unwrap();
    assert_eq!(upper.class(), InstrClass::UpperImm);
    assert!(upper.reg_write());
    assert!(!upper.jump());
}
