//! # Register-Register Instruction Tests
//!
//! This module runs small programs through the simulator and checks the
//! architectural result of each R-type instruction, including 32-bit
//! wrapping, shift-amount masking, and the signed/unsigned comparisons.

use rvstep_core::core::signals::AluSrc;
use rvstep_core::isa::InstrClass;

use crate::common::TestContext;

/// Run a program to completion and return the context for inspection.
fn run(source: &str) -> TestContext {
    let mut ctx = TestContext::new().load(source);
    ctx.run_to_halt();
    ctx
}

#[test]
fn add_sums_registers() {
    let ctx = run(
        "addi x1, x0, 7\n\
         addi x2, x0, 5\n\
         add x3, x1, x2\n",
    );
    assert_eq!(ctx.reg(3), 12);
}

/// Addition wraps at 32 bits instead of trapping.
#[test]
fn add_wraps_on_overflow() {
    let ctx = run(
        "lui x1, 524287\n\
         addi x1, x1, 2047\n\
         add x2, x1, x1\n",
    );
    // x1 = 0x7FFF_F7FF; doubling it overflows into the sign bit.
    assert_eq!(ctx.reg(1), 0x7FFF_F7FF);
    assert_eq!(ctx.reg(2), 0x7FFF_F7FFi32.wrapping_mul(2));
}

#[test]
fn sub_subtracts() {
    let ctx = run(
        "addi x1, x0, 5\n\
         addi x2, x0, 9\n\
         sub x3, x1, x2\n",
    );
    assert_eq!(ctx.reg(3), -4);
}

#[test]
fn bitwise_ops() {
    let ctx = run(
        "addi x1, x0, 12\n\
         addi x2, x0, 10\n\
         and x3, x1, x2\n\
         or x4, x1, x2\n\
         xor x5, x1, x2\n",
    );
    assert_eq!(ctx.reg(3), 8);
    assert_eq!(ctx.reg(4), 14);
    assert_eq!(ctx.reg(5), 6);
}

#[test]
fn shifts_left_and_right() {
    let ctx = run(
        "addi x1, x0, -8\n\
         addi x2, x0, 2\n\
         sll x3, x1, x2\n\
         srl x4, x1, x2\n\
         sra x5, x1, x2\n",
    );
    assert_eq!(ctx.reg(3), -32);
    // srl shifts zeros in; sra keeps the sign.
    assert_eq!(ctx.reg(4), ((-8i32 as u32) >> 2) as i32);
    assert_eq!(ctx.reg(5), -2);
}

/// Register shift amounts use only the low five bits of rs2.
#[test]
fn shift_amount_uses_low_five_bits() {
    let ctx = run(
        "addi x1, x0, 1\n\
         addi x2, x0, 33\n\
         sll x3, x1, x2\n",
    );
    assert_eq!(ctx.reg(3), 2);
}

#[test]
fn slt_is_signed_sltu_is_unsigned() {
    let ctx = run(
        "addi x1, x0, -1\n\
         addi x2, x0, 1\n\
         slt x3, x1, x2\n\
         sltu x4, x1, x2\n",
    );
    assert_eq!(ctx.reg(3), 1, "-1 < 1 signed");
    assert_eq!(ctx.reg(4), 0, "0xFFFFFFFF is unsigned max");
}

/// A result targeted at x0 is discarded.
#[test]
fn writes_to_x0_are_discarded() {
    let ctx = run(
        "addi x1, x0, 3\n\
         add x0, x1, x1\n",
    );
    assert_eq!(ctx.reg(0), 0);
}

/// R-type steps snapshot register-sourced ALU signals with write-back.
#[test]
fn rtype_signal_snapshot() {
    let mut ctx = TestContext::new().load("add x1, x0, x0\n");
    ctx.step_n(1);
    let signals = ctx.sim.signals().unwrap();
    assert_eq!(signals.class(), InstrClass::RType);
    assert_eq!(signals.alu_src(), AluSrc::Register);
    assert!(signals.reg_write());
    assert!(!signals.mem_write());
    assert!(!signals.mem_to_reg());
    assert!(!signals.branch());
    assert!(!signals.jump());
}
