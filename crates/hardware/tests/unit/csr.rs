use pretty_assertions::assert_eq;

use tomasim_core::core::arch::csr::{CYCLE, INSTRET, MHARTID, MSCRATCH};

use crate::common::builder::InstructionBuilder as B;
use crate::common::harness::TestContext;

#[test]
fn test_read_modify_write_sequence() {
    let mut ctx = TestContext::new().load_program(&[
        B::new().addi(1, 0, 0x55).build(),
        B::new().csrrw(0, MSCRATCH, 1).build(),
        B::new().csrrs(2, MSCRATCH, 0).build(),
        B::new().csrrci(3, MSCRATCH, 0x5).build(),
        B::new().csrrs(4, MSCRATCH, 0).build(),
        B::new().csrrsi(5, MSCRATCH, 0xF).build(),
        B::new().csrrc(6, MSCRATCH, 1).build(),
    ]);

    ctx.run_to_completion(100);

    assert_eq!(ctx.get_reg(2), 0x55);
    assert_eq!(ctx.get_reg(3), 0x55);
    assert_eq!(ctx.get_reg(4), 0x50);
    assert_eq!(ctx.get_reg(5), 0x50);
    assert_eq!(ctx.get_reg(6), 0x5F);
    assert_eq!(ctx.cpu.csrs().read(MSCRATCH), 0x0A);
    assert_eq!(ctx.cpu.retired(), 7);
}

#[test]
fn test_swap_returns_old_value() {
    let mut ctx = TestContext::new().load_program(&[
        B::new().csrrwi(1, MSCRATCH, 7).build(),
        B::new().csrrwi(2, MSCRATCH, 9).build(),
    ]);

    ctx.run_to_completion(50);

    assert_eq!(ctx.get_reg(1), 0);
    assert_eq!(ctx.get_reg(2), 7);
    assert_eq!(ctx.cpu.csrs().read(MSCRATCH), 9);
}

#[test]
fn test_counters_reflect_core_progress() {
    let mut ctx = TestContext::new().load_program(&[
        B::new().nop().build(),
        B::new().nop().build(),
        B::new().csrrs(1, CYCLE, 0).build(),
        B::new().csrrs(2, INSTRET, 0).build(),
    ]);

    ctx.run_to_completion(50);

    // Sampled when each CSR read dispatches: the first in cycle 2, the
    // second in cycle 4 after three commits (it waits behind the first).
    assert_eq!(ctx.get_reg(1), 2);
    assert_eq!(ctx.get_reg(2), 3);
}

#[test]
fn test_read_only_csrs_ignore_writes() {
    let mut ctx = TestContext::new().load_program(&[
        B::new().addi(1, 0, -1).build(),
        B::new().csrrw(0, MHARTID, 1).build(),
        B::new().csrrs(2, MHARTID, 0).build(),
    ]);

    ctx.run_to_completion(50);

    assert_eq!(ctx.get_reg(2), 0);
}
