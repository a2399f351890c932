use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use tomasim_core::common::constants::NOP;
use tomasim_core::common::error::DecodeError;
use tomasim_core::core::pipeline::signals::{AluOp, BrOp, FuType};
use tomasim_core::isa::decode;

use crate::common::builder::{InstructionBuilder as B, ebreak, ecall, fence};

#[rstest]
#[case(B::new().add(3, 1, 2).build(), "ADD x3, x1, x2, PC=0x40 (#1)")]
#[case(B::new().sub(3, 1, 2).build(), "SUB x3, x1, x2, PC=0x40 (#1)")]
#[case(B::new().sra(5, 6, 7).build(), "SRA x5, x6, x7, PC=0x40 (#1)")]
#[case(B::new().sltu(5, 6, 7).build(), "SLTU x5, x6, x7, PC=0x40 (#1)")]
#[case(B::new().addi(1, 0, 5).build(), "ADDI x1, x0, 0x5, PC=0x40 (#1)")]
#[case(B::new().addi(1, 2, -1).build(), "ADDI x1, x2, 0xffffffff, PC=0x40 (#1)")]
#[case(B::new().lw(4, 2, 8).build(), "LW x4, x2, 0x8, PC=0x40 (#1)")]
#[case(B::new().sw(2, 4, 12).build(), "SW x2, x4, 0xc, PC=0x40 (#1)")]
#[case(B::new().beq(1, 2, 16).build(), "BEQ x1, x2, 0x10, PC=0x40 (#1)")]
#[case(B::new().jal(1, 2048).build(), "JAL x1, 0x800, PC=0x40 (#1)")]
#[case(B::new().jalr(0, 1, 0).build(), "JALR x1, 0x0, PC=0x40 (#1)")]
#[case(B::new().lui(7, 0xABCDE).build(), "LUI x7, 0xabcde000, PC=0x40 (#1)")]
#[case(B::new().csrrs(2, 0x340, 0).build(), "CSRRS x2, x0, 0x340, PC=0x40 (#1)")]
#[case(B::new().csrrwi(2, 0x340, 3).build(), "CSRRWI x2, 0x340, PC=0x40 (#1)")]
#[case(ebreak(), "EBREAK 0x1, PC=0x40 (#1)")]
#[case(fence(), "FENCE, PC=0x40 (#1)")]
fn test_printer(#[case] word: u32, #[case] expected: &str) {
    let instr = decode(word, 0x40, 1).unwrap();
    assert_eq!(instr.to_string(), expected);
}

#[rstest]
#[case(B::new().add(1, 2, 3).build(), FuType::Alu)]
#[case(B::new().lui(1, 1).build(), FuType::Alu)]
#[case(B::new().auipc(1, 1).build(), FuType::Alu)]
#[case(B::new().bne(1, 2, 8).build(), FuType::Bru)]
#[case(B::new().jal(1, 8).build(), FuType::Bru)]
#[case(B::new().jalr(1, 2, 0).build(), FuType::Bru)]
#[case(B::new().lbu(1, 2, 0).build(), FuType::Lsu)]
#[case(B::new().sh(1, 2, 0).build(), FuType::Lsu)]
#[case(B::new().csrrc(1, 0x340, 2).build(), FuType::Sfu)]
#[case(ecall(), FuType::Alu)]
#[case(fence(), FuType::Alu)]
fn test_unit_classification(#[case] word: u32, #[case] unit: FuType) {
    assert_eq!(decode(word, 0, 0).unwrap().fu_type(), unit);
}

#[test]
fn test_operations_selected() {
    let sub = decode(B::new().sub(1, 2, 3).build(), 0, 0).unwrap();
    assert_eq!(sub.alu_op(), AluOp::Sub);
    assert_eq!(sub.br_op(), BrOp::None);

    let srai = decode(B::new().srai(1, 2, 4).build(), 0, 0).unwrap();
    assert_eq!(srai.alu_op(), AluOp::Sra);

    let bgeu = decode(B::new().bgeu(1, 2, -8).build(), 0, 0).unwrap();
    assert_eq!(bgeu.br_op(), BrOp::Bgeu);
    assert_eq!(bgeu.imm() as i32, -8);
    assert!(bgeu.is_control_flow());

    let barrier = decode(fence(), 0, 0).unwrap();
    assert_eq!(barrier.alu_op(), AluOp::None);
    assert!(!barrier.is_control_flow());
}

#[test]
fn test_x0_destination_is_not_written() {
    let instr = decode(B::new().addi(0, 1, 5).build(), 0, 0).unwrap();
    assert_eq!(instr.dest(), None);
    assert!(!instr.flags().use_rd);

    let instr = decode(B::new().addi(3, 1, 5).build(), 0, 0).unwrap();
    assert_eq!(instr.dest(), Some(3));
}

#[test]
fn test_exit_flags() {
    assert!(decode(ecall(), 0, 0).unwrap().flags().is_exit);
    assert!(decode(ebreak(), 0, 0).unwrap().flags().is_exit);
    assert!(!decode(B::new().nop().build(), 0, 0).unwrap().flags().is_exit);
}

#[test]
fn test_csr_operand_usage() {
    let reg = decode(B::new().csrrw(1, 0x340, 2).build(), 0, 0).unwrap();
    assert!(reg.flags().use_rs1);
    assert!(reg.flags().is_csr);

    let imm = decode(B::new().csrrwi(1, 0x340, 2).build(), 0, 0).unwrap();
    assert!(!imm.flags().use_rs1);
    assert!(imm.flags().alu_s1_rs1);
}

#[test]
fn test_unknown_opcode() {
    // Opcode 0x07 is LOAD-FP, not part of RV32I.
    let err = decode(0x0000_2007, 0x80, 0).unwrap_err();
    assert_eq!(
        err,
        DecodeError::UnknownOpcode {
            word: 0x0000_2007,
            opcode: 0x07,
            pc: 0x80,
        }
    );
}

#[rstest]
// funct7 0x01 is the M extension.
#[case(0x0220_81B3)]
// Load funct3 0b011 is LD (RV64 only).
#[case(0x0000_3083)]
// Store funct3 0b011 is SD (RV64 only).
#[case(0x0010_3023)]
// Branch funct3 0b010 is reserved.
#[case(0x0000_2063)]
// SLLI with a non-zero funct7.
#[case(0x4000_1093)]
// System funct3 0b100 is reserved.
#[case(0x0000_4073)]
// WFI is not implemented.
#[case(0x1050_0073)]
fn test_unknown_operation(#[case] word: u32) {
    assert!(
        matches!(
            decode(word, 0, 0),
            Err(DecodeError::UnknownOperation { .. })
        ),
        "{word:#010x} should be rejected"
    );
}

proptest! {
    #[test]
    fn prop_addi_immediate_sign_extended(imm in -2048i32..2048, rd in 1u32..32, rs1 in 0u32..32) {
        let instr = decode(B::new().addi(rd, rs1, imm).build(), 0, 0).unwrap();
        prop_assert_eq!(instr.imm() as i32, imm);
        prop_assert_eq!(instr.rd(), rd as usize);
        prop_assert_eq!(instr.rs1(), rs1 as usize);
    }

    #[test]
    fn prop_store_immediate(imm in -2048i32..2048) {
        let instr = decode(B::new().sw(1, 2, imm).build(), 0, 0).unwrap();
        prop_assert_eq!(instr.imm() as i32, imm);
    }

    #[test]
    fn prop_branch_immediate(half in -2048i32..2048) {
        let imm = half * 2;
        let instr = decode(B::new().blt(1, 2, imm).build(), 0, 0).unwrap();
        prop_assert_eq!(instr.imm() as i32, imm);
    }

    #[test]
    fn prop_jal_immediate(half in -(1i32 << 19)..(1i32 << 19)) {
        let imm = half * 2;
        let instr = decode(B::new().jal(1, imm).build(), 0, 0).unwrap();
        prop_assert_eq!(instr.imm() as i32, imm);
    }

    #[test]
    fn prop_decode_never_panics(word in any::<u32>(), pc in any::<u32>()) {
        if let Ok(instr) = decode(word, pc, 0) {
            prop_assert_eq!(instr.raw(), word);
            prop_assert_eq!(instr.pc(), pc);
            prop_assert!(!instr.to_string().is_empty());
        }
    }
}

#[test]
fn test_canonical_nop() {
    assert_eq!(B::new().nop().build(), NOP);
    let nop = decode(NOP, 0, 0).unwrap();
    assert_eq!(nop.dest(), None);
    assert_eq!(nop.to_string(), "ADDI x0, 0x0, PC=0x0 (#0)");
}
