//! System Function Unit (SFU).
//!
//! Executes the Zicsr read-modify-write instructions. The destination register
//! receives the CSR's previous value. CSRRS/CSRRC (and their immediate forms)
//! with a zero source leave the CSR untouched.

use crate::core::arch::csr::CsrFile;
use crate::core::units::alu::Alu;
use crate::isa::instruction::{InstructionBits, Instr};
use crate::isa::privileged::opcodes as sys_op;

/// CSR access unit.
#[derive(Debug)]
pub struct Sfu;

impl Sfu {
    /// Executes the CSR instruction `instr` with `rs1` as the register source.
    ///
    /// Returns the old CSR value for `rd`.
    pub fn execute(instr: &Instr, rs1: u32, csrs: &mut CsrFile) -> u32 {
        let flags = instr.flags();
        let addr = instr.raw().csr();
        let old = csrs.read(addr);

        let src = if flags.alu_s1_rs1 {
            instr.rs1() as u32
        } else {
            rs1
        };
        let operand = if flags.alu_s1_inv { !src } else { src };

        let is_swap = matches!(instr.funct3(), sys_op::CSRRW | sys_op::CSRRWI);
        if is_swap {
            csrs.write(addr, operand);
        } else if src != 0 {
            csrs.write(addr, Alu::execute(instr.alu_op(), operand, old));
        }
        old
    }
}
