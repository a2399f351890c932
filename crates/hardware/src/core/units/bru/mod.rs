//! Branch Resolution Unit (BRU).
//!
//! Evaluates conditional branches and jumps once their operands are known.
//! There is no prediction: the resolved next PC is handed back to fetch,
//! which stalls behind every control-flow instruction.

use crate::common::constants::INSTRUCTION_SIZE;
use crate::core::pipeline::signals::BrOp;
use crate::isa::instruction::Instr;

/// Result of resolving a control-flow instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Value for `rd`: the return address for jumps, zero for branches.
    pub link: u32,
    /// Address of the next instruction on the architectural path.
    pub next_pc: u32,
}

/// Branch unit.
#[derive(Debug)]
pub struct Bru;

impl Bru {
    /// Evaluates the condition of `op` on `(a, b)`.
    ///
    /// Jumps are always taken; `BrOp::None` never is.
    pub const fn taken(op: BrOp, a: u32, b: u32) -> bool {
        match op {
            BrOp::Beq => a == b,
            BrOp::Bne => a != b,
            BrOp::Blt => (a as i32) < (b as i32),
            BrOp::Bge => (a as i32) >= (b as i32),
            BrOp::Bltu => a < b,
            BrOp::Bgeu => a >= b,
            BrOp::Jal | BrOp::Jalr => true,
            BrOp::None => false,
        }
    }

    /// Resolves `instr` with source values `rs1` and `rs2`.
    pub const fn resolve(instr: &Instr, rs1: u32, rs2: u32) -> Resolution {
        let pc = instr.pc();
        let fallthrough = pc.wrapping_add(INSTRUCTION_SIZE);
        let op = instr.br_op();

        let next_pc = match op {
            BrOp::Jalr => rs1.wrapping_add(instr.imm()) & !1,
            _ if Self::taken(op, rs1, rs2) => pc.wrapping_add(instr.imm()),
            _ => fallthrough,
        };
        let link = if matches!(op, BrOp::Jal | BrOp::Jalr) {
            fallthrough
        } else {
            0
        };

        Resolution { link, next_pc }
    }
}
