//! Instruction encoding and the decoded instruction record.
//!
//! Provides bit extraction functions for the fixed RISC-V field positions and
//! the immutable record the decoder produces for each dynamic instruction.

use crate::core::pipeline::signals::{AluOp, BrOp, ExeFlags, FuType};
use crate::isa::privileged::opcodes as sys_op;
use crate::isa::rv32i::opcodes;

/// Bit mask for extracting the opcode field (bits 0-6).
pub const OPCODE_MASK: u32 = 0x7F;
/// Bit mask for extracting a register field (5 bits).
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for extracting the funct3 field (bits 12-14).
pub const FUNCT3_MASK: u32 = 0x7;
/// Bit mask for extracting the funct7 field (bits 25-31).
pub const FUNCT7_MASK: u32 = 0x7F;
/// Bit mask for extracting the CSR address field (bits 20-31).
pub const CSR_MASK: u32 = 0xFFF;

/// Bit position of the destination register field.
pub const RD_SHIFT: u32 = 7;
/// Bit position of the funct3 field.
pub const FUNCT3_SHIFT: u32 = 12;
/// Bit position of the first source register field.
pub const RS1_SHIFT: u32 = 15;
/// Bit position of the second source register field.
pub const RS2_SHIFT: u32 = 20;
/// Bit position of the funct7 field.
pub const FUNCT7_SHIFT: u32 = 25;

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 0-6).
    fn opcode(&self) -> u32;

    /// Extracts the destination register field (bits 7-11).
    fn rd(&self) -> usize;

    /// Extracts the first source register field (bits 15-19).
    fn rs1(&self) -> usize;

    /// Extracts the second source register field (bits 20-24).
    fn rs2(&self) -> usize;

    /// Extracts the funct3 field (bits 12-14).
    fn funct3(&self) -> u32;

    /// Extracts the funct7 field (bits 25-31).
    fn funct7(&self) -> u32;

    /// Extracts the CSR address field (bits 20-31).
    fn csr(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> RD_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        ((self >> RS1_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        ((self >> RS2_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> FUNCT3_SHIFT) & FUNCT3_MASK
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        (self >> FUNCT7_SHIFT) & FUNCT7_MASK
    }

    #[inline(always)]
    fn csr(&self) -> u32 {
        (self >> RS2_SHIFT) & CSR_MASK
    }
}

/// Base instruction format selected by the 7-bit opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    /// Register-register arithmetic.
    R,
    /// Loads (I-type encoding).
    Load,
    /// Register-immediate arithmetic.
    Imm,
    /// Stores.
    Store,
    /// Conditional branches.
    Branch,
    /// Load upper immediate.
    Lui,
    /// Add upper immediate to PC.
    Auipc,
    /// Jump and link.
    Jal,
    /// Jump and link register (I-type encoding).
    Jalr,
    /// System and CSR instructions (I-type encoding).
    System,
    /// Memory fence (I-type encoding).
    Fence,
}

impl Format {
    /// Maps a 7-bit opcode to its format, or `None` if the opcode is unsupported.
    pub const fn from_opcode(opcode: u32) -> Option<Self> {
        Some(match opcode {
            opcodes::OP_REG => Self::R,
            opcodes::OP_LOAD => Self::Load,
            opcodes::OP_IMM => Self::Imm,
            opcodes::OP_STORE => Self::Store,
            opcodes::OP_BRANCH => Self::Branch,
            opcodes::OP_LUI => Self::Lui,
            opcodes::OP_AUIPC => Self::Auipc,
            opcodes::OP_JAL => Self::Jal,
            opcodes::OP_JALR => Self::Jalr,
            sys_op::OP_SYSTEM => Self::System,
            opcodes::OP_MISC_MEM => Self::Fence,
            _ => return None,
        })
    }

    /// The 7-bit opcode of this format.
    pub const fn opcode(self) -> u32 {
        match self {
            Self::R => opcodes::OP_REG,
            Self::Load => opcodes::OP_LOAD,
            Self::Imm => opcodes::OP_IMM,
            Self::Store => opcodes::OP_STORE,
            Self::Branch => opcodes::OP_BRANCH,
            Self::Lui => opcodes::OP_LUI,
            Self::Auipc => opcodes::OP_AUIPC,
            Self::Jal => opcodes::OP_JAL,
            Self::Jalr => opcodes::OP_JALR,
            Self::System => sys_op::OP_SYSTEM,
            Self::Fence => opcodes::OP_MISC_MEM,
        }
    }
}

/// Decoded record of one dynamic instruction instance.
///
/// Built once by [`crate::isa::decode::decode`]; every field is read-only
/// afterwards. The reorder buffer owns the record from issue until commit and
/// every other structure refers to it by ROB index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instr {
    pub(crate) uuid: u64,
    pub(crate) pc: u32,
    pub(crate) raw: u32,
    pub(crate) format: Format,
    pub(crate) rd: usize,
    pub(crate) rs1: usize,
    pub(crate) rs2: usize,
    pub(crate) funct3: u32,
    pub(crate) funct7: u32,
    pub(crate) imm: u32,
    pub(crate) alu_op: AluOp,
    pub(crate) br_op: BrOp,
    pub(crate) fu_type: FuType,
    pub(crate) flags: ExeFlags,
}

impl Instr {
    /// Monotonically increasing fetch identifier.
    #[inline]
    pub const fn uuid(&self) -> u64 {
        self.uuid
    }

    /// Address the instruction was fetched from.
    #[inline]
    pub const fn pc(&self) -> u32 {
        self.pc
    }

    /// Raw 32-bit encoding.
    #[inline]
    pub const fn raw(&self) -> u32 {
        self.raw
    }

    /// Opcode-format class.
    #[inline]
    pub const fn format(&self) -> Format {
        self.format
    }

    /// Destination register field.
    #[inline]
    pub const fn rd(&self) -> usize {
        self.rd
    }

    /// First source register field.
    #[inline]
    pub const fn rs1(&self) -> usize {
        self.rs1
    }

    /// Second source register field.
    #[inline]
    pub const fn rs2(&self) -> usize {
        self.rs2
    }

    /// 3-bit function code.
    #[inline]
    pub const fn funct3(&self) -> u32 {
        self.funct3
    }

    /// 7-bit function code.
    #[inline]
    pub const fn funct7(&self) -> u32 {
        self.funct7
    }

    /// Sign- or zero-extended immediate (format dependent).
    #[inline]
    pub const fn imm(&self) -> u32 {
        self.imm
    }

    /// Selected ALU operation.
    #[inline]
    pub const fn alu_op(&self) -> AluOp {
        self.alu_op
    }

    /// Selected branch condition.
    #[inline]
    pub const fn br_op(&self) -> BrOp {
        self.br_op
    }

    /// Functional unit this instruction dispatches to.
    #[inline]
    pub const fn fu_type(&self) -> FuType {
        self.fu_type
    }

    /// Execution flags.
    #[inline]
    pub const fn flags(&self) -> ExeFlags {
        self.flags
    }

    /// Destination register if the instruction writes one.
    #[inline]
    pub const fn dest(&self) -> Option<usize> {
        if self.flags.use_rd { Some(self.rd) } else { None }
    }

    /// True for branches and jumps (fetch must wait for their resolution).
    #[inline]
    pub const fn is_control_flow(&self) -> bool {
        self.br_op.is_branch()
    }
}
