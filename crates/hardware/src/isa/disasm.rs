//! Instruction printer for RV32I.
//!
//! Converts a decoded [`Instr`] into its mnemonic and operand text for debug
//! tracing and the downstream trace sink. The mnemonic table is keyed by the
//! same (opcode, funct3, funct7, immediate) fields as the decoder; a record the
//! table cannot name is an internal consistency fault, reported as
//! [`DecodeError::NoMnemonic`].
//!
//! # Format
//!
//! `MNEMONIC [xRD][, xRS1][, xRS2][, 0xIMM], PC=0xPC (#UUID)`, listing only the
//! operands the instruction actually uses:
//!
//! ```
//! use tomasim_core::isa::decode::decode;
//!
//! let instr = decode(0x0020_81B3, 0x100, 7).unwrap(); // add x3, x1, x2
//! assert_eq!(instr.to_string(), "ADD x3, x1, x2, PC=0x100 (#7)");
//! ```

use std::fmt;

use crate::common::error::DecodeError;
use crate::isa::instruction::{Format, Instr};
use crate::isa::privileged::opcodes as sys_op;
use crate::isa::rv32i::{funct3 as f3, funct7 as f7};

/// Returns the upper-case mnemonic of a decoded instruction.
///
/// # Errors
///
/// [`DecodeError::NoMnemonic`] if the (format, funct3, funct7, imm) key has no entry.
pub fn mnemonic(instr: &Instr) -> Result<&'static str, DecodeError> {
    let funct3 = instr.funct3();
    let funct7 = instr.funct7();
    let imm = instr.imm();
    let alt = funct7 & f7::ALT_BIT != 0;

    let name = match instr.format() {
        Format::Lui => Some("LUI"),
        Format::Auipc => Some("AUIPC"),
        Format::R => match funct3 {
            f3::ADD_SUB => Some(if alt { "SUB" } else { "ADD" }),
            f3::SLL => Some("SLL"),
            f3::SLT => Some("SLT"),
            f3::SLTU => Some("SLTU"),
            f3::XOR => Some("XOR"),
            f3::SRL_SRA => Some(if alt { "SRA" } else { "SRL" }),
            f3::OR => Some("OR"),
            f3::AND => Some("AND"),
            _ => None,
        },
        Format::Imm => match funct3 {
            f3::ADD_SUB => Some("ADDI"),
            f3::SLL => Some("SLLI"),
            f3::SLT => Some("SLTI"),
            f3::SLTU => Some("SLTIU"),
            f3::XOR => Some("XORI"),
            f3::SRL_SRA => Some(if alt { "SRAI" } else { "SRLI" }),
            f3::OR => Some("ORI"),
            f3::AND => Some("ANDI"),
            _ => None,
        },
        Format::Branch => match funct3 {
            f3::BEQ => Some("BEQ"),
            f3::BNE => Some("BNE"),
            f3::BLT => Some("BLT"),
            f3::BGE => Some("BGE"),
            f3::BLTU => Some("BLTU"),
            f3::BGEU => Some("BGEU"),
            _ => None,
        },
        Format::Jal => Some("JAL"),
        Format::Jalr => Some("JALR"),
        Format::Load => match funct3 {
            f3::LB => Some("LB"),
            f3::LH => Some("LH"),
            f3::LW => Some("LW"),
            f3::LBU => Some("LBU"),
            f3::LHU => Some("LHU"),
            _ => None,
        },
        Format::Store => match funct3 {
            f3::SB => Some("SB"),
            f3::SH => Some("SH"),
            f3::SW => Some("SW"),
            _ => None,
        },
        Format::System => match funct3 {
            sys_op::PRIV => match imm {
                sys_op::IMM_ECALL => Some("ECALL"),
                sys_op::IMM_EBREAK => Some("EBREAK"),
                sys_op::IMM_URET => Some("URET"),
                sys_op::IMM_SRET => Some("SRET"),
                sys_op::IMM_MRET => Some("MRET"),
                _ => None,
            },
            sys_op::CSRRW => Some("CSRRW"),
            sys_op::CSRRS => Some("CSRRS"),
            sys_op::CSRRC => Some("CSRRC"),
            sys_op::CSRRWI => Some("CSRRWI"),
            sys_op::CSRRSI => Some("CSRRSI"),
            sys_op::CSRRCI => Some("CSRRCI"),
            _ => None,
        },
        Format::Fence => Some("FENCE"),
    };

    name.ok_or(DecodeError::NoMnemonic {
        opcode: instr.format().opcode(),
        funct3,
        funct7,
        imm,
    })
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // decode() refuses to build records without a mnemonic.
        let name = mnemonic(self).map_err(|_| fmt::Error)?;
        f.write_str(name)?;

        let flags = self.flags();
        let mut sep = " ";
        if flags.use_rd {
            write!(f, "{sep}x{}", self.rd())?;
            sep = ", ";
        }
        if flags.use_rs1 {
            write!(f, "{sep}x{}", self.rs1())?;
            sep = ", ";
        }
        if flags.use_rs2 {
            write!(f, "{sep}x{}", self.rs2())?;
            sep = ", ";
        }
        if flags.use_imm {
            write!(f, "{sep}{:#x}", self.imm())?;
        }
        write!(f, ", PC={:#x} (#{})", self.pc(), self.uuid())
    }
}
