//! RISC-V Instruction Decoder.
//!
//! This module turns a 32-bit RV32I instruction word into an [`Instr`] record. It:
//! 1. **Extracts Fields:** opcode, register indices and function codes at fixed positions.
//! 2. **Assembles Immediates:** per-format bit reassembly and sign extension.
//! 3. **Derives Flags:** table-driven operand usage per format, plus the SYS special cases.
//! 4. **Selects Operations:** ALU operation and branch condition from (opcode, funct3, funct7).
//! 5. **Classifies Units:** functional unit type computed from the derived flags.
//!
//! Any word outside the supported tables is a fatal [`DecodeError`].

use crate::common::error::DecodeError;
use crate::core::pipeline::signals::{AluOp, BrOp, ExeFlags, FuType};
use crate::isa::disasm;
use crate::isa::instruction::{Format, InstructionBits, Instr};
use crate::isa::privileged::opcodes as sys_op;
use crate::isa::rv32i::{funct3, funct7};

/// Total width of a RISC-V instruction in bits.
const INSTRUCTION_WIDTH: u32 = 32;

/// Bit shift for extracting the I-Type immediate field (bits 20-31).
///
/// I-Type format: `imm[11:0] | rs1 | funct3 | rd | opcode`
const I_IMM_SHIFT: u32 = 20;

/// Total number of bits in I-Type and S-Type immediates.
const I_IMM_BITS: u32 = 12;

/// Width of a register field, used to splice the S-Type immediate halves.
///
/// S-Type format: `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`
const REG_FIELD_BITS: u32 = 5;

/// Total number of bits in the B-Type immediate (13 bits, sign-extended).
///
/// B-Type format: `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] | imm[11] | opcode`
const B_IMM_BITS: u32 = 13;

/// Bit mask for extracting the U-Type immediate field (bits 12-31).
///
/// U-Type format: `imm[31:12] | rd | opcode`
const U_IMM_MASK: u32 = 0xFFFF_F000;

/// Bit shift of the J-Type payload (bits 12-31 of the word).
///
/// J-Type format: `imm[20] | imm[10:1] | imm[11] | imm[19:12] | rd | opcode`
const J_PAYLOAD_SHIFT: u32 = 12;

/// Total number of bits in the J-Type immediate (21 bits, sign-extended).
const J_IMM_BITS: u32 = 21;

/// Decodes an instruction word fetched at `pc` into an [`Instr`] tagged with `uuid`.
///
/// # Errors
///
/// * [`DecodeError::UnknownOpcode`] - the opcode selects no supported format.
/// * [`DecodeError::UnknownOperation`] - the function codes select no operation.
/// * [`DecodeError::NoMnemonic`] - the printer cannot name the result.
pub fn decode(word: u32, pc: u32, uuid: u64) -> Result<Instr, DecodeError> {
    let opcode = word.opcode();
    let Some(format) = Format::from_opcode(opcode) else {
        return Err(DecodeError::UnknownOpcode { word, opcode, pc });
    };

    let rd = word.rd();
    let rs1 = word.rs1();
    let rs2 = word.rs2();
    let f3 = word.funct3();
    let f7 = word.funct7();

    let mut flags = format_flags(format, f3);
    let imm = decode_imm(format, word);

    // x0 is hardwired to zero: never rename or write it.
    if flags.use_rd && rd == 0 {
        flags.use_rd = false;
    }

    let unknown = || DecodeError::UnknownOperation {
        opcode,
        funct3: f3,
        funct7: f7,
        imm,
        pc,
    };

    let mut br_op = BrOp::None;
    let alu_op = match format {
        Format::Lui => AluOp::Add,
        Format::Auipc => {
            flags.alu_s1_pc = true;
            AluOp::Add
        }
        Format::R => {
            let alt = match f7 {
                funct7::DEFAULT => false,
                funct7::ALT if matches!(f3, funct3::ADD_SUB | funct3::SRL_SRA) => true,
                _ => return Err(unknown()),
            };
            arith_op(f3, alt, true)
        }
        Format::Imm => {
            let alt = match (f3, f7) {
                (funct3::SLL, funct7::DEFAULT) | (funct3::SRL_SRA, funct7::DEFAULT) => false,
                (funct3::SRL_SRA, funct7::ALT) => true,
                (funct3::SLL | funct3::SRL_SRA, _) => return Err(unknown()),
                _ => false,
            };
            arith_op(f3, alt, false)
        }
        Format::Branch => {
            flags.alu_s1_pc = true;
            br_op = match f3 {
                funct3::BEQ => BrOp::Beq,
                funct3::BNE => BrOp::Bne,
                funct3::BLT => BrOp::Blt,
                funct3::BGE => BrOp::Bge,
                funct3::BLTU => BrOp::Bltu,
                funct3::BGEU => BrOp::Bgeu,
                _ => return Err(unknown()),
            };
            AluOp::Add
        }
        Format::Jal => {
            flags.alu_s1_pc = true;
            br_op = BrOp::Jal;
            AluOp::Add
        }
        Format::Jalr => {
            if f3 != 0 {
                return Err(unknown());
            }
            br_op = BrOp::Jalr;
            AluOp::Add
        }
        Format::Load => {
            if !matches!(
                f3,
                funct3::LB | funct3::LH | funct3::LW | funct3::LBU | funct3::LHU
            ) {
                return Err(unknown());
            }
            flags.is_load = true;
            AluOp::Add
        }
        Format::Store => {
            if !matches!(f3, funct3::SB | funct3::SH | funct3::SW) {
                return Err(unknown());
            }
            flags.is_store = true;
            AluOp::Add
        }
        Format::System if f3 == sys_op::PRIV => {
            match imm {
                sys_op::IMM_ECALL | sys_op::IMM_EBREAK => flags.is_exit = true,
                sys_op::IMM_URET | sys_op::IMM_SRET | sys_op::IMM_MRET => {}
                _ => return Err(unknown()),
            }
            AluOp::Add
        }
        Format::System => {
            flags.is_csr = true;
            flags.alu_s2_csr = true;
            match f3 {
                sys_op::CSRRW => AluOp::Add,
                sys_op::CSRRS => AluOp::Or,
                sys_op::CSRRC => {
                    flags.alu_s1_inv = true;
                    AluOp::And
                }
                sys_op::CSRRWI => {
                    flags.alu_s1_rs1 = true;
                    AluOp::Add
                }
                sys_op::CSRRSI => {
                    flags.alu_s1_rs1 = true;
                    AluOp::Or
                }
                sys_op::CSRRCI => {
                    flags.alu_s1_inv = true;
                    flags.alu_s1_rs1 = true;
                    AluOp::And
                }
                _ => return Err(unknown()),
            }
        }
        Format::Fence => AluOp::None,
    };

    let instr = Instr {
        uuid,
        pc,
        raw: word,
        format,
        rd,
        rs1,
        rs2,
        funct3: f3,
        funct7: f7,
        imm,
        alu_op,
        br_op,
        fu_type: classify(&flags, br_op),
        flags,
    };

    // Every record that leaves decode must be printable.
    let _ = disasm::mnemonic(&instr)?;
    Ok(instr)
}

/// Operand usage per format, before the x0 and operation-specific adjustments.
fn format_flags(format: Format, f3: u32) -> ExeFlags {
    let mut flags = ExeFlags::default();
    match format {
        Format::R => {
            flags.use_rd = true;
            flags.use_rs1 = true;
            flags.use_rs2 = true;
        }
        Format::Imm | Format::Load | Format::Jalr => {
            flags.use_rd = true;
            flags.use_rs1 = true;
            flags.use_imm = true;
            flags.alu_s2_imm = true;
        }
        Format::Store | Format::Branch => {
            flags.use_rs1 = true;
            flags.use_rs2 = true;
            flags.use_imm = true;
            flags.alu_s2_imm = true;
        }
        Format::Lui | Format::Auipc | Format::Jal => {
            flags.use_rd = true;
            flags.use_imm = true;
            flags.alu_s2_imm = true;
        }
        Format::System => {
            flags.use_imm = true;
            if f3 != sys_op::PRIV {
                // CSR access: rd always, rs1 only for the register-operand forms.
                flags.use_rd = true;
                flags.use_rs1 = f3 < sys_op::CSR_IMM_FIRST;
            }
        }
        Format::Fence => {}
    }
    flags
}

/// Shared ALU selection for register-register and register-immediate arithmetic.
const fn arith_op(f3: u32, alt: bool, is_reg: bool) -> AluOp {
    match f3 {
        funct3::ADD_SUB if alt && is_reg => AluOp::Sub,
        funct3::ADD_SUB => AluOp::Add,
        funct3::SLL => AluOp::Sll,
        funct3::SLT => AluOp::Slt,
        funct3::SLTU => AluOp::Sltu,
        funct3::XOR => AluOp::Xor,
        funct3::SRL_SRA if alt => AluOp::Sra,
        funct3::SRL_SRA => AluOp::Srl,
        funct3::OR => AluOp::Or,
        _ => AluOp::And,
    }
}

/// Functional unit classification, derived from the flags rather than the opcode.
const fn classify(flags: &ExeFlags, br_op: BrOp) -> FuType {
    if flags.is_load || flags.is_store {
        FuType::Lsu
    } else if flags.is_csr {
        FuType::Sfu
    } else if br_op.is_branch() {
        FuType::Bru
    } else {
        FuType::Alu
    }
}

/// Assembles the immediate for the given format.
fn decode_imm(format: Format, word: u32) -> u32 {
    match format {
        Format::Imm if matches!(word.funct3(), funct3::SLL | funct3::SRL_SRA) => {
            // Shift amount lives in the rs2 field, zero-extended.
            word.rs2() as u32
        }
        Format::Imm | Format::Load | Format::Jalr => decode_i_type_imm(word),
        Format::Store => decode_s_type_imm(word),
        Format::Branch => decode_b_type_imm(word),
        Format::Lui | Format::Auipc => decode_u_type_imm(word),
        Format::Jal => decode_j_type_imm(word),
        Format::System => word >> I_IMM_SHIFT,
        Format::R | Format::Fence => 0,
    }
}

/// Decodes the immediate value for I-Type instructions.
///
/// Used for Load, JALR, and Immediate Arithmetic instructions.
fn decode_i_type_imm(word: u32) -> u32 {
    sign_extend(word >> I_IMM_SHIFT, I_IMM_BITS)
}

/// Decodes the immediate value for S-Type instructions.
///
/// `{funct7, rd}` reassembled as `{imm[11:5], imm[4:0]}`.
fn decode_s_type_imm(word: u32) -> u32 {
    let combined = (word.funct7() << REG_FIELD_BITS) | word.rd() as u32;
    sign_extend(combined, I_IMM_BITS)
}

/// Decodes the immediate value for B-Type instructions.
///
/// The low bit of the rd field is imm\[11\], its upper four bits imm\[4:1\];
/// funct7 carries imm\[12\] in its top bit and imm\[10:5\] below it.
fn decode_b_type_imm(word: u32) -> u32 {
    let rd = word.rd() as u32;
    let f7 = word.funct7();
    let bit_11 = rd & 0x1;
    let bits_4_1 = rd >> 1;
    let bits_10_5 = f7 & 0x3F;
    let bit_12 = f7 >> 6;

    let combined = (bits_4_1 << 1) | (bits_10_5 << 5) | (bit_11 << 11) | (bit_12 << 12);
    sign_extend(combined, B_IMM_BITS)
}

/// Decodes the immediate value for U-Type instructions (LUI, AUIPC).
fn decode_u_type_imm(word: u32) -> u32 {
    word & U_IMM_MASK
}

/// Decodes the immediate value for J-Type instructions (JAL).
fn decode_j_type_imm(word: u32) -> u32 {
    let payload = word >> J_PAYLOAD_SHIFT;
    let bits_19_12 = payload & 0xFF;
    let bit_11 = (payload >> 8) & 0x1;
    let bits_10_1 = (payload >> 9) & 0x3FF;
    let bit_20 = (payload >> 19) & 0x1;

    let combined = (bits_10_1 << 1) | (bit_11 << 11) | (bits_19_12 << 12) | (bit_20 << 20);
    sign_extend(combined, J_IMM_BITS)
}

/// Sign extends the low `bits` of `val` to 32 bits.
const fn sign_extend(val: u32, bits: u32) -> u32 {
    let shift = INSTRUCTION_WIDTH - bits;
    (((val << shift) as i32) >> shift) as u32
}
