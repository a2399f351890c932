//! RISC-V Privileged Architecture Opcodes.
//!
//! Defines opcodes and function codes for system instructions, including
//! CSR access, environment calls, and trap returns.

/// System instruction opcode (0b1110011).
/// Used for CSR instructions, ECALL, EBREAK and xRET.
pub const OP_SYSTEM: u32 = 0b1110011;

/// `funct3` of the non-CSR system instructions (ECALL, EBREAK, xRET).
pub const PRIV: u32 = 0b000;

/// 12-bit immediate of Environment Call (ECALL).
pub const IMM_ECALL: u32 = 0x000;
/// 12-bit immediate of Environment Break (EBREAK).
pub const IMM_EBREAK: u32 = 0x001;
/// 12-bit immediate of User Return (URET).
pub const IMM_URET: u32 = 0x002;
/// 12-bit immediate of Supervisor Return (SRET).
pub const IMM_SRET: u32 = 0x102;
/// 12-bit immediate of Machine Return (MRET).
pub const IMM_MRET: u32 = 0x302;

/// Environment Call (ECALL).
pub const ECALL: u32 = 0x0000_0073;

/// Environment Break (EBREAK).
pub const EBREAK: u32 = 0x0010_0073;

/// Atomic Read/Write CSR (CSRRW).
pub const CSRRW: u32 = 0b001;
/// Atomic Read and Set Bits in CSR (CSRRS).
pub const CSRRS: u32 = 0b010;
/// Atomic Read and Clear Bits in CSR (CSRRC).
pub const CSRRC: u32 = 0b011;
/// Atomic Read/Write CSR Immediate (CSRRWI).
pub const CSRRWI: u32 = 0b101;
/// Atomic Read and Set Bits in CSR Immediate (CSRRSI).
pub const CSRRSI: u32 = 0b110;
/// Atomic Read and Clear Bits in CSR Immediate (CSRRCI).
pub const CSRRCI: u32 = 0b111;

/// First `funct3` value of the immediate-operand CSR forms.
pub const CSR_IMM_FIRST: u32 = CSRRWI;
