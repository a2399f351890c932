//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains definitions for opcodes, function codes, and decoding logic, organized
//! by RISC-V extension.
//!
//! # Extensions
//!
//! * `rv32i`: Base Integer Instruction Set (32-bit).
//! * `privileged`: System instructions (ECALL, EBREAK, xRET, CSR access).

/// Instruction decoding logic for all RV32I instruction formats.
pub mod decode;

/// Instruction printer for debug tracing and diagnostics.
pub mod disasm;

/// Instruction field extraction and the decoded instruction record.
pub mod instruction;

/// System instruction definitions (environment calls, trap returns, CSRs).
pub mod privileged;

/// Base integer instruction set (32-bit RISC-V core instructions).
pub mod rv32i;

pub use decode::decode;
pub use instruction::{Format, Instr};
