//! Global System Constants.
//!
//! This module defines system-wide constants used across the simulator. It includes:
//! 1. **Architectural Constants:** Register counts and instruction size.
//! 2. **CSR Constants:** Size of the CSR address space.

/// Number of architectural integer registers (`x0`-`x31`).
pub const NUM_REGS: usize = 32;

/// Size of a standard (32-bit) RISC-V instruction in bytes.
pub const INSTRUCTION_SIZE: u32 = 4;

/// Number of addressable CSRs (12-bit CSR address space).
pub const NUM_CSRS: usize = 4096;

/// Encoding of `ADDI x0, x0, 0`, the canonical NOP.
pub const NOP: u32 = 0x0000_0013;
