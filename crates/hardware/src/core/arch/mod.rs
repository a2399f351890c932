//! RISC-V architectural state.
//!
//! This module contains the committed architectural elements of the core:
//! 1. **CSRs:** Control and Status Register file accessed by the system unit.
//! 2. **GPRs:** General-Purpose Register file written at commit.

/// Control and Status Register (CSR) file.
pub mod csr;

/// General-Purpose Register file implementation.
pub mod gpr;

pub use csr::CsrFile;
pub use gpr::Gpr;
