//! Privileged Architecture Definitions.
//!
//! Defines constants for the system opcode: environment calls, trap returns
//! and CSR access function codes.

/// System instruction opcodes and function codes.
pub mod opcodes;
