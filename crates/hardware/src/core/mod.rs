//! Core processor implementation.
//!
//! This module contains the out-of-order core: architectural state, the
//! Tomasulo scheduling structures and stages, the functional units, and the
//! `Cpu` that ties them together one clock tick at a time.

/// Architectural state (integer registers, CSRs).
pub mod arch;

/// CPU core and clock tick orchestration.
pub mod cpu;

/// Scheduling structures and pipeline stages (RAT, ROB, RS, CDB, issue, execute, writeback, commit).
pub mod pipeline;

/// Functional units (ALU, BRU, LSU, SFU).
pub mod units;

pub use self::cpu::Cpu;
