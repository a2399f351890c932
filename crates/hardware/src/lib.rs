//! Tomasulo-style out-of-order RISC-V core simulator library.
//!
//! This crate implements a cycle-level RV32I simulator built around a dynamic-scheduling core:
//! 1. **ISA:** Decoding of RV32I and Zicsr words into immutable instruction records, plus a printer.
//! 2. **Core:** Register alias table, reorder buffer, reservation stations, functional units and a
//!    single-slot common data bus, clocked through issue, execute, writeback and commit.
//! 3. **Memory:** A flat RAM model behind the `MemoryPort` trait used by the load/store unit.
//! 4. **Simulation:** Fetch driver, image loader, configuration, tracing sinks and statistics.

/// Common types and constants (errors, sizes).
pub mod common;
/// Simulator configuration (defaults, enums, hierarchical config structures).
pub mod config;
/// CPU core (architectural state, scheduling structures, stages, functional units).
pub mod core;
/// Instruction set (decode, instruction record, printer, RV32I and privileged opcodes).
pub mod isa;
/// Fetch driver and program loader.
pub mod sim;
/// Memory model and the memory port trait.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;
/// Trace sink interface and stock sinks.
pub mod trace;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Main CPU type; holds the RAT, ROB, reservation stations, units and CDB.
pub use crate::core::Cpu;
/// Top-level simulator (core, memory, fetch driver, stats).
pub use crate::sim::Simulator;
