//! Tomasulo scheduling structures and pipeline stages.
//!
//! This module contains the dynamic-scheduling machinery of the core:
//! 1. **Renaming:** The register alias table maps registers to in-flight producers.
//! 2. **Ordering:** The reorder buffer owns in-flight instructions and retires them in order.
//! 3. **Waiting:** Reservation stations hold instructions until their operands arrive.
//! 4. **Broadcast:** The single-slot common data bus and its arbiter.
//! 5. **Stages:** Issue, execute, writeback and commit.

/// Common data bus and arbitration.
pub mod cdb;

/// Decoded instructions waiting for issue.
pub mod issue_queue;

/// Register alias table.
pub mod rat;

/// Reservation station pool and operand tags.
pub mod reservation;

/// Reorder buffer.
pub mod rob;

/// Control signals generated during instruction decode.
pub mod signals;

/// Pipeline stage implementations (issue, execute, writeback, commit).
pub mod stages;
