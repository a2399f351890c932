//! Pipeline stage implementations.
//!
//! This module contains the four stages one core clock tick runs, in order:
//! 1. **Issue:** Renames the oldest decoded instruction into the ROB and an RS slot.
//! 2. **Execute:** Advances the functional units, grants the CDB, and dispatches ready RS entries.
//! 3. **Writeback:** Broadcasts the CDB entry to waiting operands and marks its ROB entry ready.
//! 4. **Commit:** Retires the ROB head into the register file.

/// Commit stage implementation.
pub mod commit;

/// Execute stage implementation.
pub mod execute;

/// Issue stage implementation.
pub mod issue;

/// Writeback stage implementation.
pub mod writeback;

/// Commit stage entry point.
pub use commit::commit_stage;
/// Execute stage entry point.
pub use execute::execute_stage;
/// Issue stage entry point.
pub use issue::issue_stage;
/// Writeback stage entry point.
pub use writeback::writeback_stage;
