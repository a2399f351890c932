//! Register Alias Table (RAT).
//!
//! Maps each architectural register to the ROB slot of its latest in-flight
//! producer, or `None` if the committed value in the register file is
//! authoritative. Issue does a single direct ROB lookup per source operand
//! instead of scanning the ROB.

use crate::common::constants::NUM_REGS;
use crate::core::pipeline::rob::RobIndex;

/// Rename table: one optional producer per architectural register.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rat {
    /// x0 is always `None` (hardwired zero, never renamed).
    map: [Option<RobIndex>; NUM_REGS],
}

impl Default for Rat {
    fn default() -> Self {
        Self::new()
    }
}

impl Rat {
    /// Create a table with every register clear (no pending writers).
    pub const fn new() -> Self {
        Self {
            map: [None; NUM_REGS],
        }
    }

    /// Record `idx` as the newest producer of `reg`, replacing any older one.
    /// No-op for x0.
    pub const fn set(&mut self, reg: usize, idx: RobIndex) {
        if reg != 0 {
            self.map[reg] = Some(idx);
        }
    }

    /// Producer of `reg`, or `None` if the register file holds its value.
    pub const fn get(&self, reg: usize) -> Option<RobIndex> {
        self.map[reg]
    }

    /// Clear a register's pending writer, but ONLY if it is still `idx`.
    ///
    /// A committing instruction must not erase the mapping of a younger
    /// producer that renamed the same register after it.
    pub fn clear_if_match(&mut self, reg: usize, idx: RobIndex) {
        let slot = &mut self.map[reg];
        if *slot == Some(idx) {
            *slot = None;
        }
    }

    /// Number of registers that currently have an in-flight producer.
    pub fn pending(&self) -> usize {
        self.map.iter().filter(|p| p.is_some()).count()
    }
}
