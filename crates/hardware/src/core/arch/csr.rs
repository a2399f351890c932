//! Control and Status Register (CSR) file.
//!
//! This module implements the CSR state accessed by the system functional unit.
//! It provides:
//! 1. **Address Definitions:** The counter CSRs mirrored from core state.
//! 2. **Register Storage:** A flat file covering the 12-bit CSR address space.
//! 3. **Access Logic:** Reads and writes, with the counters read-only.

use crate::common::constants::NUM_CSRS;

/// Machine scratch register CSR address.
pub const MSCRATCH: u32 = 0x340;

/// Machine cycle counter CSR address.
pub const MCYCLE: u32 = 0xB00;

/// Machine retired-instruction counter CSR address.
pub const MINSTRET: u32 = 0xB02;

/// User cycle counter CSR address (read-only shadow of `mcycle`).
pub const CYCLE: u32 = 0xC00;

/// User retired-instruction counter CSR address (read-only shadow of `minstret`).
pub const INSTRET: u32 = 0xC02;

/// Upper half of the cycle counter.
pub const CYCLEH: u32 = 0xC80;

/// Upper half of the retired-instruction counter.
pub const INSTRETH: u32 = 0xC82;

/// Machine hardware thread ID CSR address.
pub const MHARTID: u32 = 0xF14;

/// CSR file.
///
/// General CSRs are plain storage. The counter CSRs reflect the core's cycle
/// and retirement counters and ignore writes.
#[derive(Clone, Debug)]
pub struct CsrFile {
    regs: Vec<u32>,
    cycle: u64,
    instret: u64,
}

impl Default for CsrFile {
    fn default() -> Self {
        Self::new()
    }
}

impl CsrFile {
    /// Creates a CSR file with every register zeroed.
    pub fn new() -> Self {
        Self {
            regs: vec![0; NUM_CSRS],
            cycle: 0,
            instret: 0,
        }
    }

    /// Updates the mirrored counters.
    pub const fn set_counters(&mut self, cycle: u64, instret: u64) {
        self.cycle = cycle;
        self.instret = instret;
    }

    /// Reads a CSR.
    ///
    /// # Arguments
    ///
    /// * `addr` - 12-bit CSR address (upper bits ignored).
    pub fn read(&self, addr: u32) -> u32 {
        match addr & 0xFFF {
            CYCLE | MCYCLE => self.cycle as u32,
            CYCLEH => (self.cycle >> 32) as u32,
            INSTRET | MINSTRET => self.instret as u32,
            INSTRETH => (self.instret >> 32) as u32,
            a => self.regs[a as usize],
        }
    }

    /// Writes a CSR. Writes to the counters and `mhartid` are dropped.
    ///
    /// # Arguments
    ///
    /// * `addr` - 12-bit CSR address (upper bits ignored).
    /// * `val` - New value.
    pub fn write(&mut self, addr: u32, val: u32) {
        match addr & 0xFFF {
            CYCLE | MCYCLE | CYCLEH | INSTRET | MINSTRET | INSTRETH | MHARTID => {}
            a => self.regs[a as usize] = val,
        }
    }
}
