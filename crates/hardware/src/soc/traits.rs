//! Memory port trait.
//!
//! This module defines the boundary between the core and the memory
//! subsystem. It provides:
//! 1. **Loads:** Width-tagged reads returning the raw (zero-extended) value.
//! 2. **Stores:** Width-tagged writes of the low bits of a value.
//!
//! Sign extension of loaded values is the load/store unit's job, not the port's.

use crate::common::error::MemoryError;
use crate::core::pipeline::signals::MemWidth;

/// Synchronous access to simulated memory.
///
/// Addresses are absolute; implementors map them to their own storage and
/// report accesses outside it as [`MemoryError`].
pub trait MemoryPort {
    /// Reads `width` bytes at `addr`, zero-extended to 32 bits.
    ///
    /// # Errors
    ///
    /// [`MemoryError`] if the access is out of range or misaligned.
    fn read(&mut self, addr: u32, width: MemWidth) -> Result<u32, MemoryError>;

    /// Writes the low `width` bytes of `value` at `addr`.
    ///
    /// # Errors
    ///
    /// [`MemoryError`] if the access is out of range or misaligned.
    fn write(&mut self, addr: u32, width: MemWidth, value: u32) -> Result<(), MemoryError>;

    /// Reads a 32-bit instruction word.
    ///
    /// # Errors
    ///
    /// [`MemoryError`] if `pc` is out of range or not word-aligned.
    fn fetch(&mut self, pc: u32) -> Result<u32, MemoryError> {
        self.read(pc, MemWidth::Word)
    }
}
