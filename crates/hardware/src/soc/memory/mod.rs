//! Physical system memory.
//!
//! A flat byte array mapped at a base address. Accesses must be naturally
//! aligned and fully inside the mapped range.

use crate::common::error::MemoryError;
use crate::core::pipeline::signals::MemWidth;
use crate::soc::traits::MemoryPort;

/// System memory structure.
#[derive(Clone, Debug)]
pub struct Memory {
    /// Backing storage.
    bytes: Vec<u8>,
    /// The base address where this memory is mapped.
    base_addr: u32,
}

impl Memory {
    /// Creates a zero-filled memory of `size` bytes mapped at `base_addr`.
    pub fn new(base_addr: u32, size: usize) -> Self {
        Self {
            bytes: vec![0; size],
            base_addr,
        }
    }

    /// Returns (`base_address`, `size_in_bytes`).
    pub const fn address_range(&self) -> (u32, usize) {
        (self.base_addr, self.bytes.len())
    }

    /// Copies `data` into memory starting at absolute address `addr`.
    ///
    /// # Errors
    ///
    /// [`MemoryError::OutOfBounds`] if the image does not fit.
    pub fn load(&mut self, addr: u32, data: &[u8]) -> Result<(), MemoryError> {
        let start = self.offset(addr, data.len())?;
        self.bytes[start..start + data.len()].copy_from_slice(data);
        Ok(())
    }

    /// Byte offset of `addr` after checking that `len` bytes fit.
    fn offset(&self, addr: u32, len: usize) -> Result<usize, MemoryError> {
        addr.checked_sub(self.base_addr)
            .map(|off| off as usize)
            .filter(|off| off.checked_add(len).is_some_and(|end| end <= self.bytes.len()))
            .ok_or(MemoryError::OutOfBounds {
                addr,
                width: len as u32,
            })
    }

    /// Checks alignment and range for a `width` access at `addr`.
    fn check(&self, addr: u32, width: MemWidth) -> Result<usize, MemoryError> {
        let bytes = width.bytes();
        if addr % bytes != 0 {
            return Err(MemoryError::Misaligned {
                addr,
                width: bytes,
            });
        }
        self.offset(addr, bytes as usize)
    }
}

impl MemoryPort for Memory {
    fn read(&mut self, addr: u32, width: MemWidth) -> Result<u32, MemoryError> {
        let off = self.check(addr, width)?;
        let mut buf = [0u8; 4];
        let len = width.bytes() as usize;
        buf[..len].copy_from_slice(&self.bytes[off..off + len]);
        Ok(u32::from_le_bytes(buf))
    }

    fn write(&mut self, addr: u32, width: MemWidth, value: u32) -> Result<(), MemoryError> {
        let off = self.check(addr, width)?;
        let len = width.bytes() as usize;
        self.bytes[off..off + len].copy_from_slice(&value.to_le_bytes()[..len]);
        Ok(())
    }
}
