//! Load/Store Unit (LSU).
//!
//! Computes the effective address `rs1 + imm` and performs the access through
//! a [`MemoryPort`]. Loads narrower than a word are sign- or zero-extended
//! according to funct3. Program order between accesses is enforced upstream
//! by the reservation station lock, so the unit itself is stateless.

use crate::common::error::MemoryError;
use crate::core::pipeline::signals::MemWidth;
use crate::isa::instruction::Instr;
use crate::isa::rv32i::funct3;
use crate::soc::traits::MemoryPort;

/// Load/Store Unit (LSU) for memory operations.
#[derive(Debug)]
pub struct Lsu;

impl Lsu {
    /// Access width encoded in the low two bits of funct3.
    pub const fn width(f3: u32) -> MemWidth {
        match f3 & 0b11 {
            0 => MemWidth::Byte,
            1 => MemWidth::Half,
            _ => MemWidth::Word,
        }
    }

    /// Performs the load or store described by `instr`.
    ///
    /// Returns the loaded value for loads and zero for stores.
    ///
    /// # Errors
    ///
    /// Propagates the [`MemoryError`] reported by the port.
    pub fn execute<M: MemoryPort + ?Sized>(
        instr: &Instr,
        rs1: u32,
        rs2: u32,
        mem: &mut M,
    ) -> Result<u32, MemoryError> {
        let addr = rs1.wrapping_add(instr.imm());
        let width = Self::width(instr.funct3());

        if instr.flags().is_store {
            mem.write(addr, width, rs2)?;
            return Ok(0);
        }

        let raw = mem.read(addr, width)?;
        Ok(match instr.funct3() {
            funct3::LB => raw as u8 as i8 as i32 as u32,
            funct3::LH => raw as u16 as i16 as i32 as u32,
            _ => raw,
        })
    }
}
