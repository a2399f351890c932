//! Functional units.
//!
//! One unit per [`FuType`]. A unit accepts a single instruction at a time and
//! holds it for its configured latency. The result is computed when the
//! instruction is dispatched; the latency only delays its publication. A
//! finished unit keeps its output, and stays busy, until the CDB arbiter
//! grants it the bus.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch Resolution Unit (conditions, jump targets).
pub mod bru;

/// Load/Store Unit for memory access operations.
pub mod lsu;

/// System Function Unit for CSR access.
pub mod sfu;

use self::{alu::Alu, bru::Bru, lsu::Lsu, sfu::Sfu};
use crate::common::error::MemoryError;
use crate::core::arch::csr::CsrFile;
use crate::core::pipeline::reservation::RsIndex;
use crate::core::pipeline::rob::RobIndex;
use crate::core::pipeline::signals::FuType;
use crate::isa::instruction::Instr;
use crate::soc::traits::MemoryPort;

/// Completed work waiting for the CDB.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FuOutput {
    /// Value for the destination register.
    pub result: u32,
    /// ROB slot of the producing instruction.
    pub rob: RobIndex,
    /// RS slot to free once the broadcast is consumed.
    pub rs: RsIndex,
    /// Fetch identifier, used for age-based arbitration.
    pub uuid: u64,
    /// Resolved next PC for control-flow instructions.
    pub redirect: Option<u32>,
}

#[derive(Clone, Copy, Debug)]
struct InFlight {
    output: FuOutput,
    remaining: u32,
}

/// A single pipelined-by-one functional unit.
#[derive(Clone, Debug)]
pub struct FunctionalUnit {
    kind: FuType,
    latency: u32,
    slot: Option<InFlight>,
}

impl FunctionalUnit {
    /// Creates an idle unit of `kind` taking `latency` cycles per instruction.
    pub const fn new(kind: FuType, latency: u32) -> Self {
        Self {
            kind,
            latency,
            slot: None,
        }
    }

    /// Unit type.
    #[inline]
    pub const fn kind(&self) -> FuType {
        self.kind
    }

    /// True while the unit holds an instruction, finished or not.
    #[inline]
    pub const fn is_busy(&self) -> bool {
        self.slot.is_some()
    }

    /// Accepts `output` for publication after the unit latency.
    ///
    /// Returns false (and drops nothing) if the unit is busy.
    pub fn start(&mut self, output: FuOutput) -> bool {
        if self.slot.is_some() {
            return false;
        }
        self.slot = Some(InFlight {
            output,
            remaining: self.latency,
        });
        true
    }

    /// Advances execution by one cycle.
    pub const fn tick(&mut self) {
        if let Some(work) = &mut self.slot {
            work.remaining = work.remaining.saturating_sub(1);
        }
    }

    /// True once the held instruction has finished executing.
    #[inline]
    pub const fn done(&self) -> bool {
        matches!(self.slot, Some(InFlight { remaining: 0, .. }))
    }

    /// Finished output, if any.
    pub const fn output(&self) -> Option<&FuOutput> {
        match &self.slot {
            Some(work) if work.remaining == 0 => Some(&work.output),
            _ => None,
        }
    }

    /// Removes and returns the finished output, freeing the unit.
    pub fn clear(&mut self) -> Option<FuOutput> {
        if !self.done() {
            return None;
        }
        self.slot.take().map(|work| work.output)
    }
}

/// Value produced by executing one instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Computed {
    /// Value for `rd`.
    pub result: u32,
    /// Next PC, for control-flow instructions.
    pub redirect: Option<u32>,
}

/// Computes the effect of `instr` with resolved sources `rs1`/`rs2`.
///
/// Loads, stores and CSR updates take effect here, at dispatch; ordering
/// between them is the reservation station lock's job.
///
/// # Errors
///
/// [`MemoryError`] from the load/store unit.
pub fn compute<M: MemoryPort + ?Sized>(
    instr: &Instr,
    rs1: u32,
    rs2: u32,
    mem: &mut M,
    csrs: &mut CsrFile,
) -> Result<Computed, MemoryError> {
    let (result, redirect) = match instr.fu_type() {
        FuType::Alu => {
            let flags = instr.flags();
            let a = if flags.alu_s1_pc { instr.pc() } else { rs1 };
            let b = if flags.alu_s2_imm { instr.imm() } else { rs2 };
            (Alu::execute(instr.alu_op(), a, b), None)
        }
        FuType::Bru => {
            let res = Bru::resolve(instr, rs1, rs2);
            (res.link, Some(res.next_pc))
        }
        FuType::Lsu => (Lsu::execute(instr, rs1, rs2, mem)?, None),
        FuType::Sfu => (Sfu::execute(instr, rs1, csrs), None),
    };
    Ok(Computed { result, redirect })
}
