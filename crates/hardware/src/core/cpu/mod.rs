//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which serves as the container for the
//! entire out-of-order core state. It coordinates the following:
//! 1. **Architectural State:** Committed registers and CSRs.
//! 2. **Scheduling Structures:** RAT, ROB, reservation stations, functional units, and the CDB.
//! 3. **Clocking:** One [`Cpu::tick`] runs issue, execute, writeback and commit, in that order.
//! 4. **Fetch Handshake:** The resolved next PC of each control-flow instruction.

use tracing::trace;

use crate::common::error::SimError;
use crate::config::CoreConfig;
use crate::core::arch::{CsrFile, Gpr};
use crate::core::pipeline::cdb::{Cdb, CdbArbiter};
use crate::core::pipeline::issue_queue::IssueQueue;
use crate::core::pipeline::rat::Rat;
use crate::core::pipeline::reservation::ReservationStations;
use crate::core::pipeline::rob::Rob;
use crate::core::pipeline::signals::FuType;
use crate::core::pipeline::stages::{commit_stage, execute_stage, issue_stage, writeback_stage};
use crate::core::units::FunctionalUnit;
use crate::soc::traits::MemoryPort;
use crate::trace::{RsSnapshot, TraceSink};

/// Main CPU structure containing all core state.
///
/// # Examples
///
/// ```
/// use tomasim_core::config::CoreConfig;
/// use tomasim_core::core::Cpu;
/// use tomasim_core::core::pipeline::issue_queue::IssueQueue;
/// use tomasim_core::isa::decode;
/// use tomasim_core::soc::Memory;
/// use tomasim_core::trace::NullSink;
///
/// let mut cpu = Cpu::new(&CoreConfig::default());
/// let mut queue = IssueQueue::new(4);
/// let mut mem = Memory::new(0, 64);
///
/// queue.push(decode(0x0050_0093, 0, 0).unwrap()).unwrap(); // addi x1, x0, 5
/// while cpu.retired() < 1 {
///     cpu.tick(&mut queue, &mut mem, &mut NullSink).unwrap();
/// }
/// assert_eq!(cpu.regs().read(1), 5);
/// ```
#[derive(Debug)]
pub struct Cpu {
    /// Committed integer registers.
    pub(crate) regs: Gpr,
    /// Control and Status Registers.
    pub(crate) csrs: CsrFile,
    /// Register alias table.
    pub(crate) rat: Rat,
    /// Reorder buffer; owns every in-flight instruction.
    pub(crate) rob: Rob,
    /// Reservation station pool.
    pub(crate) rs: ReservationStations,
    /// One functional unit per [`FuType`], indexed by [`FuType::index`].
    pub(crate) fus: [FunctionalUnit; FuType::COUNT],
    /// Common data bus.
    pub(crate) cdb: Cdb,
    /// CDB arbitration state.
    pub(crate) arbiter: CdbArbiter,
    /// Cycles elapsed.
    pub(crate) cycle: u64,
    /// Instructions committed.
    pub(crate) retired: u64,
    /// Set when a program-exit instruction commits.
    pub(crate) halted: bool,
    /// Next PC resolved by the branch unit, not yet consumed by fetch.
    pub(crate) redirect: Option<u32>,
}

impl Cpu {
    /// Creates an empty core sized and timed by `config`.
    pub fn new(config: &CoreConfig) -> Self {
        Self {
            regs: Gpr::new(),
            csrs: CsrFile::new(),
            rat: Rat::new(),
            rob: Rob::new(config.rob_size),
            rs: ReservationStations::new(config.rs_size),
            fus: [
                FunctionalUnit::new(FuType::Alu, config.alu_latency),
                FunctionalUnit::new(FuType::Bru, config.bru_latency),
                FunctionalUnit::new(FuType::Lsu, config.lsu_latency),
                FunctionalUnit::new(FuType::Sfu, config.sfu_latency),
            ],
            cdb: Cdb::new(),
            arbiter: CdbArbiter::new(config.cdb_arbitration),
            cycle: 0,
            retired: 0,
            halted: false,
            redirect: None,
        }
    }

    /// Advances the core by one clock cycle.
    ///
    /// Runs issue, execute, writeback and commit in that fixed order. A halted
    /// core does nothing.
    ///
    /// # Errors
    ///
    /// [`SimError::Memory`] if a load or store faults.
    pub fn tick<M: MemoryPort + ?Sized>(
        &mut self,
        queue: &mut IssueQueue,
        mem: &mut M,
        sink: &mut dyn TraceSink,
    ) -> Result<(), SimError> {
        if self.halted {
            return Ok(());
        }
        sink.on_cycle(self.cycle);
        self.csrs.set_counters(self.cycle, self.retired);

        issue_stage(self, queue, sink);
        execute_stage(self, mem, sink)?;
        writeback_stage(self, sink);
        commit_stage(self, sink);

        if tracing::enabled!(tracing::Level::TRACE) {
            self.dump();
        }
        self.cycle += 1;
        Ok(())
    }

    /// Takes the next PC resolved by the most recent control-flow instruction.
    pub fn take_redirect(&mut self) -> Option<u32> {
        self.redirect.take()
    }

    /// True once a program-exit instruction has committed.
    #[inline]
    pub const fn is_halted(&self) -> bool {
        self.halted
    }

    /// Cycles elapsed.
    #[inline]
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Instructions committed.
    #[inline]
    pub const fn retired(&self) -> u64 {
        self.retired
    }

    /// Committed register file.
    #[inline]
    pub const fn regs(&self) -> &Gpr {
        &self.regs
    }

    /// CSR file.
    #[inline]
    pub const fn csrs(&self) -> &CsrFile {
        &self.csrs
    }

    /// Register alias table.
    #[inline]
    pub const fn rat(&self) -> &Rat {
        &self.rat
    }

    /// Reorder buffer.
    #[inline]
    pub const fn rob(&self) -> &Rob {
        &self.rob
    }

    /// Reservation station pool.
    #[inline]
    pub const fn rs(&self) -> &ReservationStations {
        &self.rs
    }

    /// Common data bus.
    #[inline]
    pub const fn cdb(&self) -> &Cdb {
        &self.cdb
    }

    /// Functional unit of type `kind`.
    #[inline]
    pub const fn unit(&self, kind: FuType) -> &FunctionalUnit {
        &self.fus[kind.index()]
    }

    /// True when nothing is in flight anywhere in the core.
    pub fn is_idle(&self) -> bool {
        self.rob.is_empty()
            && self.rs.is_empty()
            && self.cdb.is_empty()
            && self.fus.iter().all(|fu| !fu.is_busy())
    }

    /// Snapshot of every occupied reservation station slot.
    pub fn rs_snapshots(&self) -> Vec<RsSnapshot> {
        self.rs
            .iter()
            .map(|(slot, entry)| RsSnapshot {
                slot,
                uuid: entry.uuid,
                text: self
                    .rob
                    .get(entry.rob)
                    .map(|e| e.instr.to_string())
                    .unwrap_or_default(),
                rob: entry.rob,
                ops: entry.ops,
                running: entry.running,
                locked: self.rs.is_locked(slot),
            })
            .collect()
    }

    /// Logs the ROB and RS contents at trace level.
    pub fn dump(&self) {
        for (idx, entry) in self.rob.iter() {
            trace!(
                cycle = self.cycle,
                rob = idx.0,
                ready = entry.ready,
                result = entry.result,
                "ROB {}",
                entry.instr
            );
        }
        for snap in self.rs_snapshots() {
            trace!(
                cycle = self.cycle,
                rs = snap.slot.0,
                rob = snap.rob.0,
                running = snap.running,
                locked = snap.locked,
                ops = ?snap.ops,
                "RS {}",
                snap.text
            );
        }
    }
}
