//! Downstream trace interface.
//!
//! The core reports what it does through a [`TraceSink`]: read-only
//! snapshots after issue, after commit and whenever reservation station
//! occupancy changes, plus stall, cycle and halt notifications. Every method
//! has an empty default so sinks only implement what they consume.

use crate::core::pipeline::reservation::{Operand, RsIndex};
use crate::core::pipeline::rob::RobIndex;
use crate::core::pipeline::signals::FuType;
use crate::isa::instruction::Instr;

/// Read-only view of one instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstrSnapshot {
    /// Fetch identifier.
    pub uuid: u64,
    /// Instruction address.
    pub pc: u32,
    /// Printed form, e.g. `ADDI x1, x0, 0x5, PC=0x0 (#0)`.
    pub text: String,
    /// Unit the instruction executes on.
    pub fu_type: FuType,
    /// ROB slot it occupies (or occupied, for commits).
    pub rob: RobIndex,
}

impl InstrSnapshot {
    /// Captures `instr` held in ROB slot `rob`.
    pub fn new(instr: &Instr, rob: RobIndex) -> Self {
        Self {
            uuid: instr.uuid(),
            pc: instr.pc(),
            text: instr.to_string(),
            fu_type: instr.fu_type(),
            rob,
        }
    }
}

/// Read-only view of one occupied reservation station slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsSnapshot {
    /// Slot index.
    pub slot: RsIndex,
    /// Fetch identifier of the waiting instruction.
    pub uuid: u64,
    /// Printed form of the waiting instruction.
    pub text: String,
    /// ROB slot receiving the result.
    pub rob: RobIndex,
    /// Source operands.
    pub ops: [Operand; 2],
    /// Dispatched to a unit.
    pub running: bool,
    /// Held back by an older memory or CSR operation.
    pub locked: bool,
}

/// Why the issue stage or a ready RS entry could not make progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StallReason {
    /// The reorder buffer has no free slot.
    RobFull,
    /// The reservation station pool has no free slot.
    RsFull,
    /// A ready entry's functional unit is occupied.
    FuBusy,
    /// A finished unit lost CDB arbitration.
    CdbContention,
}

/// Consumer of core events.
pub trait TraceSink {
    /// A new cycle begins.
    fn on_cycle(&mut self, _cycle: u64) {}

    /// An instruction was issued.
    fn on_issue(&mut self, _instr: &InstrSnapshot) {}

    /// An instruction committed.
    fn on_commit(&mut self, _instr: &InstrSnapshot) {}

    /// Reservation station occupancy changed; `pool` lists every occupied slot.
    fn on_rs_change(&mut self, _pool: &[RsSnapshot]) {}

    /// A stage stalled this cycle.
    fn on_stall(&mut self, _reason: StallReason) {}

    /// The program-exit instruction committed at `cycle`.
    fn on_halt(&mut self, _cycle: u64) {}
}

/// Sink that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl TraceSink for NullSink {}

/// One recorded core event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceEvent {
    /// See [`TraceSink::on_issue`].
    Issue(InstrSnapshot),
    /// See [`TraceSink::on_commit`].
    Commit(InstrSnapshot),
    /// See [`TraceSink::on_rs_change`].
    RsChange(Vec<RsSnapshot>),
    /// See [`TraceSink::on_stall`].
    Stall(StallReason),
    /// See [`TraceSink::on_halt`].
    Halt(u64),
}

/// Sink that keeps every event in order, for tests and post-mortem dumps.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    /// Events in the order they were reported.
    pub events: Vec<TraceEvent>,
}

impl RecordingSink {
    /// Fetch identifiers of committed instructions, in commit order.
    pub fn committed(&self) -> Vec<u64> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TraceEvent::Commit(s) => Some(s.uuid),
                _ => None,
            })
            .collect()
    }

    /// Fetch identifiers of issued instructions, in issue order.
    pub fn issued(&self) -> Vec<u64> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TraceEvent::Issue(s) => Some(s.uuid),
                _ => None,
            })
            .collect()
    }

    /// Number of stalls recorded for `reason`.
    pub fn stalls(&self, reason: StallReason) -> usize {
        self.events
            .iter()
            .filter(|e| **e == TraceEvent::Stall(reason))
            .count()
    }

    /// True once a halt was reported.
    pub fn halted(&self) -> bool {
        self.events.iter().any(|e| matches!(e, TraceEvent::Halt(_)))
    }
}

impl TraceSink for RecordingSink {
    fn on_issue(&mut self, instr: &InstrSnapshot) {
        self.events.push(TraceEvent::Issue(instr.clone()));
    }

    fn on_commit(&mut self, instr: &InstrSnapshot) {
        self.events.push(TraceEvent::Commit(instr.clone()));
    }

    fn on_rs_change(&mut self, pool: &[RsSnapshot]) {
        self.events.push(TraceEvent::RsChange(pool.to_vec()));
    }

    fn on_stall(&mut self, reason: StallReason) {
        self.events.push(TraceEvent::Stall(reason));
    }

    fn on_halt(&mut self, cycle: u64) {
        self.events.push(TraceEvent::Halt(cycle));
    }
}
