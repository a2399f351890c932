//! Execute Stage: unit timing, CDB arbitration and dispatch.
//!
//! Per cycle, in order:
//! 1. Every functional unit advances by one cycle.
//! 2. Among finished units, the arbiter grants the single CDB slot to one;
//!    the others keep their result and ask again next cycle.
//! 3. Ready, unlocked, not-running RS entries dispatch, oldest first, into
//!    their unit if it is free.

use tracing::{debug, warn};

use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::pipeline::cdb::{CdbEntry, Request};
use crate::core::units::{self, FuOutput};
use crate::soc::traits::MemoryPort;
use crate::trace::{StallReason, TraceSink};

/// Executes the Execute stage.
///
/// # Errors
///
/// [`SimError::Memory`] if a dispatched load or store faults.
pub fn execute_stage<M: MemoryPort + ?Sized>(
    cpu: &mut Cpu,
    mem: &mut M,
    sink: &mut dyn TraceSink,
) -> Result<(), SimError> {
    for fu in &mut cpu.fus {
        fu.tick();
    }

    publish(cpu, sink);
    dispatch(cpu, mem, sink)
}

/// Moves at most one finished result onto the CDB.
fn publish(cpu: &mut Cpu, sink: &mut dyn TraceSink) {
    let requests: Vec<Request> = cpu
        .fus
        .iter()
        .filter_map(|fu| {
            fu.output().map(|out| Request {
                fu: fu.kind(),
                uuid: out.uuid,
            })
        })
        .collect();

    // Writeback empties the bus every cycle; an occupied slot is never overwritten.
    if !cpu.cdb.is_empty() {
        return;
    }
    let Some(winner) = cpu.arbiter.grant(&requests) else {
        return;
    };
    let Some(out) = cpu.fus[winner.index()].output().copied() else {
        return;
    };

    let entry = CdbEntry {
        result: out.result,
        rob: out.rob,
        rs: out.rs,
        redirect: out.redirect,
    };
    // The unit keeps its result until the bus has accepted it.
    if cpu.cdb.publish(entry).is_err() {
        return;
    }
    let released = cpu.fus[winner.index()].clear();
    debug_assert_eq!(released, Some(out));

    for loser in requests.iter().filter(|r| r.fu != winner) {
        warn!(
            cycle = cpu.cycle,
            unit = loser.fu.name(),
            uuid = loser.uuid,
            winner = winner.name(),
            "CDB contention, result held"
        );
        sink.on_stall(StallReason::CdbContention);
    }
}

/// Sends every eligible RS entry to its functional unit.
fn dispatch<M: MemoryPort + ?Sized>(
    cpu: &mut Cpu,
    mem: &mut M,
    sink: &mut dyn TraceSink,
) -> Result<(), SimError> {
    for rs_idx in cpu.rs.dispatchable() {
        let Some(entry) = cpu.rs.get(rs_idx) else {
            continue;
        };
        let fu_type = entry.fu_type;
        let rob_idx = entry.rob;
        let uuid = entry.uuid;
        let [a, b] = entry.ops.map(|op| op.value().unwrap_or_default());

        if cpu.fus[fu_type.index()].is_busy() {
            sink.on_stall(StallReason::FuBusy);
            continue;
        }
        let Some(rob_entry) = cpu.rob.get(rob_idx) else {
            continue;
        };

        let computed = units::compute(&rob_entry.instr, a, b, mem, &mut cpu.csrs)?;
        debug!(
            cycle = cpu.cycle,
            uuid,
            unit = fu_type.name(),
            rob = rob_idx.0,
            rs = rs_idx.0,
            result = computed.result,
            "dispatch {}",
            rob_entry.instr
        );

        let started = cpu.fus[fu_type.index()].start(FuOutput {
            result: computed.result,
            rob: rob_idx,
            rs: rs_idx,
            uuid,
            redirect: computed.redirect,
        });
        if started {
            let _ = cpu.rs.mark_running(rs_idx);
        }
    }
    Ok(())
}
