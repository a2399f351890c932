//! Writeback Stage: CDB broadcast.
//!
//! Delivers the CDB entry to every RS operand waiting on its ROB slot, frees
//! the originating RS slot, marks the ROB entry ready, and clears the bus.
//! A resolved next PC riding on the entry is handed to fetch.

use tracing::debug;

use crate::core::Cpu;
use crate::trace::TraceSink;

/// Executes the Writeback stage. A no-op when the CDB is empty.
pub fn writeback_stage(cpu: &mut Cpu, sink: &mut dyn TraceSink) {
    let Some(entry) = cpu.cdb.peek().copied() else {
        return;
    };

    let woken = cpu.rs.broadcast(entry.rob, entry.result);
    let released = cpu.rs.release(entry.rs);
    debug_assert!(
        released.is_some_and(|rs| rs.rob == entry.rob),
        "broadcast from a free or reassigned RS slot"
    );
    let marked = cpu.rob.mark_ready(entry.rob, entry.result);
    debug_assert!(marked, "broadcast to a free ROB slot");
    if let Some(next_pc) = entry.redirect {
        cpu.redirect = Some(next_pc);
    }
    let _ = cpu.cdb.take();

    debug!(
        cycle = cpu.cycle,
        rob = entry.rob.0,
        rs = entry.rs.0,
        result = entry.result,
        woken,
        redirect = ?entry.redirect,
        "broadcast"
    );
    sink.on_rs_change(&cpu.rs_snapshots());
}
