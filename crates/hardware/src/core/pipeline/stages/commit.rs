//! Commit Stage: retire the instruction at the ROB head.
//!
//! At most one instruction retires per cycle, strictly in program order: an
//! unready head blocks every younger instruction even if they are done.

use tracing::{debug, info};

use crate::core::Cpu;
use crate::trace::{InstrSnapshot, TraceSink};

/// Executes the Commit stage.
pub fn commit_stage(cpu: &mut Cpu, sink: &mut dyn TraceSink) {
    let Some((rob_idx, entry)) = cpu.rob.commit_head() else {
        return;
    };
    let instr = &entry.instr;

    if let Some(rd) = instr.dest() {
        cpu.regs.write(rd, entry.result);
        // A younger producer of rd keeps its mapping.
        cpu.rat.clear_if_match(rd, rob_idx);
    }
    cpu.retired += 1;

    debug!(
        cycle = cpu.cycle,
        uuid = instr.uuid(),
        rob = rob_idx.0,
        result = entry.result,
        "commit {}",
        instr
    );
    sink.on_commit(&InstrSnapshot::new(instr, rob_idx));

    if instr.flags().is_exit {
        cpu.halted = true;
        info!(
            cycle = cpu.cycle,
            retired = cpu.retired,
            "halt at PC={:#x}",
            instr.pc()
        );
        sink.on_halt(cpu.cycle);
    }
}
