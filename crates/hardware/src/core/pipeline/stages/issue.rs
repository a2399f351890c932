//! Issue Stage: rename and allocate.
//!
//! Takes the oldest decoded instruction from the issue queue when both the
//! ROB and the RS pool have room; otherwise it stays at the front of the
//! queue and is retried next cycle. Source operands resolve, in order of
//! preference, to a ready in-flight ROB value, a pending ROB tag, or the
//! committed register file.

use tracing::debug;

use crate::core::Cpu;
use crate::core::pipeline::issue_queue::IssueQueue;
use crate::core::pipeline::reservation::Operand;
use crate::trace::{InstrSnapshot, StallReason, TraceSink};

/// Executes the Issue stage.
pub fn issue_stage(cpu: &mut Cpu, queue: &mut IssueQueue, sink: &mut dyn TraceSink) {
    if queue.is_empty() {
        return;
    }
    if cpu.rob.is_full() {
        sink.on_stall(StallReason::RobFull);
        return;
    }
    if cpu.rs.is_full() {
        sink.on_stall(StallReason::RsFull);
        return;
    }
    let (Some(front), Some(rob_idx)) = (queue.front(), cpu.rob.next_index()) else {
        return;
    };

    let flags = front.flags();
    let ops = [
        resolve_operand(cpu, flags.use_rs1, front.rs1()),
        resolve_operand(cpu, flags.use_rs2, front.rs2()),
    ];
    let uuid = front.uuid();
    let fu_type = front.fu_type();
    let dest = front.dest();

    // The RS slot is claimed before the ROB or RAT change so a refusal leaves
    // the instruction at the front of the queue and nothing half-issued.
    let Some(rs_idx) = cpu.rs.allocate(rob_idx, uuid, fu_type, ops) else {
        sink.on_stall(StallReason::RsFull);
        return;
    };
    let Some(instr) = queue.pop() else {
        return;
    };
    let allocated = cpu.rob.allocate(instr);
    debug_assert_eq!(allocated, Some(rob_idx), "ROB tail moved during issue");
    if let Some(rd) = dest {
        cpu.rat.set(rd, rob_idx);
    }

    if let Some(entry) = cpu.rob.get(rob_idx) {
        debug!(
            cycle = cpu.cycle,
            uuid,
            rob = rob_idx.0,
            rs = rs_idx.0,
            ops = ?ops,
            "issue {}",
            entry.instr
        );
        sink.on_issue(&InstrSnapshot::new(&entry.instr, rob_idx));
    }
    sink.on_rs_change(&cpu.rs_snapshots());
}

/// Resolves one source register to a value or a pending producer tag.
fn resolve_operand(cpu: &Cpu, used: bool, reg: usize) -> Operand {
    if !used {
        return Operand::Ready(0);
    }
    match cpu.rat.get(reg) {
        Some(producer) => cpu
            .rob
            .ready_value(producer)
            .map_or(Operand::Pending(producer), Operand::Ready),
        None => Operand::Ready(cpu.regs.read(reg)),
    }
}
