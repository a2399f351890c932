//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the simulator. It provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, and derived metrics (CPI, IPC).
//! 2. **Instruction mix:** Retired counts per functional unit.
//! 3. **Stalls:** ROB-full, RS-full, unit-busy and CDB-contention counts.
//!
//! [`SimStats`] is itself a [`TraceSink`]; the simulator feeds it every core event.

use std::time::Instant;

use crate::core::pipeline::signals::FuType;
use crate::trace::{InstrSnapshot, StallReason, TraceSink};

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions committed (retired).
    pub instructions_retired: u64,
    /// Retired instructions per functional unit, indexed by [`FuType::index`].
    pub retired_by_unit: [u64; FuType::COUNT],

    /// Issue stalls: reorder buffer full.
    pub stalls_rob_full: u64,
    /// Issue stalls: reservation stations full.
    pub stalls_rs_full: u64,
    /// Ready entries that found their unit busy.
    pub stalls_fu_busy: u64,
    /// Finished results held back by CDB arbitration.
    pub stalls_cdb: u64,

    /// Cycle at which the program-exit instruction committed.
    pub halt_cycle: Option<u64>,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            retired_by_unit: [0; FuType::COUNT],
            stalls_rob_full: 0,
            stalls_rs_full: 0,
            stalls_fu_busy: 0,
            stalls_cdb: 0,
            halt_cycle: None,
        }
    }
}

impl SimStats {
    /// Instructions per cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            return 0.0;
        }
        self.instructions_retired as f64 / self.cycles as f64
    }

    /// Cycles per instruction.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            return 0.0;
        }
        self.cycles as f64 / self.instructions_retired as f64
    }

    /// Prints the full report to stdout.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let retired = self.instructions_retired.max(1) as f64;

        println!("\n==========================================================");
        println!("TOMASULO CORE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {seconds:.4} s");
        println!("sim_cycles               {}", self.cycles);
        println!("sim_insts                {}", self.instructions_retired);
        println!("sim_ipc                  {:.4}", self.ipc());
        println!("sim_cpi                  {:.4}", self.cpi());
        println!("----------------------------------------------------------");
        println!("INSTRUCTION MIX");
        for fu in FuType::ALL {
            let n = self.retired_by_unit[fu.index()];
            println!(
                "  op.{:<19}{} ({:.2}%)",
                fu.name().to_lowercase(),
                n,
                n as f64 / retired * 100.0
            );
        }
        println!("----------------------------------------------------------");
        println!("STALLS");
        let stalls = [
            ("rob_full", self.stalls_rob_full),
            ("rs_full", self.stalls_rs_full),
            ("fu_busy", self.stalls_fu_busy),
            ("cdb", self.stalls_cdb),
        ];
        for (name, n) in stalls {
            println!(
                "  stalls.{name:<15}{n} ({:.2}%)",
                n as f64 / cyc * 100.0
            );
        }
        println!("==========================================================");
    }
}

impl TraceSink for SimStats {
    fn on_cycle(&mut self, cycle: u64) {
        self.cycles = cycle + 1;
    }

    fn on_commit(&mut self, instr: &InstrSnapshot) {
        self.instructions_retired += 1;
        self.retired_by_unit[instr.fu_type.index()] += 1;
    }

    fn on_stall(&mut self, reason: StallReason) {
        let counter = match reason {
            StallReason::RobFull => &mut self.stalls_rob_full,
            StallReason::RsFull => &mut self.stalls_rs_full,
            StallReason::FuBusy => &mut self.stalls_fu_busy,
            StallReason::CdbContention => &mut self.stalls_cdb,
        };
        *counter += 1;
    }

    fn on_halt(&mut self, cycle: u64) {
        self.halt_cycle = Some(cycle);
    }
}
