//! Simulator: owns the core, memory, and the fetch driver side by side.
//!
//! Fetch reads one word per cycle at the current PC, decodes it with the next
//! fetch identifier and appends it to the issue queue. There is no branch
//! prediction: after a control-flow instruction fetch waits for the core to
//! resolve the next PC, and after a program-exit instruction it stops.

use tracing::debug;

use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::error::SimError;
use crate::config::Config;
use crate::core::Cpu;
use crate::core::pipeline::issue_queue::IssueQueue;
use crate::isa::decode;
use crate::soc::memory::Memory;
use crate::soc::traits::MemoryPort;
use crate::stats::SimStats;

/// What fetch does next cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchState {
    /// Fetch sequentially.
    Running,
    /// Wait for the core to resolve a control-flow instruction.
    AwaitRedirect,
    /// A program-exit instruction was fetched.
    Stopped,
}

/// Top-level simulator: core, memory, issue queue and statistics.
#[derive(Debug)]
pub struct Simulator {
    /// Out-of-order core.
    pub cpu: Cpu,
    /// Main memory (program and data).
    pub memory: Memory,
    /// Decoded instructions waiting for issue.
    pub queue: IssueQueue,
    /// Statistics, fed by every core event.
    pub stats: SimStats,
    pc: u32,
    next_uuid: u64,
    fetch: FetchState,
    max_cycles: u64,
}

impl Simulator {
    /// Creates a simulator from a validated configuration.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] if `config` fails validation.
    pub fn new(config: &Config) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            cpu: Cpu::new(&config.core),
            memory: Memory::new(config.memory.base, config.memory.size),
            queue: IssueQueue::new(config.core.issue_queue_size),
            stats: SimStats::default(),
            pc: config.general.start_pc,
            next_uuid: 0,
            fetch: FetchState::Running,
            max_cycles: config.general.max_cycles,
        })
    }

    /// Next fetch address.
    pub const fn pc(&self) -> u32 {
        self.pc
    }

    /// Current fetch state.
    pub const fn fetch_state(&self) -> FetchState {
        self.fetch
    }

    /// Advances the simulator by one clock cycle: core first, then fetch.
    ///
    /// # Errors
    ///
    /// Any fatal decode or memory fault.
    pub fn tick(&mut self) -> Result<(), SimError> {
        self.cpu
            .tick(&mut self.queue, &mut self.memory, &mut self.stats)?;
        self.fetch_stage()
    }

    /// Runs until the program exits.
    ///
    /// # Errors
    ///
    /// [`SimError::CycleLimit`] if the program has not exited after the
    /// configured cycle budget, or any fatal decode or memory fault.
    pub fn run(&mut self) -> Result<(), SimError> {
        while !self.cpu.is_halted() {
            if self.cpu.cycle() >= self.max_cycles {
                return Err(SimError::CycleLimit(self.max_cycles));
            }
            self.tick()?;
        }
        Ok(())
    }

    fn fetch_stage(&mut self) -> Result<(), SimError> {
        if let Some(next_pc) = self.cpu.take_redirect() {
            if self.fetch == FetchState::AwaitRedirect {
                self.pc = next_pc;
                self.fetch = FetchState::Running;
            }
        }
        if self.fetch != FetchState::Running || self.queue.is_full() {
            return Ok(());
        }

        let word = self.memory.fetch(self.pc)?;
        let instr = decode(word, self.pc, self.next_uuid)?;
        debug!(uuid = self.next_uuid, word = format_args!("{word:#010x}"), "fetch {instr}");
        self.next_uuid += 1;

        if instr.is_control_flow() {
            self.fetch = FetchState::AwaitRedirect;
        } else if instr.flags().is_exit {
            self.fetch = FetchState::Stopped;
        } else {
            self.pc = self.pc.wrapping_add(INSTRUCTION_SIZE);
        }

        // Room was checked above.
        let _ = self.queue.push(instr);
        Ok(())
    }
}
