use std::collections::VecDeque;

use tomasim_core::common::error::SimError;
use tomasim_core::config::CoreConfig;
use tomasim_core::core::Cpu;
use tomasim_core::core::pipeline::issue_queue::IssueQueue;
use tomasim_core::isa::{Instr, decode};
use tomasim_core::soc::Memory;
use tomasim_core::trace::RecordingSink;

/// Capacity of the decoded-instruction queue in front of issue.
const QUEUE_SIZE: usize = 4;

/// Drives the core directly with a straight-line program.
///
/// Instructions are decoded up front (PC = 4 * index) and handed to the issue
/// queue as it drains, the way fetch would with no control flow. Every core
/// event lands in `sink`.
pub struct TestContext {
    pub cpu: Cpu,
    pub queue: IssueQueue,
    pub mem: Memory,
    pub sink: RecordingSink,
    program: VecDeque<Instr>,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(&CoreConfig::default())
    }

    pub fn with_config(config: &CoreConfig) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();

        Self {
            cpu: Cpu::new(config),
            queue: IssueQueue::new(QUEUE_SIZE),
            mem: Memory::new(0, 4096),
            sink: RecordingSink::default(),
            program: VecDeque::new(),
        }
    }

    /// Decodes `words` and appends them to the pending program.
    pub fn load_program(mut self, words: &[u32]) -> Self {
        let start = self.program.len();
        for (i, &word) in words.iter().enumerate() {
            let n = start + i;
            let instr = decode(word, (n * 4) as u32, n as u64)
                .unwrap_or_else(|e| panic!("test program word {i} does not decode: {e}"));
            self.program.push_back(instr);
        }
        self
    }

    /// Stores a word in data memory.
    pub fn poke(mut self, addr: u32, value: u32) -> Self {
        self.mem
            .load(addr, &value.to_le_bytes())
            .unwrap_or_else(|e| panic!("poke {addr:#x}: {e}"));
        self
    }

    /// Committed register value.
    pub fn get_reg(&self, reg: usize) -> u32 {
        self.cpu.regs().read(reg)
    }

    /// Runs a single cycle.
    pub fn tick(&mut self) -> Result<(), SimError> {
        while !self.queue.is_full() {
            let Some(instr) = self.program.pop_front() else {
                break;
            };
            let _ = self.queue.push(instr);
        }
        self.cpu.tick(&mut self.queue, &mut self.mem, &mut self.sink)
    }

    /// Runs exactly `cycles` cycles.
    pub fn run(&mut self, cycles: u64) {
        for _ in 0..cycles {
            self.tick().unwrap();
        }
    }

    /// Runs until the whole program has committed or the core halts.
    ///
    /// Panics if that takes more than `limit` cycles.
    pub fn run_to_completion(&mut self, limit: u64) {
        for _ in 0..limit {
            if self.cpu.is_halted() {
                return;
            }
            if self.program.is_empty() && self.queue.is_empty() && self.cpu.is_idle() {
                return;
            }
            self.tick().unwrap();
        }
        panic!(
            "program did not complete within {limit} cycles (retired {})",
            self.cpu.retired()
        );
    }
}
