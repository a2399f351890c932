//! Issue queue between the fetch/decode driver and the issue stage.
//!
//! Bounded FIFO of decoded instructions. Issue only ever looks at the front
//! entry; a stalled instruction stays there and is retried next cycle.

use std::collections::VecDeque;

use crate::isa::instruction::Instr;

/// Bounded FIFO of decoded, not yet issued instructions.
#[derive(Debug)]
pub struct IssueQueue {
    entries: VecDeque<Instr>,
    capacity: usize,
}

impl IssueQueue {
    /// Creates an empty queue holding at most `capacity` instructions.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `instr` at the back.
    ///
    /// # Errors
    ///
    /// Returns the instruction back when the queue is full.
    pub fn push(&mut self, instr: Instr) -> Result<(), Instr> {
        if self.is_full() {
            return Err(instr);
        }
        self.entries.push_back(instr);
        Ok(())
    }

    /// Oldest waiting instruction.
    pub fn front(&self) -> Option<&Instr> {
        self.entries.front()
    }

    /// Removes the oldest waiting instruction.
    pub fn pop(&mut self) -> Option<Instr> {
        self.entries.pop_front()
    }

    /// Number of waiting instructions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if no more instructions can be pushed.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }
}
