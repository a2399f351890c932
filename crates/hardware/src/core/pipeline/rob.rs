//! Reorder Buffer (ROB) for in-order commit.
//!
//! The ROB is a circular buffer that tracks in-flight instructions from issue
//! through commit. It provides:
//! 1. **Allocation:** Places each issued instruction at the tail and names it by slot index.
//! 2. **Ownership:** Holds the decoded [`Instr`] record until commit; other structures refer to it by index.
//! 3. **Completion:** Marks entries ready when their broadcast arrives.
//! 4. **In-order Commit:** Retires instructions from the head in program order.

use std::fmt;

use crate::isa::instruction::Instr;

/// Slot index identifying an in-flight instruction in the ROB.
///
/// This is the tag carried by pending operands, the RAT and the CDB.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RobIndex(pub usize);

impl fmt::Display for RobIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rob#{}", self.0)
    }
}

/// A single occupied entry in the Reorder Buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RobEntry {
    /// Decoded instruction, owned until commit.
    pub instr: Instr,
    /// Result has been broadcast and the entry may commit.
    pub ready: bool,
    /// Value written to `rd` at commit (meaningless until `ready`).
    pub result: u32,
}

/// Reorder Buffer: circular buffer for in-order commit.
#[derive(Debug)]
pub struct Rob {
    /// Fixed-size slot array; `None` marks a free slot.
    entries: Vec<Option<RobEntry>>,
    /// Index of the oldest entry (commit point).
    head: usize,
    /// Index where the next entry will be allocated.
    tail: usize,
    /// Number of occupied entries.
    count: usize,
}

impl Rob {
    /// Creates a new ROB with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let mut entries = Vec::with_capacity(capacity);
        entries.resize_with(capacity, || None);
        Self {
            entries,
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Returns the ROB capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of occupied entries.
    #[inline]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the ROB is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns true if the ROB is full.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.entries.len()
    }

    /// Returns the number of free slots.
    #[inline]
    pub fn free_slots(&self) -> usize {
        self.entries.len() - self.count
    }

    /// Index the next [`Rob::allocate`] will hand out, or `None` if the ROB is full.
    #[inline]
    pub fn next_index(&self) -> Option<RobIndex> {
        (!self.is_full()).then_some(RobIndex(self.tail))
    }

    /// Allocates a new entry at the tail with `ready = false`.
    ///
    /// Returns `None` if the ROB is full.
    pub fn allocate(&mut self, instr: Instr) -> Option<RobIndex> {
        if self.is_full() {
            return None;
        }

        let idx = self.tail;
        self.entries[idx] = Some(RobEntry {
            instr,
            ready: false,
            result: 0,
        });
        self.tail = (self.tail + 1) % self.entries.len();
        self.count += 1;
        Some(RobIndex(idx))
    }

    /// Returns the entry at `idx`, or `None` if that slot is free.
    pub fn get(&self, idx: RobIndex) -> Option<&RobEntry> {
        self.entries.get(idx.0).and_then(Option::as_ref)
    }

    /// Forwarded value for an in-flight producer, if it is already ready.
    pub fn ready_value(&self, idx: RobIndex) -> Option<u32> {
        self.get(idx).filter(|e| e.ready).map(|e| e.result)
    }

    /// Marks the entry at `idx` ready with `result`.
    ///
    /// Returns false if the slot is not occupied.
    pub fn mark_ready(&mut self, idx: RobIndex, result: u32) -> bool {
        match self.entries.get_mut(idx.0).and_then(Option::as_mut) {
            Some(entry) => {
                entry.ready = true;
                entry.result = result;
                true
            }
            None => false,
        }
    }

    /// Index of the head entry, if any.
    pub fn head_index(&self) -> Option<RobIndex> {
        if self.is_empty() {
            None
        } else {
            Some(RobIndex(self.head))
        }
    }

    /// Returns a reference to the head entry (oldest instruction).
    pub fn peek_head(&self) -> Option<&RobEntry> {
        if self.is_empty() {
            return None;
        }
        self.entries[self.head].as_ref()
    }

    /// Commits the head entry if it is ready.
    ///
    /// Returns the removed entry with its slot index; `None` if the ROB is
    /// empty or the head has not completed yet.
    pub fn commit_head(&mut self) -> Option<(RobIndex, RobEntry)> {
        if !self.peek_head()?.ready {
            return None;
        }

        let idx = self.head;
        let entry = self.entries[idx].take()?;
        self.head = (self.head + 1) % self.entries.len();
        self.count -= 1;
        Some((RobIndex(idx), entry))
    }

    /// Iterates over occupied entries from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = (RobIndex, &RobEntry)> + '_ {
        let cap = self.entries.len();
        (0..self.count).filter_map(move |i| {
            let idx = (self.head + i) % cap;
            self.entries[idx].as_ref().map(|e| (RobIndex(idx), e))
        })
    }
}
