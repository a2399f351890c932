//! Reservation station pool.
//!
//! Issued instructions wait here until both source operands are resolved and
//! their functional unit is free. Wakeup is broadcast-and-compare: every
//! occupied slot compares its own pending tags against each CDB publication,
//! so any number of slots may wait on the same producer.

use std::fmt;

use crate::core::pipeline::rob::RobIndex;
use crate::core::pipeline::signals::FuType;

/// A source operand: either a resolved value or the ROB slot that will produce it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// Value is known.
    Ready(u32),
    /// Waiting for the broadcast of this producer.
    Pending(RobIndex),
}

impl Operand {
    /// Resolved value, if any.
    #[inline]
    pub const fn value(self) -> Option<u32> {
        match self {
            Self::Ready(v) => Some(v),
            Self::Pending(_) => None,
        }
    }

    /// True once the operand no longer waits on a producer.
    #[inline]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl Default for Operand {
    fn default() -> Self {
        Self::Ready(0)
    }
}

/// Index of a slot in the reservation station pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RsIndex(pub usize);

impl fmt::Display for RsIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rs#{}", self.0)
    }
}

/// An occupied reservation station slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsEntry {
    /// ROB slot that owns the instruction and receives its result.
    pub rob: RobIndex,
    /// Fetch identifier, used for age ordering.
    pub uuid: u64,
    /// Unit the instruction dispatches to.
    pub fu_type: FuType,
    /// Source operands (rs1, rs2).
    pub ops: [Operand; 2],
    /// Already dispatched to a functional unit.
    pub running: bool,
}

impl RsEntry {
    /// Both operands resolved.
    #[inline]
    pub const fn operands_ready(&self) -> bool {
        self.ops[0].is_ready() && self.ops[1].is_ready()
    }
}

/// Fixed-capacity pool of reservation station slots.
///
/// A slot moves valid → running → free and is never re-dispatched while
/// running. It is freed by writeback once its broadcast has been consumed.
#[derive(Debug)]
pub struct ReservationStations {
    slots: Vec<Option<RsEntry>>,
}

impl ReservationStations {
    /// Creates a pool of `capacity` free slots.
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self { slots }
    }

    /// Total number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// True if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// True if no slot is free.
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Places a new entry (valid, not running) in the lowest free slot.
    ///
    /// Returns `None` when the pool is full.
    pub fn allocate(
        &mut self,
        rob: RobIndex,
        uuid: u64,
        fu_type: FuType,
        ops: [Operand; 2],
    ) -> Option<RsIndex> {
        let idx = self.slots.iter().position(Option::is_none)?;
        self.slots[idx] = Some(RsEntry {
            rob,
            uuid,
            fu_type,
            ops,
            running: false,
        });
        Some(RsIndex(idx))
    }

    /// Entry in slot `idx`, if occupied.
    pub fn get(&self, idx: RsIndex) -> Option<&RsEntry> {
        self.slots.get(idx.0).and_then(Option::as_ref)
    }

    /// Lock flag of slot `idx`.
    ///
    /// Memory and CSR entries dispatch in program order: an entry is locked
    /// while an older entry for the same kind of unit still occupies the pool.
    pub fn is_locked(&self, idx: RsIndex) -> bool {
        let Some(entry) = self.get(idx) else {
            return false;
        };
        entry.fu_type.is_ordered()
            && self
                .slots
                .iter()
                .flatten()
                .any(|other| other.fu_type == entry.fu_type && other.uuid < entry.uuid)
    }

    /// Slots eligible for dispatch, oldest first.
    ///
    /// Eligible means occupied, not running, both operands resolved and not locked.
    pub fn dispatchable(&self) -> Vec<RsIndex> {
        let mut ready: Vec<(u64, RsIndex)> = self
            .iter()
            .filter(|(idx, e)| !e.running && e.operands_ready() && !self.is_locked(*idx))
            .map(|(idx, e)| (e.uuid, idx))
            .collect();
        ready.sort_unstable();
        ready.into_iter().map(|(_, idx)| idx).collect()
    }

    /// Marks slot `idx` as dispatched. Returns false if it was free or already running.
    pub fn mark_running(&mut self, idx: RsIndex) -> bool {
        match self.slots.get_mut(idx.0).and_then(Option::as_mut) {
            Some(entry) if !entry.running => {
                entry.running = true;
                true
            }
            _ => false,
        }
    }

    /// Delivers a CDB publication to every operand waiting on `producer`.
    ///
    /// Returns the number of operands that were woken.
    pub fn broadcast(&mut self, producer: RobIndex, value: u32) -> usize {
        let mut woken = 0;
        for entry in self.slots.iter_mut().flatten() {
            for op in &mut entry.ops {
                if *op == Operand::Pending(producer) {
                    *op = Operand::Ready(value);
                    woken += 1;
                }
            }
        }
        woken
    }

    /// Frees slot `idx`, returning its entry.
    pub fn release(&mut self, idx: RsIndex) -> Option<RsEntry> {
        self.slots.get_mut(idx.0).and_then(Option::take)
    }

    /// Iterates over occupied slots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (RsIndex, &RsEntry)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|e| (RsIndex(i), e)))
    }
}
