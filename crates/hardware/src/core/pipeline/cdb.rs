//! Common Data Bus (CDB).
//!
//! A single-slot broadcast channel shared by every functional unit. At most
//! one result is published per cycle; [`CdbArbiter`] decides which finished
//! unit gets the slot when several complete together.

use crate::config::CdbArbitration;
use crate::core::pipeline::reservation::RsIndex;
use crate::core::pipeline::rob::RobIndex;
use crate::core::pipeline::signals::FuType;

/// One in-flight broadcast record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CdbEntry {
    /// Value produced by the instruction.
    pub result: u32,
    /// Destination ROB slot, and the tag waiting operands compare against.
    pub rob: RobIndex,
    /// Originating RS slot, freed by writeback.
    pub rs: RsIndex,
    /// Resolved next PC for control-flow instructions.
    pub redirect: Option<u32>,
}

/// The single-slot bus.
#[derive(Clone, Debug, Default)]
pub struct Cdb {
    slot: Option<CdbEntry>,
}

impl Cdb {
    /// Creates an empty bus.
    pub const fn new() -> Self {
        Self { slot: None }
    }

    /// True if nothing is being broadcast.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    /// The current broadcast, if any.
    #[inline]
    pub const fn peek(&self) -> Option<&CdbEntry> {
        self.slot.as_ref()
    }

    /// Places `entry` on the bus.
    ///
    /// # Errors
    ///
    /// Hands `entry` back untouched if the slot is already occupied; a
    /// publication is never overwritten.
    pub fn publish(&mut self, entry: CdbEntry) -> Result<(), CdbEntry> {
        if self.slot.is_some() {
            return Err(entry);
        }
        self.slot = Some(entry);
        Ok(())
    }

    /// Removes the current broadcast.
    pub fn take(&mut self) -> Option<CdbEntry> {
        self.slot.take()
    }
}

/// A finished functional unit asking for the bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Request {
    /// Requesting unit.
    pub fu: FuType,
    /// Fetch identifier of the instruction it holds.
    pub uuid: u64,
}

/// Grants the CDB to one requester per cycle.
#[derive(Clone, Debug)]
pub struct CdbArbiter {
    policy: CdbArbitration,
    /// Round-robin pointer: unit index that has priority next.
    next: usize,
}

impl CdbArbiter {
    /// Creates an arbiter applying `policy`.
    pub const fn new(policy: CdbArbitration) -> Self {
        Self { policy, next: 0 }
    }

    /// Configured policy.
    pub const fn policy(&self) -> CdbArbitration {
        self.policy
    }

    /// Picks the winner among `requests`, or `None` if there are none.
    pub fn grant(&mut self, requests: &[Request]) -> Option<FuType> {
        let winner = match self.policy {
            CdbArbitration::FixedPriority => requests.iter().map(|r| r.fu).min(),
            CdbArbitration::OldestFirst => requests.iter().min_by_key(|r| r.uuid).map(|r| r.fu),
            CdbArbitration::RoundRobin => (0..FuType::COUNT)
                .map(|i| FuType::ALL[(self.next + i) % FuType::COUNT])
                .find(|fu| requests.iter().any(|r| r.fu == *fu)),
        }?;

        if self.policy == CdbArbitration::RoundRobin {
            self.next = (winner.index() + 1) % FuType::COUNT;
        }
        Some(winner)
    }
}
