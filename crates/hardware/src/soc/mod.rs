//! Memory-side components.
//!
//! The load/store unit and the fetch driver reach memory through the
//! [`MemoryPort`] trait; [`Memory`] is the flat RAM model behind it.

/// Flat little-endian RAM.
pub mod memory;

/// Memory access trait used by the load/store unit and fetch.
pub mod traits;

pub use memory::Memory;
pub use traits::MemoryPort;
