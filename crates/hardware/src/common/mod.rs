//! Common utilities and types used throughout the simulator.
//!
//! This module provides the building blocks shared by every component:
//! 1. **Constants:** Architectural widths and register counts.
//! 2. **Error Handling:** Decode, memory and top-level simulation errors.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types.
pub mod error;

pub use error::{DecodeError, MemoryError, SimError};
