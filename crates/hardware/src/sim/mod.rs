//! Simulation driver and program loading.
//!
//! Provides the fetch/decode driver that feeds the core, and utilities for
//! loading program images into memory.

/// Program image loading.
pub mod loader;

/// Fetch driver and run loop.
pub mod simulator;

pub use simulator::Simulator;
