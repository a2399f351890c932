/// Decoder and printer tables.
pub mod isa;



/// CSR instructions through the system unit.
pub mod csr;


/// Fetch driver, control flow and the run loop.
pub mod simulator;

/// JSON configuration parsing and validation.
pub mod config;

/// Image loading from disk.
pub mod loader;

/// Statistics fed by the core.
pub mod stats;
