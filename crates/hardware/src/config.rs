//! Configuration system for the Tomasulo simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline structure sizes, unit latencies and memory map.
//! 2. **Structures:** Hierarchical config for general, core, and memory settings.
//! 3. **Enums:** CDB arbitration policy.
//!
//! Configuration is supplied as JSON (`--config` on the CLI) or use `Config::default()`.

use serde::Deserialize;

use crate::common::error::SimError;

/// Default configuration constants for the simulator.
///
/// These values define the baseline hardware configuration when not
/// explicitly overridden in JSON configuration files.
mod defaults {
    /// Reorder buffer capacity.
    pub const ROB_SIZE: usize = 16;

    /// Reservation station pool capacity.
    pub const RS_SIZE: usize = 8;

    /// Decoded instructions buffered between fetch and issue.
    pub const ISSUE_QUEUE_SIZE: usize = 4;

    /// Arithmetic unit latency in cycles.
    pub const ALU_LATENCY: u32 = 1;

    /// Branch unit latency in cycles.
    pub const BRU_LATENCY: u32 = 1;

    /// Load/store unit latency in cycles.
    ///
    /// One cycle of address generation plus one of memory access.
    pub const LSU_LATENCY: u32 = 2;

    /// CSR unit latency in cycles.
    pub const SFU_LATENCY: u32 = 1;

    /// Base address of simulated RAM.
    pub const RAM_BASE: u32 = 0;

    /// Size of simulated RAM (1 MiB).
    pub const RAM_SIZE: usize = 1024 * 1024;

    /// Cycle budget before a run is declared hung.
    pub const MAX_CYCLES: u64 = 10_000_000;
}

/// Policy that picks the single functional unit allowed onto the CDB when
/// several finish in the same cycle.
///
/// Losers keep their result and retry on a later cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum CdbArbitration {
    /// Fixed unit-type priority: ALU, then BRU, then LSU, then SFU.
    FixedPriority,
    /// Rotating priority; the unit after the last winner goes first.
    RoundRobin,
    /// The oldest instruction (lowest fetch identifier) wins.
    #[default]
    OldestFirst,
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use tomasim_core::config::{CdbArbitration, Config};
///
/// let config = Config::default();
/// assert_eq!(config.core.rob_size, 16);
/// assert_eq!(config.core.cdb_arbitration, CdbArbitration::OldestFirst);
///
/// let config = Config::from_json(r#"{
///     "general": { "trace_instructions": true },
///     "core": { "rob_size": 4, "lsu_latency": 3, "cdb_arbitration": "RoundRobin" }
/// }"#).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.core.rob_size, 4);
/// assert_eq!(config.core.rs_size, 8);
/// assert_eq!(config.core.cdb_arbitration, CdbArbitration::RoundRobin);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Out-of-order core sizing and timing
    #[serde(default)]
    pub core: CoreConfig,
    /// Main memory configuration
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] if the JSON is malformed or fails [`Config::validate`].
    pub fn from_json(text: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations the core cannot run with.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<(), SimError> {
        let core = &self.core;
        let sizes = [
            ("core.rob_size", core.rob_size),
            ("core.rs_size", core.rs_size),
            ("core.issue_queue_size", core.issue_queue_size),
            ("memory.size", self.memory.size),
        ];
        if let Some((name, _)) = sizes.iter().find(|(_, v)| *v == 0) {
            return Err(SimError::Config(format!("{name} must be non-zero")));
        }

        let latencies = [
            ("core.alu_latency", core.alu_latency),
            ("core.bru_latency", core.bru_latency),
            ("core.lsu_latency", core.lsu_latency),
            ("core.sfu_latency", core.sfu_latency),
        ];
        if let Some((name, _)) = latencies.iter().find(|(_, v)| *v == 0) {
            return Err(SimError::Config(format!("{name} must be at least 1")));
        }

        let end = u64::from(self.memory.base) + self.memory.size as u64;
        if end > 1 << 32 {
            return Err(SimError::Config(format!(
                "memory range {:#x}+{:#x} exceeds the 32-bit address space",
                self.memory.base, self.memory.size
            )));
        }
        Ok(())
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Log every issue, dispatch, broadcast and commit at debug level
    #[serde(default)]
    pub trace_instructions: bool,

    /// Initial PC value (defaults to RAM base)
    #[serde(default = "GeneralConfig::default_start_pc")]
    pub start_pc: u32,

    /// Cycle budget; reaching it without an exit is an error
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl GeneralConfig {
    /// Returns the default starting program counter.
    const fn default_start_pc() -> u32 {
        defaults::RAM_BASE
    }

    /// Returns the default cycle budget.
    const fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            start_pc: defaults::RAM_BASE,
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}

/// Out-of-order core configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CoreConfig {
    /// Reorder buffer entries
    #[serde(default = "CoreConfig::default_rob_size")]
    pub rob_size: usize,

    /// Reservation station entries
    #[serde(default = "CoreConfig::default_rs_size")]
    pub rs_size: usize,

    /// Issue queue depth between fetch and issue
    #[serde(default = "CoreConfig::default_issue_queue_size")]
    pub issue_queue_size: usize,

    /// Arithmetic unit latency (cycles)
    #[serde(default = "CoreConfig::default_alu_latency")]
    pub alu_latency: u32,

    /// Branch unit latency (cycles)
    #[serde(default = "CoreConfig::default_bru_latency")]
    pub bru_latency: u32,

    /// Load/store unit latency (cycles)
    #[serde(default = "CoreConfig::default_lsu_latency")]
    pub lsu_latency: u32,

    /// CSR unit latency (cycles)
    #[serde(default = "CoreConfig::default_sfu_latency")]
    pub sfu_latency: u32,

    /// CDB arbitration policy
    #[serde(default)]
    pub cdb_arbitration: CdbArbitration,
}

impl CoreConfig {
    const fn default_rob_size() -> usize {
        defaults::ROB_SIZE
    }

    const fn default_rs_size() -> usize {
        defaults::RS_SIZE
    }

    const fn default_issue_queue_size() -> usize {
        defaults::ISSUE_QUEUE_SIZE
    }

    const fn default_alu_latency() -> u32 {
        defaults::ALU_LATENCY
    }

    const fn default_bru_latency() -> u32 {
        defaults::BRU_LATENCY
    }

    const fn default_lsu_latency() -> u32 {
        defaults::LSU_LATENCY
    }

    const fn default_sfu_latency() -> u32 {
        defaults::SFU_LATENCY
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            rob_size: defaults::ROB_SIZE,
            rs_size: defaults::RS_SIZE,
            issue_queue_size: defaults::ISSUE_QUEUE_SIZE,
            alu_latency: defaults::ALU_LATENCY,
            bru_latency: defaults::BRU_LATENCY,
            lsu_latency: defaults::LSU_LATENCY,
            sfu_latency: defaults::SFU_LATENCY,
            cdb_arbitration: CdbArbitration::default(),
        }
    }
}

/// Main memory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Base address of RAM
    #[serde(default = "MemoryConfig::default_base")]
    pub base: u32,

    /// RAM size in bytes
    #[serde(default = "MemoryConfig::default_size")]
    pub size: usize,
}

impl MemoryConfig {
    /// Returns the default RAM base address.
    const fn default_base() -> u32 {
        defaults::RAM_BASE
    }

    /// Returns the default RAM size.
    const fn default_size() -> usize {
        defaults::RAM_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            base: defaults::RAM_BASE,
            size: defaults::RAM_SIZE,
        }
    }
}
