//! Error definitions.
//!
//! This module defines the fatal error conditions of the simulator. It provides:
//! 1. **Decode Faults:** Instruction words the decode tables do not recognise.
//! 2. **Memory Faults:** Accesses outside the simulated memory or misaligned accesses.
//! 3. **Simulation Errors:** The top-level error returned by the core and the driver.
//!
//! Structural hazards (full ROB, full reservation stations, busy functional units)
//! are not errors. They are resolved by stalling and never surface here.

use thiserror::Error;

/// Fatal decode fault.
///
/// Either the word is malformed / belongs to an unimplemented extension, or the
/// decoder produced a representation that its own tables cannot name.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The 7-bit opcode field matches no supported instruction format.
    #[error("unrecognized opcode {opcode:#04x} in word {word:#010x} at pc {pc:#010x}")]
    UnknownOpcode {
        /// Raw instruction word.
        word: u32,
        /// Extracted opcode field.
        opcode: u32,
        /// Address the word was fetched from.
        pc: u32,
    },

    /// The opcode is known but the function codes select no operation.
    #[error(
        "no operation for opcode {opcode:#04x} funct3={funct3} funct7={funct7:#04x} imm={imm:#x} at pc {pc:#010x}"
    )]
    UnknownOperation {
        /// Extracted opcode field.
        opcode: u32,
        /// Extracted funct3 field.
        funct3: u32,
        /// Extracted funct7 field.
        funct7: u32,
        /// Assembled immediate.
        imm: u32,
        /// Address the word was fetched from.
        pc: u32,
    },

    /// The mnemonic table has no entry for a decoded instruction.
    ///
    /// This is an internal consistency fault between the decoder and the printer.
    #[error(
        "no mnemonic for opcode {opcode:#04x} funct3={funct3} funct7={funct7:#04x} imm={imm:#x}"
    )]
    NoMnemonic {
        /// Extracted opcode field.
        opcode: u32,
        /// Extracted funct3 field.
        funct3: u32,
        /// Extracted funct7 field.
        funct7: u32,
        /// Assembled immediate.
        imm: u32,
    },
}

/// Fault raised by the memory subsystem behind the load/store unit.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// The access falls (partly) outside the simulated memory.
    #[error("access of {width} bytes at {addr:#010x} is out of bounds")]
    OutOfBounds {
        /// Byte address of the access.
        addr: u32,
        /// Access width in bytes.
        width: u32,
    },

    /// The access is not naturally aligned.
    #[error("misaligned access of {width} bytes at {addr:#010x}")]
    Misaligned {
        /// Byte address of the access.
        addr: u32,
        /// Access width in bytes.
        width: u32,
    },
}

/// Top-level simulation error. Every variant halts the simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// Fatal decode fault.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Fatal memory fault.
    #[error(transparent)]
    Memory(#[from] MemoryError),

    /// Program image could not be read.
    #[error("failed to load program image: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is malformed or inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The run exceeded the configured cycle budget without halting.
    #[error("no exit after {0} cycles")]
    CycleLimit(u64),
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
