use std::io::Write;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use tomasim_core::common::error::{MemoryError, SimError};
use tomasim_core::config::Config;
use tomasim_core::sim::loader::load_binary;
use tomasim_core::soc::{Memory, MemoryPort};
use tomasim_core::Simulator;
use tomasim_core::core::pipeline::signals::MemWidth;

use crate::common::builder::{InstructionBuilder as B, ecall, to_image};

fn image_file(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_image_copied_to_base() {
    let file = image_file(&[0x13, 0x00, 0x00, 0x00, 0xAA, 0xBB]);
    let mut mem = Memory::new(0x1000, 64);

    let n = load_binary(file.path(), &mut mem, 0x1000).unwrap();

    assert_eq!(n, 6);
    assert_eq!(mem.read(0x1000, MemWidth::Word), Ok(0x0000_0013));
    assert_eq!(mem.read(0x1004, MemWidth::Half), Ok(0xBBAA));
}

#[test]
fn test_image_too_large() {
    let file = image_file(&[0u8; 32]);
    let mut mem = Memory::new(0, 16);

    let err = load_binary(file.path(), &mut mem, 0).unwrap_err();

    assert!(matches!(
        err,
        SimError::Memory(MemoryError::OutOfBounds { addr: 0, .. })
    ));
}

#[test]
fn test_missing_file() {
    let mut mem = Memory::new(0, 16);

    let err = load_binary(Path::new("/nonexistent/image.bin"), &mut mem, 0).unwrap_err();

    assert!(matches!(err, SimError::Io(_)));
}

#[test]
fn test_loaded_program_runs() {
    let file = image_file(&to_image(&[
        B::new().addi(1, 0, 20).build(),
        B::new().addi(2, 1, 22).build(),
        ecall(),
    ]));
    let config = Config::default();
    let mut sim = Simulator::new(&config).unwrap();

    let _ = load_binary(file.path(), &mut sim.memory, config.memory.base).unwrap();
    sim.run().unwrap();

    assert_eq!(sim.cpu.regs().read(2), 42);
}
