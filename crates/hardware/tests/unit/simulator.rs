use pretty_assertions::assert_eq;

use tomasim_core::Simulator;
use tomasim_core::common::error::{DecodeError, MemoryError, SimError};
use tomasim_core::config::Config;
use tomasim_core::core::pipeline::signals::FuType;
use tomasim_core::sim::simulator::FetchState;

use crate::common::builder::{InstructionBuilder as B, ecall, to_image};

fn simulator(program: &[u32]) -> Simulator {
    simulator_with(&Config::default(), program)
}

fn simulator_with(config: &Config, program: &[u32]) -> Simulator {
    let mut sim = Simulator::new(config).unwrap();
    sim.memory
        .load(config.memory.base, &to_image(program))
        .unwrap();
    sim
}

#[test]
fn test_counted_loop() {
    let mut sim = simulator(&[
        B::new().addi(1, 0, 3).build(),  // 0x00
        B::new().addi(2, 0, 0).build(),  // 0x04
        B::new().addi(2, 2, 1).build(),  // 0x08: loop
        B::new().blt(2, 1, -4).build(),  // 0x0c
        B::new().jal(5, 8).build(),      // 0x10
        B::new().addi(6, 0, 99).build(), // 0x14: skipped
        ecall(),                         // 0x18
    ]);

    sim.run().unwrap();

    let regs = sim.cpu.regs();
    assert_eq!(regs.read(2), 3);
    assert_eq!(regs.read(5), 0x14);
    assert_eq!(regs.read(6), 0);
    // 2 setup + 3 iterations of 2 + JAL + ECALL
    assert_eq!(sim.cpu.retired(), 10);
    assert_eq!(sim.fetch_state(), FetchState::Stopped);
}

#[test]
fn test_jalr_clears_low_bit() {
    let mut sim = simulator(&[
        B::new().addi(1, 0, 0x11).build(), // 0x00
        B::new().jalr(2, 1, 0).build(),    // 0x04: to 0x10
        B::new().addi(3, 0, 1).build(),    // 0x08: skipped
        B::new().nop().build(),            // 0x0c
        ecall(),                           // 0x10
    ]);

    sim.run().unwrap();

    assert_eq!(sim.cpu.regs().read(2), 0x08);
    assert_eq!(sim.cpu.regs().read(3), 0);
}

#[test]
fn test_auipc_and_lui() {
    let mut sim = simulator(&[
        B::new().nop().build(),
        B::new().auipc(1, 0x1).build(),
        B::new().lui(2, 0xFFFFF).build(),
        B::new().srai(3, 2, 12).build(),
        ecall(),
    ]);

    sim.run().unwrap();

    assert_eq!(sim.cpu.regs().read(1), 0x1004);
    assert_eq!(sim.cpu.regs().read(2), 0xFFFF_F000);
    assert_eq!(sim.cpu.regs().read(3), 0xFFFF_FFFF);
}

#[test]
fn test_fetch_waits_for_branch() {
    let mut sim = simulator(&[
        B::new().beq(0, 0, 8).build(), // 0x00: to 0x08
        B::new().addi(1, 0, 1).build(),
        ecall(),
    ]);

    sim.tick().unwrap();
    assert_eq!(sim.fetch_state(), FetchState::AwaitRedirect);
    assert_eq!(sim.pc(), 0);
    assert_eq!(sim.queue.len(), 1);

    sim.run().unwrap();
    assert_eq!(sim.cpu.regs().read(1), 0);
    assert_eq!(sim.cpu.retired(), 2);
}

#[test]
fn test_stats_follow_the_core() {
    let mut sim = simulator(&[
        B::new().addi(1, 0, 1).build(),
        B::new().sw(0, 1, 0x400).build(),
        B::new().beq(0, 0, 4).build(),
        ecall(),
    ]);

    sim.run().unwrap();

    let stats = &sim.stats;
    assert_eq!(stats.instructions_retired, 4);
    assert_eq!(stats.cycles, sim.cpu.cycle());
    assert_eq!(stats.halt_cycle, Some(sim.cpu.cycle() - 1));
    assert_eq!(stats.retired_by_unit[FuType::Alu.index()], 2);
    assert_eq!(stats.retired_by_unit[FuType::Lsu.index()], 1);
    assert_eq!(stats.retired_by_unit[FuType::Bru.index()], 1);
    assert!(stats.ipc() > 0.0);
}

#[test]
fn test_cycle_limit() {
    let mut config = Config::default();
    config.general.max_cycles = 100;
    let mut sim = simulator_with(&config, &[B::new().jal(0, 0).build()]);

    let err = sim.run().unwrap_err();

    assert!(matches!(err, SimError::CycleLimit(100)));
    assert!(!sim.cpu.is_halted());
    assert_eq!(sim.cpu.cycle(), 100);
}

#[test]
fn test_undecodable_word_is_fatal() {
    let mut sim = simulator(&[0xFFFF_FFFF]);

    let err = sim.tick().unwrap_err();

    assert!(matches!(
        err,
        SimError::Decode(DecodeError::UnknownOpcode { pc: 0, .. })
    ));
}

#[test]
fn test_fetch_past_end_of_memory() {
    let mut config = Config::default();
    config.memory.size = 8;
    let mut sim = simulator_with(&config, &[B::new().nop().build(), B::new().nop().build()]);

    let err = sim.run().unwrap_err();

    assert!(matches!(
        err,
        SimError::Memory(MemoryError::OutOfBounds { addr: 8, .. })
    ));
}

#[test]
fn test_nonzero_memory_base() {
    let mut config = Config::default();
    config.memory.base = 0x8000_0000;
    config.memory.size = 0x1000;
    config.general.start_pc = 0x8000_0000;
    let mut sim = simulator_with(
        &config,
        &[
            B::new().auipc(1, 0).build(),
            B::new().lw(2, 1, 0x100).build(),
            ecall(),
        ],
    );
    sim.memory.load(0x8000_0100, &0x1234_5678u32.to_le_bytes()).unwrap();

    sim.run().unwrap();

    assert_eq!(sim.cpu.regs().read(1), 0x8000_0000);
    assert_eq!(sim.cpu.regs().read(2), 0x1234_5678);
}
