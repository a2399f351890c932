use pretty_assertions::assert_eq;

use tomasim_core::config::CoreConfig;
use tomasim_core::core::Cpu;
use tomasim_core::core::pipeline::issue_queue::IssueQueue;
use tomasim_core::isa::decode;
use tomasim_core::soc::Memory;
use tomasim_core::stats::SimStats;
use tomasim_core::trace::StallReason;

use crate::common::builder::InstructionBuilder as B;

#[test]
fn test_stall_counters() {
    let config = CoreConfig {
        rob_size: 1,
        ..CoreConfig::default()
    };
    let mut cpu = Cpu::new(&config);
    let mut queue = IssueQueue::new(4);
    let mut mem = Memory::new(0, 64);
    let mut stats = SimStats::default();
    for (i, word) in [B::new().addi(1, 0, 1).build(), B::new().addi(2, 0, 2).build()]
        .into_iter()
        .enumerate()
    {
        queue.push(decode(word, (i * 4) as u32, i as u64).unwrap()).unwrap();
    }

    while cpu.retired() < 2 {
        cpu.tick(&mut queue, &mut mem, &mut stats).unwrap();
    }

    // The second ADDI waits for the first to leave the single ROB slot.
    assert_eq!(stats.stalls_rob_full, 1);
    assert_eq!(stats.instructions_retired, 2);
    assert_eq!(stats.cycles, cpu.cycle());
    assert_eq!(stats.halt_cycle, None);
}

#[test]
fn test_ratios() {
    let mut stats = SimStats::default();
    assert_eq!(stats.ipc(), 0.0);
    assert_eq!(stats.cpi(), 0.0);

    stats.cycles = 8;
    stats.instructions_retired = 4;
    assert_eq!(stats.ipc(), 0.5);
    assert_eq!(stats.cpi(), 2.0);
}

#[test]
fn test_every_reason_has_a_counter() {
    use tomasim_core::trace::TraceSink;

    let mut stats = SimStats::default();
    for reason in [
        StallReason::RobFull,
        StallReason::RsFull,
        StallReason::FuBusy,
        StallReason::CdbContention,
        StallReason::CdbContention,
    ] {
        stats.on_stall(reason);
    }

    assert_eq!(stats.stalls_rob_full, 1);
    assert_eq!(stats.stalls_rs_full, 1);
    assert_eq!(stats.stalls_fu_busy, 1);
    assert_eq!(stats.stalls_cdb, 2);
}
