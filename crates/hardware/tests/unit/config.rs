use pretty_assertions::assert_eq;
use rstest::rstest;

use tomasim_core::common::error::SimError;
use tomasim_core::config::{CdbArbitration, Config};

#[test]
fn test_empty_object_gives_defaults() {
    let config = Config::from_json("{}").unwrap();
    let defaults = Config::default();

    assert_eq!(config.core.rob_size, defaults.core.rob_size);
    assert_eq!(config.core.rs_size, defaults.core.rs_size);
    assert_eq!(config.core.lsu_latency, defaults.core.lsu_latency);
    assert_eq!(config.memory.size, defaults.memory.size);
    assert_eq!(config.general.max_cycles, defaults.general.max_cycles);
    assert!(!config.general.trace_instructions);
}

#[test]
fn test_full_document() {
    let config = Config::from_json(
        r#"{
            "general": { "trace_instructions": true, "start_pc": 256, "max_cycles": 5000 },
            "core": {
                "rob_size": 32, "rs_size": 12, "issue_queue_size": 2,
                "alu_latency": 1, "bru_latency": 2, "lsu_latency": 4, "sfu_latency": 3,
                "cdb_arbitration": "FixedPriority"
            },
            "memory": { "base": 0, "size": 65536 }
        }"#,
    )
    .unwrap();

    assert!(config.general.trace_instructions);
    assert_eq!(config.general.start_pc, 0x100);
    assert_eq!(config.general.max_cycles, 5000);
    assert_eq!(config.core.rob_size, 32);
    assert_eq!(config.core.rs_size, 12);
    assert_eq!(config.core.issue_queue_size, 2);
    assert_eq!(config.core.bru_latency, 2);
    assert_eq!(config.core.sfu_latency, 3);
    assert_eq!(config.core.cdb_arbitration, CdbArbitration::FixedPriority);
    assert_eq!(config.memory.size, 0x1_0000);
}

#[rstest]
#[case(r#"{"core": {"rob_size": 0}}"#, "core.rob_size")]
#[case(r#"{"core": {"rs_size": 0}}"#, "core.rs_size")]
#[case(r#"{"core": {"issue_queue_size": 0}}"#, "core.issue_queue_size")]
#[case(r#"{"core": {"lsu_latency": 0}}"#, "core.lsu_latency")]
#[case(r#"{"memory": {"size": 0}}"#, "memory.size")]
#[case(r#"{"memory": {"base": 4294901760, "size": 1048576}}"#, "32-bit address space")]
fn test_rejected(#[case] json: &str, #[case] reason: &str) {
    let err = Config::from_json(json).unwrap_err();
    match err {
        SimError::Config(msg) => assert!(msg.contains(reason), "{msg}"),
        other => panic!("expected a configuration error, got {other}"),
    }
}

#[rstest]
#[case("not json")]
#[case(r#"{"core": {"cdb_arbitration": "Random"}}"#)]
#[case(r#"{"core": {"rob_size": -1}}"#)]
fn test_malformed(#[case] json: &str) {
    assert!(matches!(Config::from_json(json), Err(SimError::Config(_))));
}
