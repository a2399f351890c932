//! Tomasulo core simulator CLI.
//!
//! This binary loads a flat RV32I image and runs it on the out-of-order core. It performs:
//! 1. **Configuration:** Built-in defaults, optionally overridden by a JSON file.
//! 2. **Logging:** A `tracing` subscriber filtered by `RUST_LOG`, or debug level with `--trace`.
//! 3. **Run:** Ticks the simulator until the program exits, then prints registers and statistics.

use std::path::PathBuf;
use std::{fs, process};

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use tomasim_core::Simulator;
use tomasim_core::common::error::SimError;
use tomasim_core::config::Config;
use tomasim_core::sim::loader;

#[derive(Parser, Debug)]
#[command(
    name = "sim",
    author,
    version,
    about = "Cycle-level RV32I simulator with a Tomasulo out-of-order core",
    long_about = "Run a flat RV32I binary on the out-of-order core.\n\nExamples:\n  sim run -f program.bin\n  sim run -f program.bin --config core.json --trace"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a flat binary until it executes ECALL or EBREAK.
    Run {
        /// Program image, loaded at the start of RAM.
        #[arg(short, long)]
        file: PathBuf,

        /// JSON configuration file (missing fields take their defaults).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Log every issue, dispatch, broadcast and commit.
        #[arg(long)]
        trace: bool,

        /// Override the cycle budget.
        #[arg(long)]
        max_cycles: Option<u64>,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            file,
            config,
            trace,
            max_cycles,
        } => {
            if let Err(e) = cmd_run(&file, config.as_deref(), trace, max_cycles) {
                eprintln!("\n[!] FATAL: {e}");
                process::exit(1);
            }
        }
    }
}

/// Builds the configuration from defaults, the optional JSON file and CLI overrides.
fn load_config(
    path: Option<&std::path::Path>,
    trace: bool,
    max_cycles: Option<u64>,
) -> Result<Config, SimError> {
    let mut config = match path {
        Some(p) => {
            let text = fs::read_to_string(p)
                .map_err(|e| SimError::Config(format!("{}: {e}", p.display())))?;
            Config::from_json(&text)?
        }
        None => Config::default(),
    };
    config.general.trace_instructions |= trace;
    if let Some(limit) = max_cycles {
        config.general.max_cycles = limit;
    }
    Ok(config)
}

/// Installs the `tracing` subscriber.
fn init_logging(trace: bool) {
    let filter = if trace {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the image, runs it to completion and prints the final state.
fn cmd_run(
    file: &std::path::Path,
    config_path: Option<&std::path::Path>,
    trace: bool,
    max_cycles: Option<u64>,
) -> Result<(), SimError> {
    let config = load_config(config_path, trace, max_cycles)?;
    init_logging(config.general.trace_instructions);
    debug!(?config, "configuration loaded");

    println!(
        "Configuration: ROB {}  RS {}  IQ {}  CDB {:?}",
        config.core.rob_size,
        config.core.rs_size,
        config.core.issue_queue_size,
        config.core.cdb_arbitration
    );
    println!(
        "  Latency ALU/BRU/LSU/SFU: {}/{}/{}/{}  RAM: {:#x}+{} KiB",
        config.core.alu_latency,
        config.core.bru_latency,
        config.core.lsu_latency,
        config.core.sfu_latency,
        config.memory.base,
        config.memory.size / 1024
    );

    let mut sim = Simulator::new(&config)?;
    let bytes = loader::load_binary(file, &mut sim.memory, config.memory.base)?;
    println!("[*] Direct execution: {} ({bytes} bytes)", file.display());

    let outcome = sim.run();
    if outcome.is_ok() {
        println!("\n[*] Halted after {} cycles", sim.cpu.cycle());
    }
    sim.cpu.regs().dump();
    sim.stats.print();
    outcome
}
