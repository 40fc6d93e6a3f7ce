//! RV32I machine model CLI.
//!
//! This binary drives the machine model cycle by cycle. It performs:
//! 1. **Startup:** Loads configuration and the RAM image; any failure exits with status 1
//!    before the first cycle.
//! 2. **Run:** Clocks the machine until the cycle limit or kill address is reached,
//!    optionally printing a text or JSON trace of every cycle to stdout.
//! 3. **Report:** Optionally prints the final register file as JSON and run statistics.
//!
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG` to adjust verbosity.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use rvemu_core::config::{Config, TraceFormat};
use rvemu_core::sim::{Machine, StopReason};

#[derive(Parser, Debug)]
#[command(
    name = "rvemu",
    author,
    version,
    about = "Cycle-accurate RV32I machine model",
    long_about = "Load a flat binary RAM image at address 0 and clock the five-stage core, caches, bus and DRAM.\n\nExamples:\n  rvemu -c 10000 program.bin\n  rvemu -l -k 0x100 -e program.bin\n  rvemu --config machine.json --stats program.bin"
)]
struct Cli {
    /// Flat binary RAM image.
    image: PathBuf,

    /// Print a human-readable trace of every cycle.
    #[arg(short, long, conflicts_with = "json")]
    log: bool,

    /// Print a JSON trace, one object per cycle.
    #[arg(short, long)]
    json: bool,

    /// Stop after this many cycles (hex 0x, binary 0b, or decimal).
    #[arg(short, long, value_parser = parse_value)]
    cycles: Option<u64>,

    /// Stop when the fetch PC reaches this address (hex 0x, binary 0b, or decimal).
    #[arg(short, long, value_parser = parse_address)]
    kill: Option<u32>,

    /// Print the final register file as JSON.
    #[arg(short, long)]
    exit_status: bool,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print run statistics.
    #[arg(long)]
    stats: bool,
}

/// Final architectural state printed by `--exit-status`.
#[derive(Serialize)]
struct ExitStatus {
    cycles: u64,
    pc: u32,
    stop: StopReason,
    regs: Vec<u32>,
}

/// Parses a number written in hex (`0x`), binary (`0b`), or decimal.
fn parse_value(s: &str) -> Result<u64, String> {
    let s = s.trim();
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else if let Some(bin) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
        u64::from_str_radix(bin, 2)
    } else {
        s.parse::<u64>()
    };
    parsed.map_err(|e| format!("invalid value '{s}': {e}"))
}

fn parse_address(s: &str) -> Result<u32, String> {
    let value = parse_value(s)?;
    u32::try_from(value).map_err(|_| format!("address '{s}' does not fit in 32 bits"))
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_json_file(path).unwrap_or_else(|e| fail(&e)),
        None => Config::default(),
    };
    if cli.log {
        config.general.trace = TraceFormat::Text;
    } else if cli.json {
        config.general.trace = TraceFormat::Json;
    }
    if cli.cycles.is_some() {
        config.general.cycle_limit = cli.cycles;
    }
    if cli.kill.is_some() {
        config.general.kill_address = cli.kill;
    }

    let mut machine = Machine::new(&config).unwrap_or_else(|e| fail(&e));
    let _ = machine.load_image(&cli.image).unwrap_or_else(|e| fail(&e));

    let stop = run(&mut machine, &config);

    if cli.exit_status {
        let status = ExitStatus {
            cycles: machine.cycles(),
            pc: machine.cpu.pc,
            stop,
            regs: machine.cpu.regs.snapshot().to_vec(),
        };
        match serde_json::to_string_pretty(&status) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::error!(error = %e, "could not serialize exit status"),
        }
    }
    if cli.stats {
        machine.stats().print();
    }
}

fn run(machine: &mut Machine, config: &Config) -> StopReason {
    let limit = config.general.cycle_limit;
    let kill = config.general.kill_address;
    if limit.is_none() && kill.is_none() {
        tracing::warn!("no cycle limit or kill address given; running until interrupted");
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let trace = config.general.trace;
    let stop = machine.run_with(limit, kill, |m| {
        let written = match trace {
            TraceFormat::Off => Ok(()),
            TraceFormat::Text => writeln!(out, "{}\n", m.snapshot()),
            TraceFormat::Json => serde_json::to_writer(&mut out, &m.snapshot())
                .map_err(io::Error::from)
                .and_then(|()| writeln!(out)),
        };
        if let Err(e) = written {
            tracing::error!(error = %e, "trace output failed");
            process::exit(1);
        }
    });
    if let Err(e) = out.flush() {
        tracing::error!(error = %e, "trace output failed");
    }
    stop
}

fn fail(err: &rvemu_core::SimError) -> ! {
    eprintln!("[!] FATAL: {err}");
    process::exit(1);
}
