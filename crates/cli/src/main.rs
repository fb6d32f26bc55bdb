//! rvstep command-line front end.
//!
//! This binary plays the role of the display layer over the simulation
//! core. It performs:
//! 1. **Batch run:** load an assembly file and run it to completion,
//!    printing final registers, memory, and control signals.
//! 2. **Interactive stepping:** a small REPL with step/run/registers/
//!    memory/signals/reset commands.
//! 3. **Machine output:** `--json` dumps the final machine state as JSON
//!    for scripted consumers.

use std::io::{self, BufRead, Write};
use std::{fs, process, thread};

use clap::{Parser, Subcommand};
use serde::Serialize;

use rvstep_core::core::signals::SignalSnapshot;
use rvstep_core::isa::abi;
use rvstep_core::{Config, Policy, RunTick, Simulator, Status, StepOutcome};

#[derive(Parser, Debug)]
#[command(
    name = "rvstep",
    version,
    about = "Educational single-step RISC-V (RV32I subset) simulator",
    long_about = "Load a small assembly program (one instruction or label per line, `#` comments)\nand execute it one instruction at a time.\n\nExamples:\n  rvstep run fib.s\n  rvstep run fib.s --interval-ms 250\n  rvstep run fib.s --json\n  rvstep step fib.s"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program to completion.
    Run {
        /// Assembly source file.
        file: String,

        /// Delay between instructions in milliseconds (0 = as fast as possible).
        #[arg(long, default_value_t = 0)]
        interval_ms: u64,

        /// Resolve unknown registers to x0 and ignore out-of-range
        /// addresses instead of failing the step.
        #[arg(long)]
        permissive: bool,

        /// Print the final machine state as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Step through a program interactively.
    Step {
        /// Assembly source file.
        file: String,

        /// Permissive operand/address policy (see `run --permissive`).
        #[arg(long)]
        permissive: bool,
    },
}

/// Final machine state, serialized by `run --json`.
#[derive(Serialize)]
struct StateDump<'a> {
    pc: usize,
    halted: bool,
    registers: [i32; abi::REG_COUNT],
    memory: &'a [i32],
    signals: Option<&'a SignalSnapshot>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            file,
            interval_ms,
            permissive,
            json,
        } => cmd_run(&file, interval_ms, permissive, json),
        Commands::Step { file, permissive } => cmd_step(&file, permissive),
    }
}

/// Reads a source file, exiting with a message if it cannot be read.
fn load_source(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("error: could not read '{path}': {e}");
        process::exit(1);
    })
}

/// Builds a simulator with the program loaded, exiting on load errors.
fn load_simulator(path: &str, permissive: bool, interval_ms: u64) -> Simulator {
    let config = Config {
        policy: if permissive {
            Policy::Permissive
        } else {
            Policy::Strict
        },
        step_interval_ms: interval_ms,
        ..Config::default()
    };
    let mut sim = Simulator::new(config);
    match sim.load(&load_source(path)) {
        Ok(count) => {
            eprintln!("loaded {count} instructions from {path}");
            sim
        }
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

fn cmd_run(path: &str, interval_ms: u64, permissive: bool, json: bool) {
    let mut sim = load_simulator(path, permissive, interval_ms);

    sim.resume();
    loop {
        match sim.tick() {
            RunTick::Stepped { delay } => {
                if !delay.is_zero() {
                    thread::sleep(delay);
                }
            }
            RunTick::Stopped => break,
        }
    }

    let faulted = sim.status() == Status::Ready;
    if json {
        print_json(&sim);
    } else {
        print_state(&sim);
    }
    if faulted {
        // Run mode ended before the program did: the last step failed.
        process::exit(1);
    }
}

fn cmd_step(path: &str, permissive: bool) {
    let mut sim = load_simulator(path, permissive, 0);
    let stdin = io::stdin();

    println!("commands: [s]tep, run, [r]egisters, [m]emory, signals, reset, [q]uit");
    loop {
        show_position(&sim);
        print!("rvstep> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        match line.trim() {
            "" | "s" | "step" => match sim.step() {
                StepOutcome::Executed { pc } => {
                    println!("executed PC={pc}");
                    print_signals(&sim);
                }
                StepOutcome::Finished => println!("program finished"),
                StepOutcome::Faulted(e) => println!("step failed: {e}"),
            },
            "run" => {
                sim.resume();
                while sim.tick() != RunTick::Stopped {}
                println!("stopped at PC={}", sim.pc());
            }
            "r" | "registers" => print_registers(&sim),
            "m" | "memory" => print_memory(&sim),
            "signals" => print_signals(&sim),
            "reset" => {
                sim.reset();
                println!("state reset");
            }
            "q" | "quit" => break,
            other => println!("unknown command `{other}`"),
        }
    }
}

fn show_position(sim: &Simulator) {
    match sim.current_instruction() {
        Some(inst) => println!("PC={}  next: {}", sim.pc(), inst.raw),
        None => println!("PC={}  (halted)", sim.pc()),
    }
}

fn print_state(sim: &Simulator) {
    println!("halted at PC={}", sim.pc());
    print_registers(sim);
    print_memory(sim);
    print_signals(sim);
}

/// Prints non-zero registers (plus x0 for orientation).
fn print_registers(sim: &Simulator) {
    println!("registers:");
    for (i, val) in sim.registers().iter().enumerate() {
        if i == 0 || *val != 0 {
            println!("  x{i:<2} ({:>4}) = {val}", abi::register_name(i));
        }
    }
}

/// Prints non-zero memory words.
fn print_memory(sim: &Simulator) {
    println!("memory (non-zero words):");
    let mut any = false;
    for (i, val) in sim.memory().iter().enumerate() {
        if *val != 0 {
            println!("  [{i}] = {val}");
            any = true;
        }
    }
    if !any {
        println!("  (all zero)");
    }
}

fn print_signals(sim: &Simulator) {
    match sim.signals() {
        Some(s) => println!(
            "signals: class={:?} alu_op={:?} reg_write={} alu_src={:?} mem_to_reg={} mem_write={} branch={} jump={}",
            s.class(),
            s.alu_op(),
            s.reg_write(),
            s.alu_src(),
            s.mem_to_reg(),
            s.mem_write(),
            s.branch(),
            s.jump()
        ),
        None => println!("signals: (none yet)"),
    }
}

fn print_json(sim: &Simulator) {
    let dump = StateDump {
        pc: sim.pc(),
        halted: sim.status() == Status::Halted,
        registers: sim.registers(),
        memory: sim.memory(),
        signals: sim.signals(),
    };
    match serde_json::to_string_pretty(&dump) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("error: could not serialize state: {e}");
            process::exit(1);
        }
    }
}
