//! Execution driver: the step/run state machine over the executor.
//!
//! The [`Simulator`] owns the program, architectural state, signal
//! snapshot, and execution log. A display layer drives it through four
//! commands (load, step, run/pause, reset) and pulls state back through
//! the query methods after each step.
//!
//! Run mode is cooperative: the embedder owns the timer and calls
//! [`Simulator::tick`] once per interval; [`Simulator::pause`] takes
//! effect before the next scheduled step, never mid-step. One logical
//! actor mutates state at a time; there is no internal threading.

/// Bounded execution log.
pub mod log;

use std::time::Duration;

use crate::asm::{self, Program};
use crate::config::Config;
use crate::core::{ArchState, exec};
use crate::core::signals::SignalSnapshot;
use crate::error::{LoadError, StepError};
use crate::isa::abi::REG_COUNT;
use log::{ExecutionLog, LogLevel};

/// Whether the machine can execute another instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// The PC points at an instruction.
    Ready,
    /// The PC is at or past the end of the program.
    Halted,
}

/// Outcome of a single [`Simulator::step`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The instruction at `pc` executed and state advanced.
    Executed {
        /// The PC the instruction was fetched from.
        pc: usize,
    },
    /// The PC was already past the end; nothing happened.
    Finished,
    /// The step failed; architectural state is unchanged.
    Faulted(StepError),
}

/// Outcome of a [`Simulator::tick`] call in run mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunTick {
    /// One instruction executed; call `tick` again after `delay`.
    Stepped {
        /// The configured inter-step delay.
        delay: Duration,
    },
    /// Run mode is over: halted, faulted, or paused.
    Stopped,
}

/// The instruction-set simulator: program, architectural state, signal
/// snapshot, log, and the run-mode flag.
#[derive(Debug)]
pub struct Simulator {
    config: Config,
    program: Program,
    state: ArchState,
    signals: Option<SignalSnapshot>,
    log: ExecutionLog,
    running: bool,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Simulator {
    /// Creates a simulator with no program loaded.
    pub fn new(config: Config) -> Self {
        let state = ArchState::new(config.effective_memory_words());
        let log = ExecutionLog::new(config.log_capacity);
        Self {
            config,
            program: Program::default(),
            state,
            signals: None,
            log,
            running: false,
        }
    }

    /// Assembles `source` and installs it as the current program.
    ///
    /// Replaces the program wholesale, zero-fills architectural state, and
    /// clears the signal snapshot and log. On error the previous program
    /// and state are left untouched.
    ///
    /// # Errors
    ///
    /// [`LoadError`] if a branch/jump references an undeclared label.
    pub fn load(&mut self, source: &str) -> Result<usize, LoadError> {
        let program = match asm::assemble(source) {
            Ok(program) => program,
            Err(err) => {
                tracing::warn!(error = %err, "program load failed");
                self.log.push(LogLevel::Error, format!("load failed: {err}"));
                return Err(err);
            }
        };
        let count = program.len();
        self.program = program;
        self.state.reset();
        self.signals = None;
        self.running = false;
        self.log.clear();
        self.log
            .push(LogLevel::Success, format!("loaded {count} instructions"));
        tracing::info!(instructions = count, "program loaded");
        Ok(count)
    }

    /// Executes the instruction at the current PC.
    ///
    /// A step past the end of the program is a logged no-op. A failing
    /// step logs the error with the PC and raw instruction text, stops run
    /// mode, and leaves architectural state untouched.
    pub fn step(&mut self) -> StepOutcome {
        let pc = self.state.pc;
        let Some(inst) = self.program.get(pc) else {
            self.log.push(LogLevel::Info, "program finished");
            return StepOutcome::Finished;
        };

        match exec::execute(inst, &self.state, &self.config) {
            Ok(effects) => {
                let taken = effects.signals.branch_taken();
                let message = if taken {
                    format!("PC={pc}: {} [taken]", inst.raw)
                } else {
                    format!("PC={pc}: {}", inst.raw)
                };
                tracing::debug!(pc, instruction = %inst.raw, "step");
                self.state.apply(&effects);
                self.signals = Some(effects.signals);
                self.log.push(LogLevel::Success, message);
                StepOutcome::Executed { pc }
            }
            Err(err) => {
                tracing::warn!(pc, instruction = %inst.raw, error = %err, "step failed");
                self.log
                    .push(LogLevel::Error, format!("PC={pc}: {}: {err}", inst.raw));
                self.running = false;
                StepOutcome::Faulted(err)
            }
        }
    }

    /// Enters run mode. The embedder then calls [`Simulator::tick`] on its
    /// timer until it reports [`RunTick::Stopped`].
    pub fn resume(&mut self) {
        self.running = true;
    }

    /// Leaves run mode. Takes effect at the next `tick`, never mid-step.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// True while run mode is active.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// One beat of run mode: steps once if running, and reports the delay
    /// to wait before the next beat. Halting, faulting, and pausing all
    /// end run mode.
    pub fn tick(&mut self) -> RunTick {
        if !self.running {
            return RunTick::Stopped;
        }
        match self.step() {
            StepOutcome::Executed { .. } => RunTick::Stepped {
                delay: Duration::from_millis(self.config.step_interval_ms),
            },
            StepOutcome::Finished | StepOutcome::Faulted(_) => {
                self.running = false;
                RunTick::Stopped
            }
        }
    }

    /// Zero-fills architectural state and clears the signal snapshot,
    /// keeping the loaded program. Idempotent.
    pub fn reset(&mut self) {
        self.state.reset();
        self.signals = None;
        self.running = false;
        self.log.push(LogLevel::Info, "system reset");
    }

    /// Current PC, in instruction units.
    pub fn pc(&self) -> usize {
        self.state.pc
    }

    /// [`Status::Halted`] once the PC is at or past the end of the
    /// program (including before any program is loaded).
    pub fn status(&self) -> Status {
        if self.state.pc >= self.program.len() {
            Status::Halted
        } else {
            Status::Ready
        }
    }

    /// Full register snapshot.
    pub fn registers(&self) -> [i32; REG_COUNT] {
        self.state.registers()
    }

    /// Reads one register.
    pub fn register(&self, idx: usize) -> i32 {
        self.state.read_register(idx)
    }

    /// Full memory snapshot.
    pub fn memory(&self) -> &[i32] {
        self.state.mem.words()
    }

    /// Control-signal snapshot of the most recent step, if any.
    pub fn signals(&self) -> Option<&SignalSnapshot> {
        self.signals.as_ref()
    }

    /// The loaded program.
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// The instruction the PC currently points at, if not halted.
    pub fn current_instruction(&self) -> Option<&asm::Instruction> {
        self.program.get(self.state.pc)
    }

    /// The execution log, oldest entry first.
    pub fn log(&self) -> &ExecutionLog {
        &self.log
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}
