use rvstep_core::asm::{Instruction, SourceLine, parser};
use rvstep_core::{Config, Policy, Simulator, StepOutcome};

/// Upper bound on steps in [`TestContext::run_to_halt`], so a wrong branch
/// offset shows up as a test failure instead of a hang.
const STEP_LIMIT: usize = 10_000;

pub struct TestContext {
    pub sim: Simulator,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// A context using the permissive operand/address policy.
    pub fn permissive() -> Self {
        Self::with_config(Config {
            policy: Policy::Permissive,
            ..Config::default()
        })
    }

    pub fn with_config(config: Config) -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        Self {
            sim: Simulator::new(config),
        }
    }

    /// Assemble and install `source`, panicking on load errors.
    pub fn load(mut self, source: &str) -> Self {
        if let Err(e) = self.sim.load(source) {
            panic!("program should load: {e}");
        }
        self
    }

    /// Execute exactly `n` instructions, panicking if any step does not
    /// execute normally.
    pub fn step_n(&mut self, n: usize) {
        for i in 0..n {
            match self.sim.step() {
                StepOutcome::Executed { .. } => {}
                other => panic!("step {i} did not execute: {other:?}"),
            }
        }
    }

    /// Run until the program falls off the end, panicking on faults.
    pub fn run_to_halt(&mut self) {
        for _ in 0..STEP_LIMIT {
            match self.sim.step() {
                StepOutcome::Executed { .. } => {}
                StepOutcome::Finished => return,
                StepOutcome::Faulted(e) => panic!("step faulted: {e}"),
            }
        }
        panic!("program did not halt within {STEP_LIMIT} steps");
    }

    /// Read a general-purpose register value.
    pub fn reg(&self, idx: usize) -> i32 {
        self.sim.register(idx)
    }

    /// Read a data-memory word.
    pub fn mem(&self, idx: usize) -> i32 {
        self.sim.memory()[idx]
    }
}

/// Parse a single instruction line, for tests that drive the executor
/// directly rather than through the simulator.
pub fn inst(text: &str) -> Instruction {
    match parser::parse_line(text) {
        Some(SourceLine::Instruction(inst)) => inst,
        other => panic!("expected an instruction from {text:?}, got {other:?}"),
    }
}
