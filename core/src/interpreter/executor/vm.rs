//! Virtual Machine state
//!
//! The VM holds all execution state:
//! - two stacks (A and B) and the register
//! - the program counter over the lexed symbol stream
//! - the input/output sinks and the optional tracer

use std::io::{BufRead, Write};

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::super::errors::{Position, RuntimeError};
use super::super::lexer::Program;
use super::super::number::Number;
use super::exec_loop;
use super::trace::Tracer;

/* ===================== Stack ===================== */

/// A value stack that is never empty
///
/// Popping the last value puts a zero back, so `top` is always defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack(Vec<Number>);

impl Stack {
    pub fn new() -> Self {
        Stack(vec![0])
    }

    pub fn top(&self) -> Number {
        self.0.last().copied().unwrap_or(0)
    }

    pub fn push(&mut self, value: Number) {
        self.0.push(value);
    }

    /// Remove and return the top value, re-padding with zero
    pub fn pop(&mut self) -> Number {
        let value = self.0.pop().unwrap_or(0);
        if self.0.is_empty() {
            self.0.push(0);
        }
        value
    }

    /// Values from bottom to top
    pub fn values(&self) -> &[Number] {
        &self.0
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

/* ===================== Machine State ===================== */

/// Everything the Reset instruction restores
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub stack_a: Stack,
    pub stack_b: Stack,
    pub register: Number,
    /// Offset of the current pair in the symbol stream
    pub pos: Number,
}

impl State {
    pub fn new() -> Self {
        Self {
            stack_a: Stack::new(),
            stack_b: Stack::new(),
            register: 0,
            pos: 0,
        }
    }

    /// (primary, secondary) for a step; alternate steps swap them
    pub fn stacks_mut(&mut self, alt: bool) -> (&mut Stack, &mut Stack) {
        if alt {
            (&mut self.stack_b, &mut self.stack_a)
        } else {
            (&mut self.stack_a, &mut self.stack_b)
        }
    }

    /// Tops of (primary, secondary)
    pub fn tops(&self, alt: bool) -> (Number, Number) {
        if alt {
            (self.stack_b.top(), self.stack_a.top())
        } else {
            (self.stack_a.top(), self.stack_b.top())
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/* ===================== Status ===================== */

/// Where a run stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Normal,
    EndOfProgram,
    FatalError {
        message: String,
        position: Option<Position>,
    },
}

/// Result of executing one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Continue to next step
    Continue,
    /// Execution complete
    Done,
}

/* ===================== VM ===================== */

/// Virtual Machine
///
/// Generic over its input and output so the same engine runs against
/// stdin/stdout and against in-memory buffers.
#[derive(Debug)]
pub struct Vm<R, W> {
    pub state: State,
    pub status: Status,
    pub(super) program: Program,
    pub(super) input: R,
    pub(super) output: W,
    /// Set once a read hits end of input; later reads yield 0 without blocking
    pub(super) input_exhausted: bool,
    /// Print output held back while tracing
    pub(super) debug_output: Vec<u8>,
    pub(super) tracer: Option<Tracer>,
    pub(super) rng: StdRng,
    pub(super) steps: u64,
}

impl<R: BufRead, W: Write> Vm<R, W> {
    /// Create a VM for a lexed program, seeding Random from the clock
    pub fn new(program: Program, input: R, output: W) -> Self {
        let seed = chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_default() as u64;

        tracing::debug!(symbols = program.len(), seed, "created vm");

        Vm {
            state: State::new(),
            status: Status::Normal,
            program,
            input,
            output,
            input_exhausted: false,
            debug_output: Vec::new(),
            tracer: None,
            rng: StdRng::seed_from_u64(seed),
            steps: 0,
        }
    }

    /// Trace every step to the output sink
    pub fn with_tracer(mut self, tracer: Tracer) -> Self {
        self.tracer = Some(tracer);
        self
    }

    /// Replace the clock seed with a fixed one
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Run until end of program or a fatal error
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        exec_loop::run_until_done(self)
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Print output buffered while tracing
    pub fn debug_output(&self) -> &[u8] {
        &self.debug_output
    }

    /// Number of instructions executed so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Send print output to the sink, or to the debug buffer while tracing
    pub(super) fn emit(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        if self.tracer.is_some() {
            self.debug_output.extend_from_slice(bytes);
            Ok(())
        } else {
            self.output.write_all(bytes)
        }
    }

    /// Restore the initial state (the Reset instruction)
    pub(super) fn reset(&mut self) {
        self.state = State::new();
        self.input_exhausted = false;
        self.debug_output.clear();
    }
}
