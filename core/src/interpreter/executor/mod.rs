//! # Executor - pair-decoding stack machine
//!
//! ## Core Principles
//!
//! 1. **Explicit state**: stacks, register and program counter live in one `Vm`
//! 2. **Overlapping pairs**: every step reads the pair `(pos, pos + 1)` and
//!    then advances by a single symbol
//! 3. **Closed dispatch**: `decode` yields an `Opcode`, `execute` matches on it
//! 4. **Strict failures**: division by zero and unknown pairs abort the run;
//!    unknown string ids and empty random ranges do nothing

pub mod exec_loop;
pub mod instructions;
pub mod opcode;
pub mod trace;
pub mod vm;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use exec_loop::{run_until_done, step};
pub use opcode::{decode, Opcode};
pub use trace::Tracer;
pub use vm::{Stack, State, Status, Step, Vm};
