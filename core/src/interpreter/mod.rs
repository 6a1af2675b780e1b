//! Interpreter for dstack programs
//!
//! Source text goes through `lexer::lex` to become a `Program`, which an
//! `executor::Vm` then runs.

pub mod errors;
pub mod executor;
pub mod lexer;
pub mod number;

pub use errors::{LexError, Position, RuntimeError};
pub use executor::{Opcode, Status, Tracer, Vm};
pub use lexer::{lex, Program};
pub use number::Number;
