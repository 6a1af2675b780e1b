pub mod cli;
pub mod config;
pub mod error;
pub mod interpreter;

pub use config::Config;
pub use error::{Error, ExitStatus};
pub use interpreter::{lex, LexError, Position, Program, RuntimeError, Vm};
