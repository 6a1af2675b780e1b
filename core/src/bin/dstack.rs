//! dstack interpreter
//!
//! Runs one source file: `dstack [-d] file`.
use std::process::ExitCode;

use dstack_core::cli;

fn main() -> ExitCode {
    cli::run_cli().into()
}
