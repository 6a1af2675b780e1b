//! Top-level error type
//!
//! Wraps every way a run can fail and maps each one to the process exit
//! status the `dstack` binary reports.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use thiserror::Error;

use crate::interpreter::{LexError, RuntimeError};

/// Process exit status of the `dstack` binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    FileNotOpen = 1,
    LexError = 2,
    RuntimeError = 3,
    ConfigError = 4,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("The file could not be opened")]
    FileNotOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl Error {
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            Error::FileNotOpen { .. } => ExitStatus::FileNotOpen,
            Error::Lex(_) => ExitStatus::LexError,
            Error::Runtime(_) => ExitStatus::RuntimeError,
            Error::Config(_) => ExitStatus::ConfigError,
        }
    }
}
