//! Lexical and runtime error types

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A location in the original source text (both 1-based)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Errors detected while lexing, before anything runs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("Invalid character in {position}")]
    InvalidCharacter { found: char, position: Position },

    #[error("Invalid character in string id in {position}")]
    InvalidStringId { found: char, position: Position },

    /// `position` is the opening `@`
    #[error("Unterminated string in {position}")]
    UnterminatedString { id: u64, position: Position },

    /// `position` is the opening `@`
    #[error("Unterminated comment in {position}")]
    UnterminatedComment { position: Position },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::InvalidCharacter { position, .. }
            | LexError::InvalidStringId { position, .. }
            | LexError::UnterminatedString { position, .. }
            | LexError::UnterminatedComment { position } => *position,
        }
    }
}

/// Errors that abort a running program
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Division by zero in {position}")]
    DivisionByZero { position: Position },

    #[error("Division by zero (remainder operation) in {position}")]
    RemainderByZero { position: Position },

    #[error("Unknown instruction ({pair}) in {position}")]
    UnknownInstruction { pair: String, position: Position },

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl RuntimeError {
    /// Source position of the failing instruction, if it has one
    pub fn position(&self) -> Option<Position> {
        match self {
            RuntimeError::DivisionByZero { position }
            | RuntimeError::RemainderByZero { position }
            | RuntimeError::UnknownInstruction { position, .. } => Some(*position),
            RuntimeError::Io(_) => None,
        }
    }
}
