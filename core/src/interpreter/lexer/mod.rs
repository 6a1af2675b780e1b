//! Lexer - turns source text into an executable `Program`
//!
//! The lexer makes a single pass over the source, one character at a time,
//! and runs an explicit state machine:
//!
//! ```text
//! Code ──/──> LineComment ──\n──> Code
//! Code ──@ (column 1)──> StringIdBegin ──digits, \n──> StringBody ──@ (column 1)──> StringEnd ──\n──> Code
//!                               └──\n (no digits)──> BlockComment ──@ (column 1)──> BlockCommentEnd ──\n──> Code
//! ```
//!
//! A `\r\n` line ending is read as a single `\n`, so CRLF sources lex the
//! same as LF ones.
//!
//! A closer candidate (`@` at the start of a line inside a string or block
//! comment) that is not followed by a newline is a false alarm: strings
//! keep the `@` and the following character, comments simply carry on.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::errors::{LexError, Position};
use super::number::{self, Number};


/// Instruction characters, in either case
const ALPHABET: &str = "dstack";

/// Opens a string literal or block comment when it starts a line
const LITERAL_OPENER: char = '@';

const LINE_COMMENT: char = '/';

/* ===================== Program ===================== */

/// A lexed program: the normalized symbol stream plus its side tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Instruction characters only, original case preserved
    pub symbols: String,

    /// Source position of every symbol, indexed by symbol offset
    pub positions: Vec<Position>,

    /// String literals keyed by id
    pub strings: BTreeMap<Number, String>,
}

impl Program {
    /// Number of symbols in the stream
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The instruction pair starting at `pos`, if there is one
    pub fn pair(&self, pos: Number) -> Option<(char, char)> {
        let pos = usize::try_from(pos).ok()?;
        let bytes = self.symbols.as_bytes();
        let first = *bytes.get(pos)?;
        let second = *bytes.get(pos.checked_add(1)?)?;
        Some((char::from(first), char::from(second)))
    }

    /// Source position of the symbol at `pos`
    pub fn position(&self, pos: Number) -> Position {
        usize::try_from(pos)
            .ok()
            .and_then(|pos| self.positions.get(pos))
            .copied()
            .unwrap_or_default()
    }

    /// String literal with the given id
    pub fn string(&self, id: Number) -> Option<&str> {
        self.strings.get(&id).map(String::as_str)
    }
}

/* ===================== Public API ===================== */

/// Lex source text into a `Program`
pub fn lex(source: &str) -> Result<Program, LexError> {
    let mut lexer = Lexer::new();
    for ch in source.chars() {
        lexer.feed(ch)?;
    }
    let program = lexer.finish()?;

    tracing::debug!(
        symbols = program.symbols.len(),
        strings = program.strings.len(),
        "lexed program"
    );

    Ok(program)
}

/// Whether a character can appear in the symbol stream
pub fn is_symbol(ch: char) -> bool {
    ch.is_ascii_digit() || ALPHABET.contains(ch.to_ascii_lowercase())
}

/* ===================== State Machine ===================== */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    StringIdBegin { opener: Position, id: Number, digits: usize },
    StringBody { opener: Position, id: Number },
    StringEnd { opener: Position, id: Number },
    BlockComment { opener: Position },
    BlockCommentEnd { opener: Position },
}

#[derive(Debug)]
struct Lexer {
    state: State,
    line: usize,
    column: usize,
    /// Text of the string literal currently being read
    literal: String,
    /// A `\r` held back until we know whether `\n` follows
    pending_cr: bool,
    program: Program,
}

impl Lexer {
    fn new() -> Self {
        Self {
            state: State::Code,
            line: 1,
            column: 0,
            literal: String::new(),
            pending_cr: false,
            program: Program::default(),
        }
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Whether the current character is the first one on its line
    fn at_line_start(&self) -> bool {
        self.column == 1
    }

    /// Take one source character, folding `\r\n` into `\n`
    fn feed(&mut self, ch: char) -> Result<(), LexError> {
        if std::mem::take(&mut self.pending_cr) && ch != '\n' {
            self.advance('\r')?;
        }
        if ch == '\r' {
            self.pending_cr = true;
            return Ok(());
        }
        self.advance(ch)
    }

    /// Advance the cursor over one character and run one transition
    fn advance(&mut self, ch: char) -> Result<(), LexError> {
        self.column += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        }

        self.state = match self.state {
            State::Code => self.code(ch)?,
            State::LineComment => self.line_comment(ch),
            State::StringIdBegin { opener, id, digits } => {
                self.string_id_begin(ch, opener, id, digits)?
            }
            State::StringBody { opener, id } => self.string_body(ch, opener, id),
            State::StringEnd { opener, id } => self.string_end(ch, opener, id),
            State::BlockComment { opener } => self.block_comment(ch, opener),
            State::BlockCommentEnd { opener } => self.block_comment_end(ch, opener),
        };
        Ok(())
    }

    /// Handle end of input
    fn finish(mut self) -> Result<Program, LexError> {
        if std::mem::take(&mut self.pending_cr) {
            self.advance('\r')?;
        }
        match self.state {
            State::Code | State::LineComment | State::BlockCommentEnd { .. } => {}
            State::StringEnd { id, .. } => self.close_string(id),
            State::StringIdBegin { opener, id, digits } => {
                return Err(if digits == 0 {
                    LexError::UnterminatedComment { position: opener }
                } else {
                    LexError::UnterminatedString { id, position: opener }
                });
            }
            State::StringBody { opener, id } => {
                return Err(LexError::UnterminatedString { id, position: opener });
            }
            State::BlockComment { opener } => {
                return Err(LexError::UnterminatedComment { position: opener });
            }
        }
        Ok(self.program)
    }

    /* ===================== Transitions ===================== */

    fn code(&mut self, ch: char) -> Result<State, LexError> {
        match ch {
            ' ' | '\t' | '\r' | '\n' => Ok(State::Code),
            LINE_COMMENT => Ok(State::LineComment),
            LITERAL_OPENER if self.at_line_start() => Ok(State::StringIdBegin {
                opener: self.position(),
                id: 0,
                digits: 0,
            }),
            _ if is_symbol(ch) => {
                self.program.symbols.push(ch);
                self.program.positions.push(self.position());
                Ok(State::Code)
            }
            _ => Err(LexError::InvalidCharacter {
                found: ch,
                position: self.position(),
            }),
        }
    }

    fn line_comment(&mut self, ch: char) -> State {
        if ch == '\n' {
            State::Code
        } else {
            State::LineComment
        }
    }

    fn string_id_begin(
        &mut self,
        ch: char,
        opener: Position,
        id: Number,
        digits: usize,
    ) -> Result<State, LexError> {
        match ch {
            '\n' if digits == 0 => Ok(State::BlockComment { opener }),
            '\n' => {
                self.literal.clear();
                Ok(State::StringBody { opener, id })
            }
            _ if ch.is_ascii_digit() => Ok(State::StringIdBegin {
                opener,
                id: number::concat(ch, id),
                digits: digits + 1,
            }),
            _ => Err(LexError::InvalidStringId {
                found: ch,
                position: self.position(),
            }),
        }
    }

    fn string_body(&mut self, ch: char, opener: Position, id: Number) -> State {
        if ch == LITERAL_OPENER && self.at_line_start() {
            return State::StringEnd { opener, id };
        }
        self.literal.push(ch);
        State::StringBody { opener, id }
    }

    fn string_end(&mut self, ch: char, opener: Position, id: Number) -> State {
        if ch == '\n' {
            self.close_string(id);
            return State::Code;
        }
        self.literal.push(LITERAL_OPENER);
        self.literal.push(ch);
        State::StringBody { opener, id }
    }

    fn block_comment(&mut self, ch: char, opener: Position) -> State {
        if ch == LITERAL_OPENER && self.at_line_start() {
            State::BlockCommentEnd { opener }
        } else {
            State::BlockComment { opener }
        }
    }

    fn block_comment_end(&mut self, ch: char, opener: Position) -> State {
        if ch == '\n' {
            State::Code
        } else {
            State::BlockComment { opener }
        }
    }

    /// Store the finished literal, minus the newline that preceded the closer
    fn close_string(&mut self, id: Number) {
        let mut text = std::mem::take(&mut self.literal);
        if text.ends_with('\n') {
            text.pop();
        }
        self.program.strings.insert(id, text);
    }
}
