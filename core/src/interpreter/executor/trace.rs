//! Debug tracer
//!
//! Renders the VM state before each step and the decoded instruction after
//! each fetch. Print instructions are buffered while tracing, so the
//! accumulated output is shown with every state dump.

use std::io::{self, Write};

use super::super::number::{self, Number};
use super::opcode::Opcode;
use super::vm::{Stack, State};

pub const DEFAULT_RULE_WIDTH: usize = 79;

/// Writes human-readable step traces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tracer {
    rule_width: usize,
}

impl Tracer {
    pub fn new(rule_width: usize) -> Self {
        Self { rule_width }
    }

    /// Stacks, register and buffered output
    pub fn state<W: Write>(&self, out: &mut W, state: &State, buffered: &[u8]) -> io::Result<()> {
        write!(out, "stack 1:")?;
        write_stack(out, &state.stack_a)?;
        write!(out, "stack 2:")?;
        write_stack(out, &state.stack_b)?;

        write!(out, "register:")?;
        write_number(out, state.register)?;
        writeln!(out)?;

        if !buffered.is_empty() {
            write!(out, "output: ")?;
            out.write_all(buffered)?;
            writeln!(out)?;
        }

        self.rule(out)
    }

    /// Decoded instruction, its source text and the current position
    pub fn instruction<W: Write>(
        &self,
        out: &mut W,
        opcode: Opcode,
        raw: (char, char),
        alt: bool,
        pos: Number,
    ) -> io::Result<()> {
        write!(out, "instruction: {} ({}{})", opcode, raw.0, raw.1)?;
        if alt {
            write!(out, " stacks swapped")?;
        }
        writeln!(out)?;
        writeln!(out, "position: {}", pos)?;
        self.rule(out)
    }

    fn rule<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", "-".repeat(self.rule_width))
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::new(DEFAULT_RULE_WIDTH)
    }
}

/// ` 72 (H)` - the character form only when printable
fn write_number<W: Write>(out: &mut W, value: Number) -> io::Result<()> {
    write!(out, " {}", value)?;
    if number::is_printable(value) {
        write!(out, " ({})", char::from(number::to_char(value)))?;
    }
    Ok(())
}

fn write_stack<W: Write>(out: &mut W, stack: &Stack) -> io::Result<()> {
    for (i, value) in stack.values().iter().enumerate() {
        if i > 0 {
            write!(out, ",")?;
        }
        write_number(out, *value)?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).expect("Write to Vec failed");
        String::from_utf8(out).expect("Trace should be UTF-8")
    }

    #[test]
    fn test_state_dump() {
        let mut state = State::new();
        state.stack_a.push(72);
        state.stack_a.push(5);
        state.register = 105;

        let text = render(|out| Tracer::new(5).state(out, &state, b""));
        assert_eq!(
            text,
            "stack 1: 0, 72 (H), 5\nstack 2: 0\nregister: 105 (i)\n-----\n"
        );
    }

    #[test]
    fn test_state_dump_shows_buffered_output() {
        let state = State::new();
        let text = render(|out| Tracer::new(3).state(out, &state, b"Hi"));
        assert_eq!(
            text,
            "stack 1: 0\nstack 2: 0\nregister: 0\noutput: Hi\n---\n"
        );
    }

    #[test]
    fn test_instruction_dump() {
        let text = render(|out| {
            Tracer::new(3).instruction(out, Opcode::Push, ('d', 'd'), false, 4)
        });
        assert_eq!(text, "instruction: Push (dd)\nposition: 4\n---\n");
    }

    #[test]
    fn test_instruction_dump_swapped() {
        let text = render(|out| {
            Tracer::new(3).instruction(out, Opcode::Add, ('d', 'S'), true, 0)
        });
        assert_eq!(
            text,
            "instruction: Add (dS) stacks swapped\nposition: 0\n---\n"
        );
    }

    #[test]
    fn test_default_rule_width() {
        let text = render(|out| Tracer::default().rule(out));
        assert_eq!(text.trim_end().len(), DEFAULT_RULE_WIDTH);
    }
}
