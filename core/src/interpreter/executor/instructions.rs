//! Instruction handlers
//!
//! `execute` runs one decoded opcode against the VM. The alternate flag
//! picks which stack is primary for the step; every handler reads its
//! operands through that choice.

use std::io::{BufRead, Write};

use rand::Rng;

use super::super::errors::RuntimeError;
use super::super::number::{self, Number};
use super::opcode::Opcode;
use super::vm::Vm;

/// What the loop should do with the program counter afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Move on to the next pair
    Advance,
    /// The instruction already set the program counter
    Redirect,
}

/// Execute one instruction
///
/// `raw` is the pair as it appears in the source (original case).
pub fn execute<R: BufRead, W: Write>(
    vm: &mut Vm<R, W>,
    opcode: Opcode,
    raw: (char, char),
    alt: bool,
) -> Result<Flow, RuntimeError> {
    let (p, s) = vm.state.tops(alt);
    let register = vm.state.register;

    match opcode {
        Opcode::Digit => vm.state.register = number::concat(raw.1, register),
        Opcode::Error => {
            return Err(RuntimeError::UnknownInstruction {
                pair: format!("{}{}", raw.0, raw.1),
                position: vm.program.position(vm.state.pos),
            });
        }
        Opcode::NoOp => {}

        Opcode::Add => vm.state.register = p.wrapping_add(s),
        Opcode::Sub => vm.state.register = p.wrapping_sub(s),
        Opcode::Mul => vm.state.register = p.wrapping_mul(s),
        Opcode::Pow => vm.state.register = number::pow(p, s),
        Opcode::Div => {
            if s == 0 {
                return Err(RuntimeError::DivisionByZero {
                    position: vm.program.position(vm.state.pos),
                });
            }
            vm.state.register = p / s;
        }
        Opcode::Rem => {
            if s == 0 {
                return Err(RuntimeError::RemainderByZero {
                    position: vm.program.position(vm.state.pos),
                });
            }
            vm.state.register = p % s;
        }

        Opcode::Zero => vm.state.register = 0,

        Opcode::Equal => vm.state.register = Number::from(p == s),
        Opcode::Unequal => vm.state.register = Number::from(p != s),
        Opcode::Greater => vm.state.register = Number::from(p > s),
        Opcode::GreaterOrEqual => vm.state.register = Number::from(p >= s),
        Opcode::Not => vm.state.register = Number::from(p == 0),
        Opcode::And => vm.state.register = Number::from(p != 0 && s != 0),
        Opcode::Or => vm.state.register = Number::from(p != 0 || s != 0),
        Opcode::Xor => vm.state.register = Number::from((p != 0) != (s != 0)),

        Opcode::Random => {
            if p <= s {
                vm.state.register = vm.rng.gen_range(p..=s);
            }
        }
        Opcode::Min => vm.state.register = p.min(s),
        Opcode::Max => vm.state.register = p.max(s),

        Opcode::Push => vm.state.stacks_mut(alt).0.push(register),
        Opcode::Send => {
            let (primary, secondary) = vm.state.stacks_mut(alt);
            secondary.push(primary.pop());
        }
        Opcode::Peek => vm.state.register = p,
        Opcode::Pop => {
            vm.state.stacks_mut(alt).0.pop();
        }
        Opcode::PushString | Opcode::PushReversedString => {
            if let Some(text) = vm.program.strings.get(&register) {
                let primary = if alt {
                    &mut vm.state.stack_b
                } else {
                    &mut vm.state.stack_a
                };
                let bytes = text.bytes().map(Number::from);
                if opcode == Opcode::PushString {
                    bytes.for_each(|b| primary.push(b));
                } else {
                    bytes.rev().for_each(|b| primary.push(b));
                }
            }
        }

        Opcode::Save => {
            let address = vm.state.pos.wrapping_add(1);
            vm.state.stacks_mut(alt).0.push(address);
        }
        Opcode::Jump => {
            if register != 0 {
                vm.state.pos = p;
                return Ok(Flow::Redirect);
            }
        }
        Opcode::Reset => {
            if register != 0 {
                vm.reset();
                return Ok(Flow::Redirect);
            }
        }
        Opcode::Halt => {
            if register != 0 {
                // Past any program; the next fetch sees end of program
                vm.state.pos = Number::MAX;
                return Ok(Flow::Redirect);
            }
        }

        Opcode::PrintNumber => vm.emit(number::to_text(register).as_bytes())?,
        Opcode::PrintChar => vm.emit(&[number::to_char(register)])?,
        Opcode::PrintString => {
            if let Some(text) = vm.program.string(register) {
                let bytes = text.as_bytes().to_vec();
                vm.emit(&bytes)?;
            }
        }
        Opcode::PrintInterpolatedNumber => {
            if let Some(text) = vm.program.string(register) {
                let bytes = interpolate(text, p, s, |n| number::to_text(n).into_bytes());
                vm.emit(&bytes)?;
            }
        }
        Opcode::PrintInterpolatedChar => {
            if let Some(text) = vm.program.string(register) {
                let bytes = interpolate(text, p, s, |n| vec![number::to_char(n)]);
                vm.emit(&bytes)?;
            }
        }
        Opcode::ReadNumber => vm.state.register = read_input(vm, number::read_number)?,
        Opcode::ReadChar => vm.state.register = read_input(vm, number::read_char)?,
    }

    Ok(Flow::Advance)
}

/// Replace `#` with the primary top and `$` with the secondary top
fn interpolate(
    text: &str,
    primary: Number,
    secondary: Number,
    render: impl Fn(Number) -> Vec<u8>,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for byte in text.bytes() {
        match byte {
            b'#' => out.extend(render(primary)),
            b'$' => out.extend(render(secondary)),
            _ => out.push(byte),
        }
    }
    out
}

/// Read from the input sink, yielding 0 once it is exhausted
fn read_input<R: BufRead, W: Write>(
    vm: &mut Vm<R, W>,
    read: impl FnOnce(&mut R) -> Option<Number>,
) -> Result<Number, RuntimeError> {
    // Prompts printed so far should be visible before blocking
    vm.output.flush()?;

    if vm.input_exhausted {
        return Ok(0);
    }
    match read(&mut vm.input) {
        Some(value) => Ok(value),
        None => {
            tracing::debug!("input exhausted");
            vm.input_exhausted = true;
            Ok(0)
        }
    }
}
