//! Opcode decoding
//!
//! An instruction is a pair of adjacent symbols. `decode` turns a
//! lowercased pair plus the alternate flag (second symbol was uppercase)
//! into an `Opcode`.

use std::fmt;

/// Every instruction the VM knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Accumulate the second symbol into the register
    Digit,
    /// Pair not covered by the table
    Error,
    NoOp,

    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,

    Zero,

    Equal,
    Unequal,
    Greater,
    GreaterOrEqual,
    Not,
    And,
    Or,
    Xor,

    Random,
    Min,
    Max,

    Push,
    Send,
    Peek,
    Pop,
    PushString,
    PushReversedString,

    Save,
    Jump,
    Reset,
    Halt,

    PrintNumber,
    PrintChar,
    PrintString,
    PrintInterpolatedNumber,
    PrintInterpolatedChar,
    ReadNumber,
    ReadChar,
}

impl Opcode {
    /// Human-readable name used by the debug tracer
    pub fn name(self) -> &'static str {
        match self {
            Opcode::Digit => "Digit",
            Opcode::Error => "Error",
            Opcode::NoOp => "None",

            Opcode::Add => "Add",
            Opcode::Sub => "Subtract",
            Opcode::Mul => "Multiply",
            Opcode::Div => "Divide",
            Opcode::Rem => "Remainder",
            Opcode::Pow => "Power",

            Opcode::Zero => "Zero",

            Opcode::Equal => "Equal",
            Opcode::Unequal => "Unequal",
            Opcode::Greater => "Greater",
            Opcode::GreaterOrEqual => "Greater Or Equal",
            Opcode::Not => "Not",
            Opcode::And => "And",
            Opcode::Or => "Or",
            Opcode::Xor => "Xor",

            Opcode::Random => "Random",
            Opcode::Min => "Minimum",
            Opcode::Max => "Maximum",

            Opcode::Push => "Push",
            Opcode::Send => "Send",
            Opcode::Peek => "Peek",
            Opcode::Pop => "Pop",
            Opcode::PushString => "Push String",
            Opcode::PushReversedString => "Push Reversed String",

            Opcode::Save => "Save",
            Opcode::Jump => "Jump",
            Opcode::Reset => "Reset",
            Opcode::Halt => "Halt",

            Opcode::PrintNumber => "Print Number",
            Opcode::PrintChar => "Print Character",
            Opcode::PrintString => "Print String",
            Opcode::PrintInterpolatedNumber => "Print String Interpolated (Number)",
            Opcode::PrintInterpolatedChar => "Print String Interpolated (Character)",
            Opcode::ReadNumber => "Read Number",
            Opcode::ReadChar => "Read Character",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lowercase an ASCII letter, reporting whether it was uppercase
pub fn fold_case(ch: char) -> (char, bool) {
    (ch.to_ascii_lowercase(), ch.is_ascii_uppercase())
}

/// Decode a lowercased instruction pair
///
/// `alt` picks the alternate variant for the pairs that have one.
pub fn decode(first: char, second: char, alt: bool) -> Opcode {
    if second.is_ascii_digit() {
        return Opcode::Digit;
    }
    if first.is_ascii_digit() {
        return Opcode::NoOp;
    }
    if first == second {
        return Opcode::Push;
    }

    let pick = |plain: Opcode, alternate: Opcode| if alt { alternate } else { plain };

    match (first, second) {
        ('d', 's') => pick(Opcode::Add, Opcode::Mul),
        ('d', 't') => Opcode::Sub,
        ('d', 'a') => Opcode::Pow,
        ('d', 'c') => Opcode::Div,
        ('d', 'k') => Opcode::Rem,

        // Zero has no alternate form
        ('s', 'd') => Opcode::Zero,
        ('s', 't') => pick(Opcode::Equal, Opcode::Unequal),
        ('s', 'a') => Opcode::Xor,
        ('s', 'c') => Opcode::Greater,
        ('s', 'k') => Opcode::GreaterOrEqual,

        ('t', 'd') => Opcode::Not,
        ('t', 's') => pick(Opcode::Or, Opcode::And),
        ('t', 'c') => Opcode::Peek,
        ('t', 'k') => pick(Opcode::Min, Opcode::Max),

        ('a', 'd') => pick(Opcode::PushString, Opcode::PushReversedString),
        ('a', 's') => Opcode::PrintString,
        ('a', 't') => pick(Opcode::PrintInterpolatedChar, Opcode::PrintInterpolatedNumber),
        ('a', 'c') => Opcode::Reset,
        ('a', 'k') => Opcode::Halt,

        ('c', 'd') => Opcode::Send,
        ('c', 's') => Opcode::Pop,
        ('c', 't') => Opcode::Random,
        ('c', 'k') => pick(Opcode::PrintChar, Opcode::PrintNumber),

        ('k', 'd') => Opcode::NoOp,
        ('k', 's') => Opcode::Save,
        ('k', 't') => Opcode::Jump,
        ('k', 'c') => pick(Opcode::ReadChar, Opcode::ReadNumber),

        _ => Opcode::Error,
    }
}
