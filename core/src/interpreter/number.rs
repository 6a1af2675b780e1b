//! Value type and conversions
//!
//! Every value the VM touches (stack slots, the register, the program
//! counter) is a `Number`. This module converts numbers to the text and
//! bytes that print instructions emit, and parses numbers and characters
//! from an input stream.

use std::io::BufRead;

/// The VM's only value type
pub type Number = u64;

/* ===================== Rendering ===================== */

/// Character form of a number: the low byte
pub fn to_char(number: Number) -> u8 {
    (number % 256) as u8
}

/// Decimal text form of a number
pub fn to_text(number: Number) -> String {
    number.to_string()
}

/// Whether the character form of a number is printable ASCII
pub fn is_printable(number: Number) -> bool {
    (32..=126).contains(&to_char(number))
}

/// Append a decimal digit to a number (`number * 10 + digit`)
///
/// Overflow wraps, like every other arithmetic operation on `Number`.
pub fn concat(digit: char, number: Number) -> Number {
    let value = digit.to_digit(10).unwrap_or(0) as Number;
    number.wrapping_mul(10).wrapping_add(value)
}

/// Wrapping exponentiation with a full 64-bit exponent
pub fn pow(mut base: Number, mut exponent: Number) -> Number {
    let mut result: Number = 1;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result.wrapping_mul(base);
        }
        base = base.wrapping_mul(base);
        exponent >>= 1;
    }
    result
}

/* ===================== Parsing ===================== */

/// Parse the leading integer of a line
///
/// Leading whitespace and a single sign are accepted, anything after the
/// digits is ignored. A negative value wraps (`-5` reads as `2^64 - 5`).
/// Returns `None` when the line has no digits or the magnitude does not
/// fit in a `Number`.
pub fn parse_number(line: &str) -> Option<Number> {
    let trimmed = line.trim_start();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let value: Number = unsigned[..end].parse().ok()?;
    Some(if negative { value.wrapping_neg() } else { value })
}

/// Read lines until one starts with a number
///
/// Returns `None` once the stream is exhausted (or fails) before a number
/// was read.
pub fn read_number<R: BufRead>(stream: &mut R) -> Option<Number> {
    let mut line = String::new();
    loop {
        line.clear();
        match stream.read_line(&mut line) {
            Ok(0) | Err(_) => return None,
            Ok(_) => {
                if let Some(number) = parse_number(&line) {
                    return Some(number);
                }
            }
        }
    }
}

/// Read a single byte
///
/// Returns `None` once the stream is exhausted (or fails).
pub fn read_char<R: BufRead>(stream: &mut R) -> Option<Number> {
    let byte = {
        let buffer = stream.fill_buf().ok()?;
        *buffer.first()?
    };
    stream.consume(1);
    Some(Number::from(byte))
}
