//! Tests for digit accumulation and arithmetic
//!
//! Most programs follow one shape: `sd<a>dd` puts `a` on stack A, `sd<b>dD`
//! puts `b` on stack B, and the final pair applies the operator.

use super::helpers::{run, stack_a, stack_b};

#[test]
fn test_digits_accumulate_left_to_right() {
    let vm = run("k123");
    assert_eq!(vm.state.register, 123);
    assert_eq!(stack_a(&vm), vec![0]);
    assert_eq!(stack_b(&vm), vec![0]);
}

#[test]
fn test_digits_extend_existing_register() {
    // k4 then (4,5): 4 -> 45
    let vm = run("k45");
    assert_eq!(vm.state.register, 45);
}

#[test]
fn test_operands_setup() {
    let vm = run("sd3ddsd7dD");
    assert_eq!(stack_a(&vm), vec![0, 3]);
    assert_eq!(stack_b(&vm), vec![0, 7]);
}

#[test]
fn test_add() {
    let vm = run("sd3ddsd7dDs");
    assert_eq!(vm.state.register, 10);
}

#[test]
fn test_subtract() {
    let vm = run("sd9ddsd4dDt");
    assert_eq!(vm.state.register, 5);
}

#[test]
fn test_subtract_swapped_operands() {
    // Uppercase T: primary is stack B, so 9 - 4
    let vm = run("sd4ddsd9dDT");
    assert_eq!(vm.state.register, 5);
}

#[test]
fn test_subtract_wraps() {
    let vm = run("sd3ddsd4dDt");
    assert_eq!(vm.state.register, u64::MAX);
}

#[test]
fn test_multiply_is_alternate_of_add() {
    let vm = run("sd6ddsd7dDS");
    assert_eq!(vm.state.register, 42);
}

#[test]
fn test_divide() {
    let vm = run("sd20ddsd4dDc");
    assert_eq!(vm.state.register, 5);
}

#[test]
fn test_remainder() {
    let vm = run("sd20ddsd6dDk");
    assert_eq!(vm.state.register, 2);
}

#[test]
fn test_power() {
    let vm = run("sd2ddsd10dDa");
    assert_eq!(vm.state.register, 1024);
}

#[test]
fn test_zero_ignores_alternate() {
    let vm = run("k7sD");
    assert_eq!(vm.state.register, 0);
    assert_eq!(stack_a(&vm), vec![0]);
    assert_eq!(stack_b(&vm), vec![0]);
}
