//! Tests for string literal instructions

use super::helpers::{output, run, stack_a, stack_b};

#[test]
fn test_print_string() {
    let vm = run("@1\nHi\n@\nk1as");
    assert_eq!(output(&vm), "Hi");
}

#[test]
fn test_hello_world() {
    // Register starts at 0, so `as` prints string 0 straight away
    let vm = run("@0\nHello, World!\n@\nas");
    assert_eq!(output(&vm), "Hello, World!");
}

#[test]
fn test_multiline_string() {
    let vm = run("@0\nline one\nline two\n@\nas");
    assert_eq!(output(&vm), "line one\nline two");
}

#[test]
fn test_unknown_string_id_prints_nothing() {
    let vm = run("@1\nHi\n@\nk2as");
    assert_eq!(output(&vm), "");
    assert_eq!(stack_a(&vm), vec![0]);
}

#[test]
fn test_push_string() {
    let vm = run("@1\nHi\n@\nk1ad");
    assert_eq!(stack_a(&vm), vec![0, 72, 105]);
    assert_eq!(stack_b(&vm), vec![0]);
}

#[test]
fn test_push_reversed_string_onto_stack_b() {
    // Uppercase D: reversed variant, and stack B is primary
    let vm = run("@1\nHi\n@\nk1aD");
    assert_eq!(stack_a(&vm), vec![0]);
    assert_eq!(stack_b(&vm), vec![0, 105, 72]);
}

#[test]
fn test_push_unknown_string_is_noop() {
    let vm = run("k9ad");
    assert_eq!(stack_a(&vm), vec![0]);
}

#[test]
fn test_interpolate_numbers() {
    // A = [0, 7], B = [0, 3]; uppercase T makes B primary: # = 3, $ = 7
    let vm = run("@1\n#-$\n@\nsd7ddsd3dDsd1aT");
    assert_eq!(output(&vm), "3-7");
}

#[test]
fn test_interpolate_characters() {
    let vm = run("@4\n#$!\n@\nsd72ddsd105dDsd4at");
    assert_eq!(output(&vm), "Hi!");
}

#[test]
fn test_interpolate_unknown_id_prints_nothing() {
    let vm = run("sd7ddsd3dDsd1aT");
    assert_eq!(output(&vm), "");
}
