//! Tests for fatal runtime errors
//!
//! Errors abort the run at once and carry the source position of the
//! failing pair.

use super::helpers::{output, run_err, stack_a, stack_b};
use crate::interpreter::errors::{Position, RuntimeError};
use crate::interpreter::executor::{step, Status, Step};

#[test]
fn test_division_by_zero() {
    let (vm, err) = run_err("sd5ddc");
    let RuntimeError::DivisionByZero { position } = err else {
        unreachable!("Expected DivisionByZero, got {:?}", err);
    };
    assert_eq!(position, Position::new(1, 5));
    // Register keeps its value
    assert_eq!(vm.state.register, 5);
    assert_eq!(
        vm.status,
        Status::FatalError {
            message: "Division by zero in 1:5".to_string(),
            position: Some(Position::new(1, 5)),
        }
    );
}

#[test]
fn test_remainder_by_zero() {
    let (vm, err) = run_err("sd5ddk");
    assert!(matches!(err, RuntimeError::RemainderByZero { .. }));
    assert_eq!(
        err.to_string(),
        "Division by zero (remainder operation) in 1:5"
    );
    assert_eq!(vm.state.register, 5);
}

#[test]
fn test_error_position_follows_source_lines() {
    let (_, err) = run_err("sd5\n dd\n  c");
    assert_eq!(err.position(), Some(Position::new(2, 3)));
}

#[test]
fn test_unknown_instruction() {
    let (_, err) = run_err("kdta");
    let RuntimeError::UnknownInstruction { pair, position } = err else {
        unreachable!("Expected UnknownInstruction, got {:?}", err);
    };
    assert_eq!(pair, "ta");
    assert_eq!(position, Position::new(1, 3));
}

#[test]
fn test_error_stops_execution() {
    // cd and dd after the failing divide never run
    let (vm, _) = run_err("sd5ddcdd");
    assert_eq!(stack_a(&vm), vec![0, 5]);
    assert_eq!(stack_b(&vm), vec![0]);
    assert_eq!(output(&vm), "");
}

#[test]
fn test_step_after_error_is_done() {
    let (mut vm, _) = run_err("Ka");
    assert_eq!(step(&mut vm).expect("Step failed"), Step::Done);
    assert!(matches!(vm.status, Status::FatalError { .. }));
}
