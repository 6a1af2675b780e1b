//! Test helpers for executor tests
//!
//! Common utilities for lexing sources and building VMs over in-memory
//! input and output.

use std::io::Cursor;

use crate::interpreter::errors::RuntimeError;
use crate::interpreter::executor::{step, Step, Vm};
use crate::interpreter::lexer::{self, Program};
use crate::interpreter::number::Number;

pub type TestVm = Vm<Cursor<Vec<u8>>, Vec<u8>>;

/// Lex source, round-trip the program through JSON, and create a VM
///
/// Random is seeded with a fixed value so runs are repeatable.
pub fn build_vm(source: &str, input: &str) -> TestVm {
    let program = lexer::lex(source).expect("Lex failed");
    let json = serde_json::to_string(&program).expect("Program serialization failed");
    let program: Program = serde_json::from_str(&json).expect("Program deserialization failed");

    Vm::new(program, Cursor::new(input.as_bytes().to_vec()), Vec::new()).with_seed(0)
}

/// Run a program with no input, expecting success
pub fn run(source: &str) -> TestVm {
    run_with_input(source, "")
}

/// Run a program against the given input, expecting success
pub fn run_with_input(source: &str, input: &str) -> TestVm {
    let mut vm = build_vm(source, input);
    vm.run().expect("Run failed");
    vm
}

/// Run a program that must fail
pub fn run_err(source: &str) -> (TestVm, RuntimeError) {
    let mut vm = build_vm(source, "");
    let err = vm.run().expect_err("Run should have failed");
    (vm, err)
}

/// Execute exactly `n` steps, all of which must continue
pub fn step_n(vm: &mut TestVm, n: usize) {
    for i in 0..n {
        let result = step(vm).expect("Step failed");
        assert_eq!(result, Step::Continue, "Program ended early at step {}", i);
    }
}

/// Everything written to the output sink
pub fn output(vm: &TestVm) -> String {
    String::from_utf8_lossy(vm.output()).into_owned()
}

pub fn stack_a(vm: &TestVm) -> Vec<Number> {
    vm.state.stack_a.values().to_vec()
}

pub fn stack_b(vm: &TestVm) -> Vec<Number> {
    vm.state.stack_b.values().to_vec()
}
