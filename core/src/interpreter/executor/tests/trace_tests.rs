//! Tests for debug tracing through the execution loop

use super::helpers::{build_vm, output};
use crate::interpreter::executor::Tracer;

#[test]
fn test_full_trace() {
    let mut vm = build_vm("k1cK", "").with_tracer(Tracer::new(3));
    vm.run().expect("Run failed");

    let expected = "\
stack 1: 0
stack 2: 0
register: 0
---
instruction: Digit (k1)
position: 0
---
stack 1: 0
stack 2: 0
register: 1
---
instruction: None (1c)
position: 1
---
stack 1: 0
stack 2: 0
register: 1
---
instruction: Print Number (cK) stacks swapped
position: 2
---
stack 1: 0
stack 2: 0
register: 1
output: 1
---
";
    assert_eq!(output(&vm), expected);
}

#[test]
fn test_trace_does_not_change_results() {
    let source = "sd6ddsd7dDS";
    let mut plain = build_vm(source, "");
    plain.run().expect("Run failed");
    let mut traced = build_vm(source, "").with_tracer(Tracer::default());
    traced.run().expect("Run failed");

    assert_eq!(plain.state, traced.state);
    assert_eq!(plain.steps(), traced.steps());
}
