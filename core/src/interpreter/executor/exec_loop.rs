//! Core execution loop
//!
//! `step` is one fetch-decode-execute cycle:
//! 1. trace the current state (debug mode)
//! 2. fetch the pair at the program counter, or finish at end of program
//! 3. case-fold and decode it
//! 4. trace the instruction (debug mode)
//! 5. execute it against the primary/secondary stacks
//! 6. advance the program counter unless the instruction redirected it

use std::io::{BufRead, Write};

use super::super::errors::RuntimeError;
use super::instructions::{self, Flow};
use super::opcode::{decode, fold_case};
use super::vm::{Status, Step, Vm};

/* ===================== Public API ===================== */

/// Run the VM until it completes
///
/// Returns the fatal error, if any; `vm.status` records the same outcome.
pub fn run_until_done<R: BufRead, W: Write>(vm: &mut Vm<R, W>) -> Result<(), RuntimeError> {
    let result = loop {
        match step(vm) {
            Ok(Step::Continue) => {}
            Ok(Step::Done) => break Ok(()),
            Err(err) => break Err(err),
        }
    };

    match &result {
        Ok(()) => tracing::debug!(steps = vm.steps, "program finished"),
        Err(err) => tracing::debug!(steps = vm.steps, error = %err, "program aborted"),
    }

    vm.output.flush()?;
    result
}

/// Execute one step of the VM
///
/// Any error moves the VM to `Status::FatalError`.
pub fn step<R: BufRead, W: Write>(vm: &mut Vm<R, W>) -> Result<Step, RuntimeError> {
    if vm.status != Status::Normal {
        return Ok(Step::Done);
    }

    match cycle(vm) {
        Ok(step) => Ok(step),
        Err(err) => {
            vm.status = Status::FatalError {
                message: err.to_string(),
                position: err.position(),
            };
            Err(err)
        }
    }
}

/* ===================== Fetch / Decode / Execute ===================== */

fn cycle<R: BufRead, W: Write>(vm: &mut Vm<R, W>) -> Result<Step, RuntimeError> {
    if let Some(tracer) = &vm.tracer {
        tracer.state(&mut vm.output, &vm.state, &vm.debug_output)?;
    }

    let Some(raw) = vm.program.pair(vm.state.pos) else {
        vm.status = Status::EndOfProgram;
        return Ok(Step::Done);
    };

    let (first, _) = fold_case(raw.0);
    let (second, alt) = fold_case(raw.1);
    let opcode = decode(first, second, alt);

    if let Some(tracer) = &vm.tracer {
        tracer.instruction(&mut vm.output, opcode, raw, alt, vm.state.pos)?;
    }
    tracing::trace!(pos = vm.state.pos, %opcode, alt, "step");

    if instructions::execute(vm, opcode, raw, alt)? == Flow::Advance {
        vm.state.pos = vm.state.pos.wrapping_add(1);
    }

    vm.steps += 1;
    Ok(Step::Continue)
}
