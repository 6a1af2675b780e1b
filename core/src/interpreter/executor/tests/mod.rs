//! Tests for the executor
//!
//! Organized by instruction family

mod arithmetic_tests;
mod error_tests;
mod helpers;
mod string_tests;
mod trace_tests;
