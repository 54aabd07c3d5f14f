//! End-to-end tests: source text through the loader, evaluator and engine.
//!
//! - `natives_tests`: built-in functions and operators
//! - `parse_tests`: `parse` driven from code, with code rules and captures
//! - `control_tests`: `throw` / `catch` / `return` / `quit`

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod parse_tests;

use crate::{buffer_handler, ControlAction, EvalError, EvalErrorKind, EvalResult, Interpreter, InterpreterBuilder};

/// An interpreter that prints into a buffer.
fn interpreter() -> Interpreter {
    InterpreterBuilder::new().print_handler(buffer_handler()).build()
}

/// Run `source` on a fresh interpreter; returns the result and the printed
/// output.
fn run(source: &str) -> (EvalResult, String) {
    let mut interp = interpreter();
    let result = interp.run_source(source);
    (result, interp.print_handler().get_output())
}

/// The error kind of a failed run.
fn run_err(source: &str) -> EvalErrorKind {
    match run(source).0 {
        Err(ControlAction::Error(EvalError { kind })) => kind,
        other => panic!("expected an error from {source:?}, got {other:?}"),
    }
}
