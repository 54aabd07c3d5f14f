//! Rill Eval - the reference host
//!
//! A deliberately small evaluator and variable store that implements the
//! engine's [`Host`] boundary, so code rules, captures and control signals
//! can be exercised end to end from loaded source text.
//!
//! # Architecture
//!
//! - `interpreter`: the evaluator, its builder, and the `Host` impl
//! - `natives`: fixed-arity built-in functions, including `parse`
//! - `operators`: infix arithmetic and comparison
//! - `environment`: a scope stack over interned names
//! - `control`: `throw` / `return` / `quit` / errors as one signal type
//!
//! [`Host`]: rill_parse::Host

mod control;
mod environment;
pub mod errors;
mod interpreter;
mod natives;
mod operators;
mod print_handler;
mod stack;

pub use control::{ControlAction, EvalResult};
pub use environment::Environment;
pub use errors::{EvalError, EvalErrorKind};
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use print_handler::{buffer_handler, silent_handler, stdout_handler, PrintHandlerImpl, SharedPrintHandler};

#[cfg(test)]
mod tests;
