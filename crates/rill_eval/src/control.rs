//! Non-local control flow.
//!
//! Everything that unwinds evaluation travels as a [`ControlAction`]: thrown
//! values, `return`, `quit`, and errors. The engine treats it as an opaque
//! host control signal and relays it through any number of rule passes.

use rill_ir::Value;

use crate::errors::EvalError;

#[derive(Clone, Debug, PartialEq)]
pub enum ControlAction {
    /// `throw value`, caught by the nearest `catch`.
    Throw(Value),
    /// `return value`, ends the running `do`.
    Return(Value),
    /// `quit code`, ends the program.
    Quit(i64),
    Error(EvalError),
}

impl From<EvalError> for ControlAction {
    fn from(err: EvalError) -> Self {
        ControlAction::Error(err)
    }
}

/// Result of evaluation.
pub type EvalResult = Result<Value, ControlAction>;
