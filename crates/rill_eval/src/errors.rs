//! Evaluation errors.
//!
//! `EvalErrorKind` is the structured category; the factory functions below
//! are the constructors the evaluator uses, so messages live in one place.

use rill_ir::Kind;
use rill_lexer::LexError;
use rill_parse::RuleError;
use thiserror::Error;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalErrorKind {
    #[error("`{name}` has no value")]
    UndefinedWord { name: String },
    #[error("`{native}` is missing an argument")]
    MissingArgument { native: &'static str },
    #[error("`{native}` does not accept {got} for argument {position}")]
    WrongArgType {
        native: &'static str,
        position: usize,
        got: Kind,
    },
    #[error("`{op}` needs a value on its right")]
    MissingOperand { op: &'static str },
    #[error("cannot apply `{op}` to {left} and {right}")]
    InvalidOperands {
        op: &'static str,
        left: Kind,
        right: Kind,
    },
    #[error("integer overflow in `{operation}`")]
    IntegerOverflow { operation: &'static str },
    #[error("invalid charset spec `{spec}`")]
    InvalidCharset { spec: String },
    #[error("evaluation nested deeper than {limit} levels")]
    RecursionLimit { limit: usize },
    #[error("rule evaluation exceeded {limit} steps")]
    StepLimit { limit: u64 },
    #[error("no `catch` for thrown value")]
    UncaughtThrow,
    #[error("load error: {message}")]
    Load { message: String },
    #[error("parse rule error: {0}")]
    Rule(RuleError),
}

/// An evaluation error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
}

impl EvalError {
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError { kind }
    }
}

// Words and arguments

#[cold]
pub fn undefined_word(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedWord {
        name: name.to_owned(),
    })
}

#[cold]
pub fn missing_argument(native: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingArgument { native })
}

#[cold]
pub fn wrong_arg_type(native: &'static str, position: usize, got: Kind) -> EvalError {
    EvalError::from_kind(EvalErrorKind::WrongArgType {
        native,
        position,
        got,
    })
}

// Operators

#[cold]
pub fn missing_operand(op: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingOperand { op })
}

#[cold]
pub fn invalid_operands(op: &'static str, left: Kind, right: Kind) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidOperands { op, left, right })
}

#[cold]
pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow { operation })
}

// Series

#[cold]
pub fn invalid_charset(spec: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidCharset {
        spec: spec.to_owned(),
    })
}

// Control and nesting

#[cold]
pub fn recursion_limit(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { limit })
}

#[cold]
pub fn step_limit(limit: u64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StepLimit { limit })
}

#[cold]
pub fn uncaught_throw() -> EvalError {
    EvalError::from_kind(EvalErrorKind::UncaughtThrow)
}

// Loader and engine

#[cold]
pub fn load_failed(err: &LexError) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Load {
        message: err.to_string(),
    })
}

#[cold]
pub fn rule_error(err: RuleError) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Rule(err))
}
