//! Parse error types.
//!
//! Two disjoint categories reach the caller:
//! - [`RuleError`]: the rule block itself is malformed for this input. Fatal
//!   and never backtracked.
//! - [`ParseError::Mismatch`] / [`ParseError::Incomplete`]: ordinary match
//!   failure, produced only at the top-level boundary.
//!
//! Host control signals are relayed unchanged through [`ParseError::Host`].

use rill_ir::{Kind, StringInterner, Value};
use thiserror::Error;

/// What is wrong with a rule block.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleErrorKind {
    #[error("expected a rule after `{after}`")]
    UnexpectedEnd { after: &'static str },
    #[error("`{keyword}` needs a word to store into")]
    InvalidCaptureTarget { keyword: &'static str },
    #[error("`{word}` has no rule value")]
    UndefinedRule { word: String },
    #[error("`{rule}` cannot match {input} input")]
    UnsupportedRule { rule: String, input: Kind },
    #[error("`keep` used outside of any `collect`")]
    KeepOutsideCollect,
    #[error("`:{word}` does not hold a position in the input")]
    BadReposition { word: String },
    #[error("cannot insert `{value}` into {input} input")]
    InvalidMutationValue { value: String, input: Kind },
    #[error("`{keyword}` cannot follow other modifiers here")]
    NestedModifier { keyword: &'static str },
    #[error("rule nesting exceeded {limit} levels")]
    RecursionLimit { limit: usize },
    #[error("cannot parse a value of type {kind}")]
    InvalidInput { kind: Kind },
    #[error("rules must be a block, found {kind}")]
    InvalidRules { kind: Kind },
    #[error("`and` is not a rule keyword; use `ahead`")]
    UseAhead,
    #[error("`{rule}` is not a valid rule")]
    InvalidRule { rule: String },
}

/// A malformed rule, with the offending rule position and a molded excerpt.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind} (rule {position}, near `{near}`)")]
pub struct RuleError {
    pub kind: RuleErrorKind,
    /// Index of the offending item in its rule block.
    pub position: usize,
    pub near: String,
}

impl RuleError {
    pub fn new(kind: RuleErrorKind, position: usize, near: String) -> Self {
        RuleError {
            kind,
            position,
            near,
        }
    }
}

/// Top-level parse failure.
#[derive(Debug, Error)]
pub enum ParseError<C> {
    /// No alternative matched.
    #[error("input does not match the rules (farthest position {farthest})")]
    Mismatch { farthest: usize },
    /// The rules matched but stopped short of the end of the input.
    #[error("rules matched up to position {position} of {length}")]
    Incomplete { position: usize, length: usize },
    #[error(transparent)]
    Rule(#[from] RuleError),
    /// A control signal raised by host code, relayed untouched.
    #[error("host control signal: {0:?}")]
    Host(C),
}

// Factory functions for rule errors raised outside of a rule fetch

pub(crate) fn unsupported(rule: &Value, input: Kind, interner: &StringInterner) -> RuleErrorKind {
    RuleErrorKind::UnsupportedRule {
        rule: excerpt(rule, interner),
        input,
    }
}

pub(crate) fn invalid_rule(rule: &Value, interner: &StringInterner) -> RuleErrorKind {
    RuleErrorKind::InvalidRule {
        rule: excerpt(rule, interner),
    }
}

pub(crate) fn invalid_mutation(value: &Value, input: Kind, interner: &StringInterner) -> RuleErrorKind {
    RuleErrorKind::InvalidMutationValue {
        value: excerpt(value, interner),
        input,
    }
}

const EXCERPT_LIMIT: usize = 40;

/// Molded text of a value, cut to a readable length.
pub(crate) fn excerpt(value: &Value, interner: &StringInterner) -> String {
    let molded = value.mold(interner);
    if molded.chars().count() <= EXCERPT_LIMIT {
        return molded;
    }
    let mut cut: String = molded.chars().take(EXCERPT_LIMIT).collect();
    cut.push_str("...");
    cut
}
