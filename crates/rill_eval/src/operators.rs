//! Infix operators.
//!
//! The operator set is fixed, so dispatch is a match over [`Infix`]. The
//! prefix natives `add`, `equal?`, `lesser?` and friends share these
//! implementations.

use std::cmp::Ordering;

use rill_ir::{StringInterner, Value};

use crate::errors::{integer_overflow, invalid_operands, EvalError};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Infix {
    Add,
    Subtract,
    Multiply,
    Equal,
    NotEqual,
    Lesser,
    Greater,
    LesserOrEqual,
    GreaterOrEqual,
}

impl Infix {
    pub(crate) fn from_spelling(s: &str) -> Option<Infix> {
        Some(match s {
            "+" => Infix::Add,
            "-" => Infix::Subtract,
            "*" => Infix::Multiply,
            "=" => Infix::Equal,
            "<>" => Infix::NotEqual,
            "<" => Infix::Lesser,
            ">" => Infix::Greater,
            "<=" => Infix::LesserOrEqual,
            ">=" => Infix::GreaterOrEqual,
            _ => return None,
        })
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Infix::Add => "+",
            Infix::Subtract => "-",
            Infix::Multiply => "*",
            Infix::Equal => "=",
            Infix::NotEqual => "<>",
            Infix::Lesser => "<",
            Infix::Greater => ">",
            Infix::LesserOrEqual => "<=",
            Infix::GreaterOrEqual => ">=",
        }
    }

    pub(crate) fn apply(self, left: &Value, right: &Value, interner: &StringInterner) -> Result<Value, EvalError> {
        match self {
            Infix::Add => arith(self, left, right, i64::checked_add),
            Infix::Subtract => arith(self, left, right, i64::checked_sub),
            Infix::Multiply => arith(self, left, right, i64::checked_mul),
            Infix::Equal => Ok(Value::Logic(left.equivalent(right, false, interner))),
            Infix::NotEqual => Ok(Value::Logic(!left.equivalent(right, false, interner))),
            Infix::Lesser => ordered(self, left, right, Ordering::is_lt),
            Infix::Greater => ordered(self, left, right, Ordering::is_gt),
            Infix::LesserOrEqual => ordered(self, left, right, Ordering::is_le),
            Infix::GreaterOrEqual => ordered(self, left, right, Ordering::is_ge),
        }
    }
}

fn arith(op: Infix, left: &Value, right: &Value, f: fn(i64, i64) -> Option<i64>) -> Result<Value, EvalError> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => f(*a, *b)
            .map(Value::Integer)
            .ok_or_else(|| integer_overflow(op.as_str())),
        _ => Err(invalid_operands(op.as_str(), left.kind(), right.kind())),
    }
}

fn ordered(op: Infix, left: &Value, right: &Value, test: fn(Ordering) -> bool) -> Result<Value, EvalError> {
    compare(left, right)
        .map(|ord| Value::Logic(test(ord)))
        .ok_or_else(|| invalid_operands(op.as_str(), left.kind(), right.kind()))
}

/// Ordering of integers, chars and texts; `None` for anything else.
pub(crate) fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        (Value::Char(a), Value::Char(b)) => Some(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Some(a.to_vec().cmp(&b.to_vec())),
        _ => None,
    }
}
