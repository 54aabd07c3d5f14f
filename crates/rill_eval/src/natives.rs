//! Built-in functions of the reference host.
//!
//! Each native has a fixed arity. Arguments are evaluated left to right as
//! full expressions before dispatch, so `print 1 + 2` prints `3`. Blocks
//! evaluate to themselves, which is how `if`, `either`, `catch` and `use`
//! receive unevaluated code.

use rill_ir::{Bitset, Native, Series, Value};
use tracing::trace;

use crate::control::{ControlAction, EvalResult};
use crate::errors::{invalid_charset, missing_argument, undefined_word, wrong_arg_type};
use crate::interpreter::Interpreter;
use crate::operators::{compare, Infix};

const fn native(name: &'static str, arity: usize) -> Native {
    Native { name, arity }
}

pub(crate) const NATIVES: &[Native] = &[
    // Output
    native("print", 1),
    native("probe", 1),
    native("form", 1),
    native("mold", 1),
    // Series
    native("append", 2),
    native("insert", 2),
    native("remove", 1),
    native("copy", 1),
    native("length?", 1),
    native("first", 1),
    native("next", 1),
    native("head", 1),
    native("tail?", 1),
    native("index?", 1),
    native("charset", 1),
    // Math and logic
    native("add", 2),
    native("subtract", 2),
    native("multiply", 2),
    native("equal?", 2),
    native("lesser?", 2),
    native("greater?", 2),
    native("max", 2),
    native("not", 1),
    // Control
    native("if", 2),
    native("either", 3),
    native("do", 1),
    native("use", 2),
    native("throw", 1),
    native("catch", 1),
    native("return", 1),
    native("quit", 1),
    // Matching
    native("parse", 2),
    native("parse-case", 2),
];

impl Interpreter {
    /// Gather `native.arity` arguments starting at `i` and run the native.
    pub(crate) fn call_native(
        &mut self,
        native: Native,
        items: &[Value],
        i: usize,
    ) -> Result<(Value, usize), ControlAction> {
        let mut args = Vec::with_capacity(native.arity);
        let mut next = i;
        for _ in 0..native.arity {
            if next >= items.len() {
                return Err(missing_argument(native.name).into());
            }
            let (arg, after) = self.eval_expr(items, next)?;
            args.push(arg);
            next = after;
        }
        trace!(native = native.name, args = args.len(), "call");
        let value = self.dispatch(native.name, args)?;
        Ok((value, next))
    }

    fn dispatch(&mut self, name: &'static str, args: Vec<Value>) -> EvalResult {
        let mut args = args.into_iter();
        let mut arg = || args.next().unwrap_or(Value::None);
        match name {
            "print" => {
                let value = arg();
                let line = value.form(self.interner());
                self.println(&line);
                Ok(Value::None)
            }
            "probe" => {
                let value = arg();
                let line = value.mold(self.interner());
                self.println(&line);
                Ok(value)
            }
            "form" => Ok(Value::text(&arg().form(self.interner()))),
            "mold" => Ok(Value::text(&arg().mold(self.interner()))),
            "append" => {
                let (series, value) = (arg(), arg());
                let end = series_len(name, &series)?;
                self.splice_value(name, &series, end, &value)?;
                Ok(series)
            }
            "insert" => {
                let (series, value) = (arg(), arg());
                let at = series_index(name, &series)?;
                let inserted = self.splice_value(name, &series, at, &value)?;
                Ok(series.at_index(at + inserted))
            }
            "remove" => {
                let series = arg();
                let at = series_index(name, &series)?;
                remove_one(&series, at);
                Ok(series)
            }
            "copy" => Ok(copy_value(&arg())),
            "length?" => {
                let series = arg();
                let len = series_len(name, &series)?;
                let at = series_index(name, &series)?;
                Ok(Value::Integer(to_integer(len.saturating_sub(at))))
            }
            "first" => {
                let series = arg();
                let at = series_index(name, &series)?;
                Ok(element_at(&series, at).unwrap_or(Value::None))
            }
            "next" => {
                let series = arg();
                let at = series_index(name, &series)?;
                let len = series_len(name, &series)?;
                Ok(series.at_index((at + 1).min(len)))
            }
            "head" => {
                let series = arg();
                series_index(name, &series)?;
                Ok(series.at_index(0))
            }
            "tail?" => {
                let series = arg();
                let at = series_index(name, &series)?;
                Ok(Value::Logic(at >= series_len(name, &series)?))
            }
            "index?" => {
                let series = arg();
                Ok(Value::Integer(to_integer(series_index(name, &series)? + 1)))
            }
            "charset" => make_charset(&arg()),
            "add" => self.binary(Infix::Add, arg(), arg()),
            "subtract" => self.binary(Infix::Subtract, arg(), arg()),
            "multiply" => self.binary(Infix::Multiply, arg(), arg()),
            "equal?" => self.binary(Infix::Equal, arg(), arg()),
            "lesser?" => self.binary(Infix::Lesser, arg(), arg()),
            "greater?" => self.binary(Infix::Greater, arg(), arg()),
            "max" => {
                let (a, b) = (arg(), arg());
                match compare(&a, &b) {
                    Some(ord) if ord.is_lt() => Ok(b),
                    Some(_) => Ok(a),
                    None => Err(wrong_arg_type(name, 2, b.kind()).into()),
                }
            }
            "not" => Ok(Value::Logic(!arg().is_truthy())),
            "if" => {
                let (condition, body) = (arg(), arg());
                let body = code_arg(name, 2, &body)?;
                if condition.is_truthy() {
                    self.do_block(&body)
                } else {
                    Ok(Value::None)
                }
            }
            "either" => {
                let (condition, yes, no) = (arg(), arg(), arg());
                let branch = if condition.is_truthy() { (2, yes) } else { (3, no) };
                let body = code_arg(name, branch.0, &branch.1)?;
                self.do_block(&body)
            }
            "do" => self.do_value(arg()),
            "use" => {
                let (words, body) = (arg(), arg());
                self.use_words(&words, &body)
            }
            "throw" => Err(ControlAction::Throw(arg())),
            "catch" => {
                let body = arg();
                let body = code_arg(name, 1, &body)?;
                match self.do_block(&body) {
                    Err(ControlAction::Throw(value)) => Ok(value),
                    other => other,
                }
            }
            "return" => Err(ControlAction::Return(arg())),
            "quit" => match arg() {
                Value::Integer(code) => Err(ControlAction::Quit(code)),
                Value::None => Err(ControlAction::Quit(0)),
                other => Err(wrong_arg_type(name, 1, other.kind()).into()),
            },
            "parse" => {
                let (input, rules) = (arg(), arg());
                let options = self.parse_options();
                self.parse(&input, &rules, options)
            }
            "parse-case" => {
                let (input, rules) = (arg(), arg());
                let options = self.parse_options().with_case_sensitive(true);
                self.parse(&input, &rules, options)
            }
            _ => Err(undefined_word(name).into()),
        }
    }

    fn binary(&self, op: Infix, left: Value, right: Value) -> EvalResult {
        Ok(op.apply(&left, &right, self.interner())?)
    }

    /// Run a block, or load and run a text. A `return` ends only this `do`.
    fn do_value(&mut self, value: Value) -> EvalResult {
        let code = match value {
            Value::Block(code) => code,
            Value::Text(source) => match self.load(&source.to_text())? {
                Value::Block(code) => code,
                _ => return Ok(Value::None),
            },
            other => return Ok(other),
        };
        match self.do_block(&code) {
            Err(ControlAction::Return(value)) => Ok(value),
            other => other,
        }
    }

    /// Run `body` with each word of `words` bound locally to `none`.
    fn use_words(&mut self, words: &Value, body: &Value) -> EvalResult {
        let Value::Block(names) = words else {
            return Err(wrong_arg_type("use", 1, words.kind()).into());
        };
        let body = code_arg("use", 2, body)?;
        let env = self.env_mut();
        env.push_scope();
        for word in names.to_vec() {
            if let Value::Word(name) | Value::SetWord(name) | Value::LitWord(name) = word {
                env.define(name, Value::None);
            }
        }
        let result = self.do_block(&body);
        self.env_mut().pop_scope();
        result
    }

    /// Insert `value` into `series` at `at`. Blocks splice block values;
    /// texts take the formed value; binaries take bytes.
    fn splice_value(&self, native: &'static str, series: &Value, at: usize, value: &Value) -> Result<usize, ControlAction> {
        let inserted = match series {
            Value::Block(s) | Value::Group(s) => match value {
                Value::Block(items) => s.splice(at, 0, items.to_vec()),
                other => s.splice(at, 0, [other.clone()]),
            },
            Value::Text(s) | Value::Tag(s) => {
                let text = value.form(self.interner());
                s.splice(at, 0, text.chars())
            }
            Value::Binary(s) => match value {
                Value::Binary(bytes) => s.splice(at, 0, bytes.to_vec()),
                Value::Integer(n) => match u8::try_from(*n) {
                    Ok(byte) => s.splice(at, 0, [byte]),
                    Err(_) => return Err(wrong_arg_type(native, 2, value.kind()).into()),
                },
                Value::Char(c) => match u8::try_from(*c) {
                    Ok(byte) => s.splice(at, 0, [byte]),
                    Err(_) => return Err(wrong_arg_type(native, 2, value.kind()).into()),
                },
                Value::Text(text) => s.splice(at, 0, text.to_text().into_bytes()),
                other => return Err(wrong_arg_type(native, 2, other.kind()).into()),
            },
            other => return Err(wrong_arg_type(native, 1, other.kind()).into()),
        };
        Ok(inserted)
    }
}

fn series_index(native: &'static str, value: &Value) -> Result<usize, ControlAction> {
    value
        .series_index()
        .ok_or_else(|| wrong_arg_type(native, 1, value.kind()).into())
}

fn series_len(native: &'static str, value: &Value) -> Result<usize, ControlAction> {
    match value {
        Value::Text(s) | Value::Tag(s) => Ok(s.len()),
        Value::Binary(s) => Ok(s.len()),
        Value::Block(s) | Value::Group(s) | Value::GetGroup(s) => Ok(s.len()),
        other => Err(wrong_arg_type(native, 1, other.kind()).into()),
    }
}

fn element_at(series: &Value, at: usize) -> Option<Value> {
    match series {
        Value::Text(s) | Value::Tag(s) => s.get(at).map(Value::Char),
        Value::Binary(s) => s.get(at).map(|b| Value::Integer(i64::from(b))),
        Value::Block(s) | Value::Group(s) | Value::GetGroup(s) => s.get(at),
        _ => None,
    }
}

fn remove_one(series: &Value, at: usize) {
    match series {
        Value::Text(s) | Value::Tag(s) => s.remove_range(at, at + 1),
        Value::Binary(s) => s.remove_range(at, at + 1),
        Value::Block(s) | Value::Group(s) | Value::GetGroup(s) => s.remove_range(at, at + 1),
        _ => {}
    }
}

/// A fresh buffer holding the elements from the head index on.
fn copy_value(value: &Value) -> Value {
    match value {
        Value::Text(s) => Value::Text(Series::new(s.to_vec())),
        Value::Tag(s) => Value::Tag(Series::new(s.to_vec())),
        Value::Binary(s) => Value::Binary(Series::new(s.to_vec())),
        Value::Block(s) => Value::Block(Series::new(s.to_vec())),
        Value::Group(s) => Value::Group(Series::new(s.to_vec())),
        other => other.clone(),
    }
}

fn code_arg(native: &'static str, position: usize, value: &Value) -> Result<Series<Value>, ControlAction> {
    match value {
        Value::Block(code) => Ok(code.clone()),
        other => Err(wrong_arg_type(native, position, other.kind()).into()),
    }
}

/// `charset "a-z"` or `charset #"x"`. A descending range is rejected.
fn make_charset(spec: &Value) -> EvalResult {
    match spec {
        Value::Char(c) => {
            let mut set = Bitset::new();
            set.insert(u32::from(*c));
            Ok(Value::Bitset(set))
        }
        Value::Text(s) => {
            let text = s.to_text();
            let chars: Vec<char> = text.chars().collect();
            let descending = chars
                .windows(3)
                .any(|w| w[1] == '-' && w[0] != '-' && w[2] != '-' && w[0] > w[2]);
            if descending {
                return Err(invalid_charset(&text).into());
            }
            Ok(Value::Bitset(Bitset::from_spec(&text)))
        }
        other => Err(wrong_arg_type("charset", 1, other.kind()).into()),
    }
}

fn to_integer(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
