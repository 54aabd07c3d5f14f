//! Tree-walking evaluator over loaded blocks.
//!
//! Evaluation is left to right. A word holding a native consumes as many
//! following expressions as the native's arity; an infix operator word after
//! any complete term combines it with the next term. Set-words assign the
//! value of the expression that follows them.
//!
//! The interpreter is also the engine's [`Host`]: code rules run through
//! [`Interpreter::do_block`], and `set` / `copy` captures land in the same
//! environment that code reads.

mod builder;

use std::sync::Arc;

use rill_ir::{Keyword, Name, Series, SharedInterner, StringInterner, Value};
use rill_parse::{Host, ParseError, ParseOptions, Parsed, Parser};
use tracing::{debug, trace};

use crate::control::{ControlAction, EvalResult};
use crate::environment::Environment;
use crate::errors::{
    load_failed, missing_argument, missing_operand, recursion_limit, rule_error, step_limit, uncaught_throw, undefined_word,
    EvalError,
};
use crate::operators::Infix;
use crate::print_handler::SharedPrintHandler;
use crate::stack::ensure_sufficient_stack;

pub use builder::InterpreterBuilder;

pub struct Interpreter {
    interner: SharedInterner,
    env: Environment,
    print: SharedPrintHandler,
    options: ParseOptions,
    max_depth: usize,
    depth: usize,
    /// Rule steps allowed across all parses, if limited.
    step_limit: Option<u64>,
    steps_taken: u64,
}

impl Interpreter {
    /// An interpreter with a fresh interner, stdout output and default
    /// parse options.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn shared_interner(&self) -> SharedInterner {
        Arc::clone(&self.interner)
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print
    }

    pub fn parse_options(&self) -> ParseOptions {
        self.options
    }

    /// Look up a word by spelling.
    pub fn get_var(&self, word: &str) -> Option<Value> {
        self.env.lookup(self.interner.intern(word))
    }

    pub fn set_var(&mut self, word: &str, value: Value) {
        let name = self.interner.intern(word);
        self.env.assign(name, value);
    }

    /// Load source text into a block.
    pub fn load(&self, source: &str) -> Result<Value, EvalError> {
        rill_lexer::load_block(source, &self.interner).map_err(|err| load_failed(&err))
    }

    /// Load and run a program.
    ///
    /// A top-level `return` ends the program with its value; an uncaught
    /// `throw` becomes an error. `quit` is passed through for the caller.
    pub fn run_source(&mut self, source: &str) -> EvalResult {
        let program = self.load(source)?;
        let Value::Block(code) = program else {
            return Ok(Value::None);
        };
        match self.do_block(&code) {
            Ok(value) | Err(ControlAction::Return(value)) => Ok(value),
            Err(ControlAction::Throw(_)) => Err(uncaught_throw().into()),
            Err(other) => Err(other),
        }
    }

    /// Evaluate every expression of a block; the value is the last one's.
    pub fn do_block(&mut self, code: &Series<Value>) -> EvalResult {
        if self.depth >= self.max_depth {
            return Err(recursion_limit(self.max_depth).into());
        }
        self.depth += 1;
        let items = code.to_vec();
        let result = ensure_sufficient_stack(|| self.eval_items(&items));
        self.depth -= 1;
        result
    }

    fn eval_items(&mut self, items: &[Value]) -> EvalResult {
        let mut last = Value::None;
        let mut i = 0;
        while i < items.len() {
            let (value, next) = self.eval_expr(items, i)?;
            last = value;
            i = next;
        }
        Ok(last)
    }

    /// One term plus any infix operators that follow it.
    pub(crate) fn eval_expr(&mut self, items: &[Value], i: usize) -> Result<(Value, usize), ControlAction> {
        let (mut value, mut next) = self.eval_term(items, i)?;
        while let Some(op) = items.get(next).and_then(|item| self.infix(item)) {
            if next + 1 >= items.len() {
                return Err(missing_operand(op.as_str()).into());
            }
            let (rhs, after) = self.eval_term(items, next + 1)?;
            value = op.apply(&value, &rhs, &self.interner)?;
            next = after;
        }
        Ok((value, next))
    }

    fn eval_term(&mut self, items: &[Value], i: usize) -> Result<(Value, usize), ControlAction> {
        let Some(item) = items.get(i) else {
            return Ok((Value::None, i));
        };
        match item {
            Value::Word(name) => match self.lookup(*name)? {
                Value::Native(native) => self.call_native(native, items, i + 1),
                value => Ok((value, i + 1)),
            },
            Value::SetWord(name) => {
                if i + 1 >= items.len() {
                    return Err(missing_argument("set-word").into());
                }
                let (value, next) = self.eval_expr(items, i + 1)?;
                self.env.assign(*name, value.clone());
                Ok((value, next))
            }
            Value::GetWord(name) => Ok((self.lookup(*name)?, i + 1)),
            Value::LitWord(name) => Ok((Value::Word(*name), i + 1)),
            Value::Group(code) => Ok((self.do_block(code)?, i + 1)),
            other => Ok((other.clone(), i + 1)),
        }
    }

    fn lookup(&self, name: Name) -> Result<Value, EvalError> {
        self.env
            .lookup(name)
            .ok_or_else(|| undefined_word(self.interner.lookup(name)))
    }

    fn infix(&self, item: &Value) -> Option<Infix> {
        match item {
            Value::Word(name) if Keyword::from_name(*name).is_none() => Infix::from_spelling(self.interner.lookup(*name)),
            _ => None,
        }
    }

    pub(crate) fn println(&self, msg: &str) {
        self.print.println(msg);
    }

    pub(crate) fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Run the engine with this interpreter as host.
    ///
    /// A full match yields `true` (or the block of an outermost bare
    /// `collect`); a mismatch yields `false`; `accept` yields its value.
    pub fn parse(&mut self, input: &Value, rules: &Value, options: ParseOptions) -> EvalResult {
        let interner = Arc::clone(&self.interner);
        let result = Parser::new(&interner, self).with_options(options).parse(input, rules);
        match result {
            Ok(Parsed::Matched {
                collected: Some(block), ..
            }) => Ok(block),
            Ok(Parsed::Matched { .. }) => Ok(Value::Logic(true)),
            Ok(Parsed::Accepted(value)) => Ok(value),
            Err(ParseError::Mismatch { farthest }) => {
                debug!(farthest, "parse returned false");
                Ok(Value::Logic(false))
            }
            Err(ParseError::Incomplete { position, length }) => {
                debug!(position, length, "parse returned false");
                Ok(Value::Logic(false))
            }
            Err(ParseError::Rule(err)) => Err(rule_error(err).into()),
            Err(ParseError::Host(control)) => {
                trace!(?control, "control signal left parse");
                Err(control)
            }
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for Interpreter {
    type Control = ControlAction;

    fn evaluate(&mut self, code: &Series<Value>) -> Result<Value, ControlAction> {
        self.do_block(code)
    }

    fn get(&self, name: Name) -> Option<Value> {
        self.env.lookup(name)
    }

    fn set(&mut self, name: Name, value: Value) {
        self.env.assign(name, value);
    }

    fn checkpoint(&mut self) -> Result<(), ControlAction> {
        match self.step_limit {
            Some(limit) if self.steps_taken >= limit => Err(step_limit(limit).into()),
            _ => {
                self.steps_taken += 1;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests;
