//! Engine tests.
//!
//! Tests are organized into modules by category:
//! - `matching`: literals, datatypes, alternation, case, end of input
//! - `quantifiers`: counts, `some` / `any` / `opt` / `while` / `further`
//! - `captures`: `set`, `copy`, set-words and get-words
//! - `mutation`: `remove`, `insert`, `change`
//! - `collect`: `collect` / `keep` and rollback
//! - `control`: `accept`, `reject`, `break`, host signals, negation
//! - `scan`: `to` / `thru`, `into`, `quote`
//! - `errors`: rule-definition errors
//! - `properties`: position invariants under random input
//!
//! Rules are loaded from source text; embedded code runs through a small
//! closure-driven test host.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod collect;
mod matching;
mod properties;

use rill_ir::{Name, Series, StringInterner, Value};
use rustc_hash::FxHashMap;

use crate::{Host, ParseError, ParseOptions, Parsed, Parser, RuleErrorKind};

/// Control signal raised by test code.
#[derive(Clone, Debug, PartialEq)]
pub(super) enum TestSignal {
    Thrown(Value),
}

type Handler = Box<dyn FnMut(&[Value], &mut FxHashMap<Name, Value>) -> Result<Value, TestSignal>>;

/// Variable store plus a replaceable evaluator.
///
/// Without a handler, a group evaluates to its last item, with words looked
/// up in the variable store.
pub(super) struct TestHost {
    vars: FxHashMap<Name, Value>,
    handler: Option<Handler>,
    /// Remaining checkpoints before a `Thrown(none)` signal.
    checkpoint_budget: Option<usize>,
    pub evaluations: usize,
}

impl Host for TestHost {
    type Control = TestSignal;

    fn evaluate(&mut self, code: &Series<Value>) -> Result<Value, TestSignal> {
        self.evaluations += 1;
        let items = code.to_vec();
        if let Some(handler) = self.handler.as_mut() {
            return handler(&items, &mut self.vars);
        }
        Ok(match items.last() {
            Some(Value::Word(name)) => self.vars.get(name).cloned().unwrap_or(Value::None),
            Some(other) => other.clone(),
            None => Value::None,
        })
    }

    fn get(&self, name: Name) -> Option<Value> {
        self.vars.get(&name).cloned()
    }

    fn set(&mut self, name: Name, value: Value) {
        self.vars.insert(name, value);
    }

    fn checkpoint(&mut self) -> Result<(), TestSignal> {
        match self.checkpoint_budget.as_mut() {
            Some(0) => Err(TestSignal::Thrown(Value::None)),
            Some(n) => {
                *n -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

pub(super) struct Fixture {
    pub interner: StringInterner,
    pub host: TestHost,
    pub options: ParseOptions,
}

impl Fixture {
    pub fn new() -> Self {
        Fixture {
            interner: StringInterner::new(),
            host: TestHost {
                vars: FxHashMap::default(),
                handler: None,
                checkpoint_budget: None,
                evaluations: 0,
            },
            options: ParseOptions::default(),
        }
    }

    pub fn partial(mut self) -> Self {
        self.options = self.options.with_full_match(false);
        self
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_handler(
        mut self,
        handler: impl FnMut(&[Value], &mut FxHashMap<Name, Value>) -> Result<Value, TestSignal> + 'static,
    ) -> Self {
        self.host.handler = Some(Box::new(handler));
        self
    }

    pub fn with_checkpoints(mut self, budget: usize) -> Self {
        self.host.checkpoint_budget = Some(budget);
        self
    }

    /// Load one value from source text.
    pub fn value(&self, source: &str) -> Value {
        rill_lexer::load(source, &self.interner).unwrap().remove(0)
    }

    /// Load source text as a rule block.
    pub fn rules(&self, source: &str) -> Value {
        rill_lexer::load_block(source, &self.interner).unwrap()
    }

    pub fn name(&self, word: &str) -> Name {
        self.interner.intern(word)
    }

    pub fn word(&self, word: &str) -> Value {
        Value::Word(self.name(word))
    }

    pub fn set_var(&mut self, word: &str, value: Value) {
        let name = self.name(word);
        self.host.vars.insert(name, value);
    }

    pub fn var(&self, word: &str) -> Option<Value> {
        self.host.vars.get(&self.name(word)).cloned()
    }

    pub fn parse(&mut self, input: &Value, rules: &str) -> Result<Parsed, ParseError<TestSignal>> {
        let rules = self.rules(rules);
        Parser::new(&self.interner, &mut self.host)
            .with_options(self.options)
            .parse(input, &rules)
    }

    /// Parse text input.
    pub fn parse_text(&mut self, input: &str, rules: &str) -> Result<Parsed, ParseError<TestSignal>> {
        self.parse(&Value::text(input), rules)
    }

    pub fn matches(&mut self, input: &Value, rules: &str) -> bool {
        self.parse(input, rules).is_ok()
    }

    pub fn matches_text(&mut self, input: &str, rules: &str) -> bool {
        self.parse_text(input, rules).is_ok()
    }

    /// The kind of the rule error a parse reports.
    pub fn rule_error(&mut self, input: &Value, rules: &str) -> RuleErrorKind {
        match self.parse(input, rules) {
            Err(ParseError::Rule(err)) => err.kind,
            other => panic!("expected a rule error, got {other:?}"),
        }
    }
}

/// A full match of `len` elements with nothing collected.
pub(super) fn matched(position: usize) -> Parsed {
    Parsed::Matched {
        position,
        collected: None,
    }
}
