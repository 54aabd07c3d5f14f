//! `InterpreterBuilder` for creating configured interpreters.

use std::sync::Arc;

use rill_ir::{SharedInterner, StringInterner, Value};
use rill_parse::ParseOptions;

use super::Interpreter;
use crate::environment::Environment;
use crate::natives::NATIVES;
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Default nesting limit for code blocks.
const DEFAULT_MAX_DEPTH: usize = 512;

pub struct InterpreterBuilder {
    interner: Option<SharedInterner>,
    print_handler: Option<SharedPrintHandler>,
    options: ParseOptions,
    max_depth: usize,
    step_limit: Option<u64>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            interner: None,
            print_handler: None,
            options: ParseOptions::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            step_limit: None,
        }
    }

    /// Share an interner with a loader or another interpreter.
    #[must_use]
    pub fn interner(mut self, interner: SharedInterner) -> Self {
        self.interner = Some(interner);
        self
    }

    /// Where `print` and `probe` write. Default is stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Options for every `parse` call. `parse-case` turns on case
    /// sensitivity on top of these.
    #[must_use]
    pub fn parse_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Abort rule matching after `steps` rule items across all parses.
    #[must_use]
    pub fn step_limit(mut self, steps: u64) -> Self {
        self.step_limit = Some(steps);
        self
    }

    pub fn build(self) -> Interpreter {
        let interner = self
            .interner
            .unwrap_or_else(|| Arc::new(StringInterner::new()));
        let mut env = Environment::new();
        env.define_global(interner.intern("true"), Value::Logic(true));
        env.define_global(interner.intern("false"), Value::Logic(false));
        env.define_global(interner.intern("none"), Value::None);
        for native in NATIVES {
            env.define_global(interner.intern(native.name), Value::Native(*native));
        }
        Interpreter {
            interner,
            env,
            print: self.print_handler.unwrap_or_else(stdout_handler),
            options: self.options,
            max_depth: self.max_depth,
            depth: 0,
            step_limit: self.step_limit,
            steps_taken: 0,
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
