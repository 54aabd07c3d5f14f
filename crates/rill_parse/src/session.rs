//! Per-parse engine state.

use rill_ir::{Series, StringInterner, Value};

use crate::collect::CollectStack;
use crate::host::Host;
use crate::options::ParseOptions;
use crate::step::Step;

/// Everything a pass needs besides the input and the rules: the host, the
/// options, the collection stack and recursion bookkeeping.
pub(crate) struct Session<'a, H: Host> {
    pub host: &'a mut H,
    pub interner: &'a StringInterner,
    pub options: ParseOptions,
    pub collect: CollectStack,
    /// Nesting depth of rule passes.
    pub depth: usize,
    /// Farthest input position any rule reached, for mismatch reports.
    pub farthest: usize,
    /// Index of the rule item being processed, for error reports.
    pub rule_pos: usize,
}

impl<'a, H: Host> Session<'a, H> {
    pub(crate) fn new(host: &'a mut H, interner: &'a StringInterner, options: ParseOptions) -> Self {
        Session {
            host,
            interner,
            options,
            collect: CollectStack::new(),
            depth: 0,
            farthest: 0,
            rule_pos: 0,
        }
    }

    #[inline]
    pub(crate) fn case_sensitive(&self) -> bool {
        self.options.case_sensitive
    }

    #[inline]
    pub(crate) fn note_progress(&mut self, pos: usize) {
        self.farthest = self.farthest.max(pos);
    }

    /// Evaluate embedded code, relaying a host control signal as a step.
    pub(crate) fn evaluate(&mut self, code: &Series<Value>) -> Result<Value, Step<H::Control>> {
        self.host.evaluate(code).map_err(|control| {
            tracing::trace!(?control, "host control signal");
            Step::Host(control)
        })
    }
}
