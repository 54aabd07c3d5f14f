//! Outcome of one matching step.

use rill_ir::Value;

use crate::error::RuleError;

/// What a rule, a loop or a whole pass produced.
///
/// Every frame returns a `Step`; the early-exit variants are relayed upward
/// until the frame entitled to catch them sees them:
///
/// | Variant | Caught by |
/// |---------|-----------|
/// | `Matched` / `NoMatch` | the caller, immediately |
/// | `Reject` / `Break` | the nearest iterated quantifier loop |
/// | `Accept` | the top-level driver |
/// | `Host` | nobody; surfaces past the driver |
#[derive(Debug)]
pub(crate) enum Step<C> {
    Matched(usize),
    NoMatch,
    Accept(Value),
    Reject,
    Break(usize),
    Host(C),
}

/// Rule-definition errors travel beside the step, never inside it.
pub(crate) type StepResult<C> = Result<Step<C>, RuleError>;

impl<C> Step<C> {
    /// `Matched` at the end position of a literal test, or `NoMatch`.
    #[inline]
    pub(crate) fn from_match(found: Option<usize>) -> Self {
        match found {
            Some(p) => Step::Matched(p),
            None => Step::NoMatch,
        }
    }
}
