//! Top-level driver.

use rill_ir::{StringInterner, Value};

use crate::error::{ParseError, RuleError, RuleErrorKind};
use crate::host::Host;
use crate::options::ParseOptions;
use crate::rules::RuleCursor;
use crate::session::Session;
use crate::step::Step;

/// Successful parse outcome.
#[derive(Clone, Debug, PartialEq)]
pub enum Parsed {
    /// The rules matched up to `position` (the input length when a full
    /// match is required). `collected` holds the block of an outermost bare
    /// `collect`, if one ran.
    Matched {
        position: usize,
        collected: Option<Value>,
    },
    /// An `accept` ended the parse early with this value.
    Accepted(Value),
}

/// Entry point: matches an input series against a rule block.
///
/// ```text
/// let parsed = Parser::new(&interner, &mut host)
///     .with_options(ParseOptions::default().with_case_sensitive(true))
///     .parse(&input, &rules)?;
/// ```
pub struct Parser<'a, H: Host> {
    interner: &'a StringInterner,
    host: &'a mut H,
    options: ParseOptions,
}

impl<'a, H: Host> Parser<'a, H> {
    pub fn new(interner: &'a StringInterner, host: &'a mut H) -> Self {
        Parser {
            interner,
            host,
            options: ParseOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse and classify failures as `Mismatch` or `Incomplete`.
    #[tracing::instrument(level = "debug", skip_all, fields(input = %input.kind(), case = self.options.case_sensitive))]
    pub fn parse(&mut self, input: &Value, rules: &Value) -> Result<Parsed, ParseError<H::Control>> {
        let Value::Block(rule_block) = rules else {
            let kind = RuleErrorKind::InvalidRules { kind: rules.kind() };
            return Err(RuleError::new(kind, 0, String::new()).into());
        };
        if !input.kind().is_series() {
            let kind = RuleErrorKind::InvalidInput { kind: input.kind() };
            return Err(RuleError::new(kind, 0, String::new()).into());
        }

        let mut session = Session::new(&mut *self.host, self.interner, self.options);
        let (step, length) = session.subparse_value(input, RuleCursor::whole(rule_block))?;

        let position = match step {
            Step::Matched(p) | Step::Break(p) => p,
            Step::Accept(value) => {
                tracing::debug!("parse accepted");
                return Ok(Parsed::Accepted(value));
            }
            Step::NoMatch | Step::Reject => {
                tracing::debug!(farthest = session.farthest, "parse mismatch");
                return Err(ParseError::Mismatch {
                    farthest: session.farthest,
                });
            }
            Step::Host(control) => {
                tracing::debug!("parse interrupted by host");
                return Err(ParseError::Host(control));
            }
        };

        if self.options.require_full_match && position < length {
            tracing::debug!(position, length, "parse incomplete");
            return Err(ParseError::Incomplete { position, length });
        }
        tracing::debug!(position, "parse matched");
        Ok(Parsed::Matched {
            position,
            collected: session.collect.take_result(),
        })
    }

    /// Parse with a uniform failure: `None` for any mismatch, including an
    /// incomplete one. Rule errors and host signals are still reported.
    pub fn parse_rules(&mut self, input: &Value, rules: &Value) -> Result<Option<Parsed>, ParseError<H::Control>> {
        match self.parse(input, rules) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(ParseError::Mismatch { .. } | ParseError::Incomplete { .. }) => Ok(None),
            Err(other) => Err(other),
        }
    }
}
