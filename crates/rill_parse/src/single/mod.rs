//! Single-rule matcher.
//!
//! Attempts one resolved rule at one position. Rules that behave the same on
//! every input kind (keywords, nested blocks, code, logic) are handled here;
//! literal matching is split between [`structured`] and [`scalar`], which
//! share one contract: `Matched(end)`, `NoMatch`, or a relayed signal.

mod scalar;
mod structured;

use rill_ir::Value;

use crate::cursor::SeriesCursor;
use crate::error::invalid_rule;
use crate::host::Host;
use crate::rules::{Rule, RuleCursor};
use crate::session::Session;
use crate::step::{Step, StepResult};

/// Limit on `:(code)` results that produce further `:(code)` rules.
const MAX_INJECTION: usize = 16;

impl<H: Host> Session<'_, H> {
    pub(crate) fn match_rule<S: SeriesCursor>(
        &mut self,
        cursor: &S,
        pos: usize,
        rule: &Rule,
    ) -> StepResult<H::Control> {
        self.match_rule_injected(cursor, pos, rule, 0)
    }

    fn match_rule_injected<S: SeriesCursor>(
        &mut self,
        cursor: &S,
        pos: usize,
        rule: &Rule,
        injected: usize,
    ) -> StepResult<H::Control> {
        let pos = cursor.clamp(pos);
        let len = cursor.len();
        match rule {
            Rule::Skip => Ok(Step::from_match((pos < len).then_some(pos + 1))),
            Rule::End => Ok(Step::from_match((pos >= len).then_some(pos))),
            Rule::Fail => Ok(Step::NoMatch),
            Rule::Succeed => Ok(Step::Matched(pos)),
            Rule::To(target) => self.scan(cursor, pos, target, false),
            Rule::Thru(target) => self.scan(cursor, pos, target, true),
            Rule::Into(rules) => self.match_into(cursor, pos, rules),
            Rule::Quote(value) => self.match_quoted(cursor, pos, value),
            Rule::Value(value) => match value {
                Value::Block(s) => self.subparse(cursor, pos, RuleCursor::whole(s)),
                Value::Group(code) => Ok(match self.evaluate(code) {
                    Ok(_) => Step::Matched(cursor.clamp(pos)),
                    Err(signal) => signal,
                }),
                Value::GetGroup(code) => {
                    if injected >= MAX_INJECTION {
                        return Err(self.error(invalid_rule(value, self.interner), value));
                    }
                    let result = match self.evaluate(code) {
                        Ok(result) => result,
                        Err(signal) => return Ok(signal),
                    };
                    let injected_rule = self.to_rule(result)?;
                    self.match_rule_injected(cursor, pos, &injected_rule, injected + 1)
                }
                Value::Logic(true) | Value::None => Ok(Step::Matched(pos)),
                Value::Logic(false) => Ok(Step::NoMatch),
                Value::Word(_) | Value::SetWord(_) | Value::GetWord(_) | Value::Native(_) => {
                    Err(self.error(invalid_rule(value, self.interner), value))
                }
                literal => {
                    if cursor.is_structured() {
                        self.match_structured(cursor, pos, literal)
                    } else {
                        self.match_scalar(cursor, pos, literal)
                    }
                }
            },
        }
    }
}
