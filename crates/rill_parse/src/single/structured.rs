//! Literal rules against structured lists.

use rill_ir::{Series, Value};

use crate::cursor::SeriesCursor;
use crate::error::unsupported;
use crate::host::Host;
use crate::rules::RuleCursor;
use crate::session::Session;
use crate::step::{Step, StepResult};

impl<H: Host> Session<'_, H> {
    /// Element comparison: datatypes and typesets test the element's kind,
    /// lit-words match words, everything else compares by equivalence.
    /// Blank matches without consuming.
    pub(crate) fn match_structured<S: SeriesCursor>(
        &mut self,
        cursor: &S,
        pos: usize,
        literal: &Value,
    ) -> StepResult<H::Control> {
        let case = self.case_sensitive();
        let found = cursor
            .match_literal(pos, literal, case, self.interner)
            .map_err(|kind| self.error(kind, literal))?;
        Ok(Step::from_match(found))
    }

    /// `quote value`: the value is compared as data, never run as a rule.
    pub(crate) fn match_quoted<S: SeriesCursor>(
        &mut self,
        cursor: &S,
        pos: usize,
        value: &Value,
    ) -> StepResult<H::Control> {
        if !cursor.is_structured() {
            return self.match_scalar(cursor, pos, value);
        }
        let Some(elem) = cursor.element_value(pos) else {
            return Ok(Step::NoMatch);
        };
        let hit = elem.equivalent(value, self.case_sensitive(), self.interner);
        Ok(Step::from_match(hit.then_some(pos + 1)))
    }

    /// `into rules`: the element at `pos` must be a series the rules match
    /// completely; the outer cursor then advances by one. A `break` inside
    /// stops at the `into` boundary and counts as the inner pass's end.
    pub(crate) fn match_into<S: SeriesCursor>(
        &mut self,
        cursor: &S,
        pos: usize,
        rules: &Series<Value>,
    ) -> StepResult<H::Control> {
        if !cursor.is_structured() {
            let rule = Value::Block(rules.clone());
            let kind = unsupported(&rule, cursor.kind(), self.interner);
            return Err(self.error(kind, &rule));
        }
        let Some(inner) = cursor.element_series(pos) else {
            return Ok(Step::NoMatch);
        };
        match self.subparse_value(&inner, RuleCursor::whole(rules))? {
            (Step::Matched(end) | Step::Break(end), len) if end >= len => Ok(Step::Matched(pos + 1)),
            (Step::Matched(_) | Step::Break(_) | Step::NoMatch, _) => Ok(Step::NoMatch),
            (signal, _) => Ok(signal),
        }
    }
}
