//! Forward scanning for `to` / `thru`.

use rill_ir::{Keyword, Series, Value};
use smallvec::SmallVec;

use crate::cursor::{Search, SeriesCursor};
use crate::host::Host;
use crate::rules::{keyword_of, Rule, RuleCursor};
use crate::session::Session;
use crate::step::{Step, StepResult};

/// One `|`-separated branch of a block scan target.
enum Branch {
    /// `end`: succeeds only at the end of input.
    End,
    /// A single literal, matched directly.
    Literal(Rule),
    /// Anything else: a nested pass over `[begin, end)`.
    Rules(usize, usize),
}

fn is_plain_literal(value: &Value) -> bool {
    !matches!(
        value,
        Value::Word(_)
            | Value::SetWord(_)
            | Value::GetWord(_)
            | Value::Block(_)
            | Value::Group(_)
            | Value::GetGroup(_)
            | Value::Integer(_)
    )
}

impl<H: Host> Session<'_, H> {
    /// Scan forward from `pos` for `target`. `to` stops before the match,
    /// `thru` after it.
    pub(crate) fn scan<S: SeriesCursor>(
        &mut self,
        cursor: &S,
        pos: usize,
        target: &Rule,
        thru: bool,
    ) -> StepResult<H::Control> {
        match target {
            Rule::End => return Ok(Step::Matched(cursor.len())),
            Rule::Value(Value::Block(rules)) => return self.scan_branches(cursor, pos, rules, thru),
            Rule::Value(literal) if !cursor.is_structured() => {
                match cursor.find(pos, literal, self.case_sensitive(), self.interner) {
                    Search::Found { at, end } => {
                        return Ok(Step::Matched(if thru { end } else { at }));
                    }
                    Search::NotFound => return Ok(Step::NoMatch),
                    Search::Unsupported => {}
                }
            }
            _ => {}
        }

        let mut candidate = pos;
        while candidate <= cursor.len() {
            match self.match_rule(cursor, candidate, target)? {
                Step::Matched(end) => return Ok(Step::Matched(if thru { end } else { candidate })),
                Step::NoMatch => candidate += 1,
                signal => return Ok(signal),
            }
        }
        Ok(Step::NoMatch)
    }

    /// Scan for the first position where any branch of `rules` matches,
    /// trying branches in order at each candidate.
    fn scan_branches<S: SeriesCursor>(
        &mut self,
        cursor: &S,
        pos: usize,
        rules: &Series<Value>,
        thru: bool,
    ) -> StepResult<H::Control> {
        let whole = RuleCursor::whole(rules);
        let mut branches: SmallVec<[Branch; 4]> = SmallVec::new();
        for (begin, end) in whole.branches() {
            let single = if end == begin + 1 { whole.get(begin) } else { None };
            let branch = match single {
                Some(item) if keyword_of(&item) == Some(Keyword::End) => Branch::End,
                Some(item) if is_plain_literal(&item) => match self.to_rule(item)? {
                    Rule::End => Branch::End,
                    rule => Branch::Literal(rule),
                },
                _ => Branch::Rules(begin, end),
            };
            branches.push(branch);
        }

        let mut candidate = pos;
        while candidate <= cursor.len() {
            for branch in &branches {
                let step = match branch {
                    Branch::End => {
                        let len = cursor.len();
                        Step::from_match((candidate >= len).then_some(len))
                    }
                    Branch::Literal(rule) => self.match_rule(cursor, candidate, rule)?,
                    Branch::Rules(begin, end) => self.subparse(cursor, candidate, whole.range(*begin, *end))?,
                };
                match step {
                    Step::Matched(end) => return Ok(Step::Matched(if thru { end } else { candidate })),
                    Step::NoMatch => {}
                    signal => return Ok(signal),
                }
            }
            candidate += 1;
        }
        Ok(Step::NoMatch)
    }
}
