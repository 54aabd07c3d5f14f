//! Post-match processing.
//!
//! Applied to the loop's outcome, in order: negate, keep, close `collect`,
//! capture, remove, change, lookahead. A `keep` on the same item as
//! `collect` lands in that item's own buffer. Signals other than
//! `Matched` / `NoMatch` pass straight through, after the `collect` buffer
//! opened for this item has been popped.

use rill_ir::{Keyword, Value};

use crate::cursor::SeriesCursor;
use crate::error::{RuleError, RuleErrorKind};
use crate::host::Host;
use crate::session::Session;
use crate::state::{CollectTarget, MatchFlags, MatchState};
use crate::step::{Step, StepResult};

impl<H: Host> Session<'_, H> {
    pub(crate) fn finish<S: SeriesCursor>(
        &mut self,
        cursor: &S,
        step: Step<H::Control>,
        state: &MatchState,
    ) -> StepResult<H::Control> {
        let begin = state.begin;

        let step = if state.has(MatchFlags::NOT) {
            match step {
                Step::Matched(_) => Step::NoMatch,
                Step::NoMatch => Step::Matched(begin),
                signal => signal,
            }
        } else {
            step
        };

        if let Step::Matched(end) = step {
            if state.has(MatchFlags::KEEP) {
                let end = cursor.clamp(end);
                for value in cursor.keep_values(begin.min(end), end, state.has(MatchFlags::ONLY)) {
                    self.keep(value)?;
                }
            }
        }

        if state.has(MatchFlags::COLLECT) {
            let buffer = self.collect.close().unwrap_or_default();
            if matches!(step, Step::Matched(_)) {
                self.deliver_collect(state.collect, buffer)?;
            }
        }

        let Step::Matched(end) = step else {
            return Ok(step);
        };
        let mut end = cursor.clamp(end);
        let begin = begin.min(end);

        if let Some(target) = state.target {
            if state.has(MatchFlags::COPY) {
                self.host.set(target, cursor.slice_value(begin, end));
            } else if end > begin {
                if let Some(first) = cursor.element_value(begin) {
                    self.host.set(target, first);
                }
            } else if state.has(MatchFlags::OPT) || self.options.is_redbol() {
                self.host.set(target, Value::None);
            }
        }

        if state.has(MatchFlags::REMOVE) {
            cursor.remove(begin, end);
            end = begin;
        }

        if let Some(replacement) = state.replacement.as_ref().filter(|_| state.has(MatchFlags::CHANGE)) {
            let value = match self.mutation_value(&replacement.item)? {
                Ok(value) => value,
                Err(signal) => return Ok(signal),
            };
            let only = replacement.only || state.has(MatchFlags::ONLY);
            let inserted = cursor
                .splice(begin, end - begin, &value, only, replacement.dup, self.interner)
                .map_err(|kind| self.error(kind, &value))?;
            end = begin + inserted;
        }

        if state.has(MatchFlags::AHEAD) {
            end = begin;
        }

        Ok(Step::Matched(cursor.clamp(end)))
    }

    /// Append to the innermost open `collect` buffer.
    pub(crate) fn keep(&mut self, value: Value) -> Result<(), RuleError> {
        if self.collect.push(value) {
            Ok(())
        } else {
            Err(self.error(RuleErrorKind::KeepOutsideCollect, &Value::Word(Keyword::Keep.name())))
        }
    }

    fn deliver_collect(&mut self, target: CollectTarget, buffer: Vec<Value>) -> Result<(), RuleError> {
        match target {
            CollectTarget::Enclosing => self.collect.deliver(Value::block(buffer)),
            CollectTarget::Set(name) => self.host.set(name, Value::block(buffer)),
            CollectTarget::Into(name) => match self.host.get(name) {
                Some(Value::Block(series)) => {
                    series.splice(series.index(), 0, buffer);
                }
                other => {
                    let near = other.unwrap_or(Value::Word(name));
                    return Err(self.error(
                        RuleErrorKind::InvalidCaptureTarget {
                            keyword: "collect into",
                        },
                        &near,
                    ));
                }
            },
        }
        Ok(())
    }
}
