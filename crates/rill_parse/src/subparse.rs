//! Subparse recursion controller.
//!
//! One pass over a rule block range:
//!
//! ```text
//! fetch item -> resolve -> modifier? (accumulate, fetch again)
//!            -> terminal -> quantifier loop -> post-match
//!            -> failed?  -> next `|` (reset input, roll back collect) | NoMatch
//!            -> `|` or end of rules -> Matched
//! ```
//!
//! Instant items (set-words, get-words, code groups, `if`, `insert`,
//! `accept`, `reject`, `break`) complete without a loop. Every nested pass
//! goes through [`Session::subparse`], which enforces the depth limit and
//! grows the stack.

use rill_ir::{Keyword, Kind, Name, Series, Value};
use tracing::trace;

use crate::cursor::{BlockCursor, ScalarCursor, SeriesCursor};
use crate::error::{invalid_rule, RuleError, RuleErrorKind};
use crate::host::Host;
use crate::rules::{is_bar, keyword_of, Rule, RuleCursor};
use crate::session::Session;
use crate::stack::ensure_sufficient_stack;
use crate::state::{CollectTarget, MatchFlags, MatchState, Replacement};
use crate::step::{Step, StepResult};

/// What a keyword contributed to the item being assembled.
enum KeywordAction<C> {
    /// Accumulated onto the state; fetch the next item.
    Modifier,
    /// The terminal rule the accumulated state applies to.
    Terminal(Rule),
    /// The item completed by itself.
    Done(Step<C>),
}

impl<H: Host> Session<'_, H> {
    /// Run one nested pass of `rules` over the input at `start`.
    pub(crate) fn subparse<S: SeriesCursor>(
        &mut self,
        cursor: &S,
        start: usize,
        rules: RuleCursor,
    ) -> StepResult<H::Control> {
        if self.depth >= self.options.max_depth {
            let limit = self.options.max_depth;
            let near = rules.peek().unwrap_or(Value::None);
            return Err(self.error(RuleErrorKind::RecursionLimit { limit }, &near));
        }
        self.depth += 1;
        let result = ensure_sufficient_stack(|| self.run_pass(cursor, start, rules));
        self.depth -= 1;
        result
    }

    /// Run a pass over any series value, dispatching on its kind.
    ///
    /// Returns the step together with the input length after the pass.
    pub(crate) fn subparse_value(
        &mut self,
        input: &Value,
        rules: RuleCursor,
    ) -> Result<(Step<H::Control>, usize), RuleError> {
        match input {
            Value::Block(s) | Value::Group(s) | Value::GetGroup(s) => {
                let cursor = BlockCursor::new(s.clone(), input.kind());
                let step = self.subparse(&cursor, s.index(), rules)?;
                Ok((step, cursor.len()))
            }
            Value::Text(s) | Value::Tag(s) => {
                let cursor = ScalarCursor::new(s.clone(), input.kind());
                let step = self.subparse(&cursor, s.index(), rules)?;
                Ok((step, cursor.len()))
            }
            Value::Binary(s) => {
                let cursor = ScalarCursor::new(s.clone(), Kind::Binary);
                let step = self.subparse(&cursor, s.index(), rules)?;
                Ok((step, cursor.len()))
            }
            other => Err(self.error(RuleErrorKind::InvalidInput { kind: other.kind() }, other)),
        }
    }

    #[tracing::instrument(level = "trace", skip_all, fields(start = start, depth = self.depth))]
    fn run_pass<S: SeriesCursor>(
        &mut self,
        cursor: &S,
        start: usize,
        mut rules: RuleCursor,
    ) -> StepResult<H::Control> {
        let mark = self.collect.mark();
        let mut pos = cursor.clamp(start);
        loop {
            if let Err(control) = self.host.checkpoint() {
                trace!(?control, "checkpoint raised a control signal");
                return Ok(Step::Host(control));
            }
            pos = cursor.clamp(pos);

            match rules.peek() {
                None => return Ok(Step::Matched(pos)),
                Some(item) if is_bar(&item) => return Ok(Step::Matched(pos)),
                Some(_) => {}
            }

            match self.match_item(cursor, pos, &mut rules)? {
                Step::Matched(p) => {
                    pos = cursor.clamp(p);
                    self.note_progress(pos);
                }
                Step::NoMatch => {
                    self.collect.truncate(mark);
                    if !rules.skip_alternative() {
                        return Ok(Step::NoMatch);
                    }
                    trace!(start, "alternative failed, trying the next one");
                    pos = start;
                }
                Step::Reject => {
                    self.collect.truncate(mark);
                    return Ok(Step::Reject);
                }
                signal => return Ok(signal),
            }
        }
    }

    /// Assemble one item (modifiers plus terminal) and match it at `pos`.
    fn match_item<S: SeriesCursor>(
        &mut self,
        cursor: &S,
        pos: usize,
        rules: &mut RuleCursor,
    ) -> StepResult<H::Control> {
        let mut state = MatchState::new(pos);
        let mut last: &'static str = "";

        let rule = loop {
            if state.has_modifiers() && rules.at_boundary() {
                return Err(self.unexpected_end(last, rules));
            }
            self.rule_pos = rules.position();
            let Some(item) = rules.next() else {
                return Err(self.unexpected_end(last, rules));
            };

            match item {
                Value::Word(name) => {
                    if let Some(keyword) = Keyword::from_name(name) {
                        last = keyword.as_str();
                        match self.apply_keyword(keyword, cursor, pos, &mut state, rules)? {
                            KeywordAction::Modifier => continue,
                            KeywordAction::Terminal(rule) => break rule,
                            KeywordAction::Done(step) => return Ok(step),
                        }
                    }
                    let resolved = self.resolve_word(name)?;
                    if let Value::Integer(n) = resolved {
                        last = "integer";
                        self.apply_count(n, &item, &mut state, rules)?;
                        continue;
                    }
                    break self.to_rule(resolved)?;
                }
                Value::Integer(n) => {
                    last = "integer";
                    self.apply_count(n, &item, &mut state, rules)?;
                }
                Value::SetWord(name) => {
                    self.instant_guard(&state, "set-word", &item)?;
                    self.host.set(name, cursor.value_at(pos));
                    return Ok(Step::Matched(pos));
                }
                Value::GetWord(name) => {
                    self.instant_guard(&state, "get-word", &item)?;
                    return self.reposition(cursor, name, &item);
                }
                Value::Group(code) if !state.has_modifiers() => {
                    return Ok(match self.evaluate(&code) {
                        Ok(_) => Step::Matched(cursor.clamp(pos)),
                        Err(signal) => signal,
                    });
                }
                other => break self.to_rule(other)?,
            }
        };

        if state.has(MatchFlags::CHANGE) {
            state.replacement = Some(self.fetch_replacement(rules, Keyword::Change)?);
        }
        if state.has(MatchFlags::COLLECT) {
            self.collect.open();
        }
        if state.has(MatchFlags::KEEP) && !self.collect.is_active() {
            return Err(self.error(RuleErrorKind::KeepOutsideCollect, &Value::Word(Keyword::Keep.name())));
        }

        let step = match &rule {
            Rule::Value(Value::Group(code)) if state.has(MatchFlags::KEEP) => {
                let step = self.keep_code(code, state.has(MatchFlags::ONLY), pos)?;
                state.flags.remove(MatchFlags::KEEP);
                step
            }
            _ => self.repeat(cursor, pos, &rule, &state)?,
        };
        self.finish(cursor, step, &state)
    }

    fn apply_keyword<S: SeriesCursor>(
        &mut self,
        keyword: Keyword,
        cursor: &S,
        pos: usize,
        state: &mut MatchState,
        rules: &mut RuleCursor,
    ) -> Result<KeywordAction<H::Control>, RuleError> {
        let action = match keyword {
            Keyword::Bar => return Err(self.unexpected_end("|", rules)),

            // Quantifiers
            Keyword::Some => {
                self.set_bounds(state, 1, usize::MAX, keyword)?;
                state.flags.insert(MatchFlags::MUST_ADVANCE);
                KeywordAction::Modifier
            }
            Keyword::Any => {
                self.set_bounds(state, 0, usize::MAX, keyword)?;
                KeywordAction::Modifier
            }
            Keyword::While => {
                self.set_bounds(state, 0, usize::MAX, keyword)?;
                state.flags.insert(MatchFlags::WHILE);
                KeywordAction::Modifier
            }
            Keyword::Opt | Keyword::Maybe => {
                state.flags.insert(MatchFlags::OPT);
                KeywordAction::Modifier
            }
            Keyword::Further => {
                state.flags.insert(MatchFlags::MUST_ADVANCE);
                KeywordAction::Modifier
            }

            // Captures
            Keyword::Set | Keyword::Copy | Keyword::Across => {
                if state.target.is_some() {
                    return Err(self.nested(keyword));
                }
                state.target = Some(self.fetch_target(rules, keyword)?);
                state.flags.insert(if keyword == Keyword::Set {
                    MatchFlags::SET
                } else {
                    MatchFlags::COPY
                });
                KeywordAction::Modifier
            }

            // Negation and lookahead
            Keyword::Not => {
                state.toggle_not();
                KeywordAction::Modifier
            }
            Keyword::Ahead => {
                state.flags.insert(MatchFlags::AHEAD);
                KeywordAction::Modifier
            }
            Keyword::And => {
                if !self.options.is_redbol() {
                    return Err(self.error(RuleErrorKind::UseAhead, &Value::Word(keyword.name())));
                }
                state.flags.insert(MatchFlags::AHEAD);
                KeywordAction::Modifier
            }

            // Mutation
            Keyword::Remove => {
                state.flags.insert(MatchFlags::REMOVE);
                KeywordAction::Modifier
            }
            Keyword::Change => {
                state.flags.insert(MatchFlags::CHANGE);
                KeywordAction::Modifier
            }
            Keyword::Only => {
                state.flags.insert(MatchFlags::ONLY);
                KeywordAction::Modifier
            }
            Keyword::Insert => {
                if state.has_modifiers() {
                    return Err(self.nested(keyword));
                }
                KeywordAction::Done(self.insert(cursor, pos, rules)?)
            }
            Keyword::Dup => return Err(self.nested(keyword)),

            // Collection
            Keyword::Collect => {
                if state.has(MatchFlags::COLLECT) {
                    return Err(self.nested(keyword));
                }
                state.flags.insert(MatchFlags::COLLECT);
                state.collect = self.fetch_collect_target(rules)?;
                KeywordAction::Modifier
            }
            Keyword::Keep => {
                state.flags.insert(MatchFlags::KEEP);
                KeywordAction::Modifier
            }

            // Control
            Keyword::Accept => KeywordAction::Done(self.accept(cursor, pos, rules)?),
            Keyword::Reject => {
                trace!(pos, "reject");
                KeywordAction::Done(Step::Reject)
            }
            Keyword::Break => {
                trace!(pos, "break");
                KeywordAction::Done(Step::Break(pos))
            }
            Keyword::If => KeywordAction::Done(self.if_code(cursor, pos, rules)?),

            // Terminals
            Keyword::Fail => KeywordAction::Terminal(Rule::Fail),
            Keyword::Skip => KeywordAction::Terminal(Rule::Skip),
            Keyword::End => KeywordAction::Terminal(Rule::End),
            Keyword::None => KeywordAction::Terminal(Rule::Succeed),
            Keyword::To => KeywordAction::Terminal(Rule::To(Box::new(self.fetch_rule_param(rules, keyword)?))),
            Keyword::Thru => {
                KeywordAction::Terminal(Rule::Thru(Box::new(self.fetch_rule_param(rules, keyword)?)))
            }
            Keyword::Into => KeywordAction::Terminal(self.fetch_into(rules)?),
            Keyword::Quote => {
                if rules.at_boundary() {
                    return Err(self.unexpected_end("quote", rules));
                }
                self.rule_pos = rules.position();
                match rules.next() {
                    Some(value) => KeywordAction::Terminal(Rule::Quote(value)),
                    None => return Err(self.unexpected_end("quote", rules)),
                }
            }
        };
        Ok(action)
    }

    fn nested(&self, keyword: Keyword) -> RuleError {
        self.error(
            RuleErrorKind::NestedModifier {
                keyword: keyword.as_str(),
            },
            &Value::Word(keyword.name()),
        )
    }

    fn set_bounds(&self, state: &mut MatchState, min: usize, max: usize, keyword: Keyword) -> Result<(), RuleError> {
        if state.has(MatchFlags::BOUNDED) {
            return Err(self.nested(keyword));
        }
        state.min = min;
        state.max = max;
        state.flags.insert(MatchFlags::BOUNDED);
        Ok(())
    }

    /// `n` or `n m` repetition counts.
    fn apply_count(
        &mut self,
        n: i64,
        item: &Value,
        state: &mut MatchState,
        rules: &mut RuleCursor,
    ) -> Result<(), RuleError> {
        if state.has(MatchFlags::BOUNDED) {
            return Err(self.error(RuleErrorKind::NestedModifier { keyword: "integer" }, item));
        }
        let min = self.count_value(n, item)?;
        let max = match rules.peek() {
            Some(Value::Integer(m)) => {
                rules.next();
                self.count_value(m, &Value::Integer(m))?
            }
            _ => min,
        };
        state.min = min;
        state.max = max.max(min);
        state.flags.insert(MatchFlags::BOUNDED);
        Ok(())
    }

    fn count_value(&self, n: i64, item: &Value) -> Result<usize, RuleError> {
        usize::try_from(n).map_err(|_| self.error(invalid_rule(item, self.interner), item))
    }

    fn instant_guard(&self, state: &MatchState, what: &'static str, item: &Value) -> Result<(), RuleError> {
        if state.has_modifiers() {
            return Err(self.error(RuleErrorKind::NestedModifier { keyword: what }, item));
        }
        Ok(())
    }

    /// The word after `set` / `copy`.
    fn fetch_target(&mut self, rules: &mut RuleCursor, keyword: Keyword) -> Result<Name, RuleError> {
        self.rule_pos = rules.position();
        match rules.next() {
            Some(Value::Word(name)) if Keyword::from_name(name).is_none() => Ok(name),
            Some(other) => Err(self.error(
                RuleErrorKind::InvalidCaptureTarget {
                    keyword: keyword.as_str(),
                },
                &other,
            )),
            None => Err(self.unexpected_end(keyword.as_str(), rules)),
        }
    }

    /// Optional `set x` / `into x` after `collect`.
    fn fetch_collect_target(&mut self, rules: &mut RuleCursor) -> Result<CollectTarget, RuleError> {
        let form = match rules.peek().as_ref().and_then(keyword_of) {
            Some(Keyword::Set) => Keyword::Set,
            Some(Keyword::Into) => Keyword::Into,
            _ => return Ok(CollectTarget::Enclosing),
        };
        rules.next();
        let name = self.fetch_target(rules, form)?;
        Ok(if form == Keyword::Set {
            CollectTarget::Set(name)
        } else {
            CollectTarget::Into(name)
        })
    }

    fn fetch_into(&mut self, rules: &mut RuleCursor) -> Result<Rule, RuleError> {
        if rules.at_boundary() {
            return Err(self.unexpected_end("into", rules));
        }
        self.rule_pos = rules.position();
        let Some(item) = rules.next() else {
            return Err(self.unexpected_end("into", rules));
        };
        let resolved = match item {
            Value::Word(name) if Keyword::from_name(name).is_none() => self.resolve_word(name)?,
            other => other,
        };
        match resolved {
            Value::Block(s) => Ok(Rule::Into(s)),
            other => Err(self.error(invalid_rule(&other, self.interner), &other)),
        }
    }

    /// `[only] [dup n] value` after `insert` or after the rule of `change`.
    pub(crate) fn fetch_replacement(
        &mut self,
        rules: &mut RuleCursor,
        after: Keyword,
    ) -> Result<Replacement, RuleError> {
        let mut only = false;
        let mut dup = 1;
        loop {
            match rules.peek().as_ref().and_then(keyword_of) {
                Some(Keyword::Only) => {
                    rules.next();
                    only = true;
                }
                Some(Keyword::Dup) => {
                    rules.next();
                    self.rule_pos = rules.position();
                    let count = match rules.next() {
                        Some(Value::Integer(n)) => n,
                        Some(Value::Word(name)) if Keyword::from_name(name).is_none() => {
                            match self.resolve_word(name)? {
                                Value::Integer(n) => n,
                                other => return Err(self.error(invalid_rule(&other, self.interner), &other)),
                            }
                        }
                        Some(other) => return Err(self.error(invalid_rule(&other, self.interner), &other)),
                        None => return Err(self.unexpected_end("dup", rules)),
                    };
                    dup = usize::try_from(count).unwrap_or(0);
                }
                _ => break,
            }
        }
        if rules.at_boundary() {
            return Err(self.unexpected_end(after.as_str(), rules));
        }
        self.rule_pos = rules.position();
        match rules.next() {
            Some(item) => Ok(Replacement { item, only, dup }),
            None => Err(self.unexpected_end(after.as_str(), rules)),
        }
    }

    /// The value a mutation inserts: groups are evaluated, words fetched,
    /// anything else taken literally.
    pub(crate) fn mutation_value(&mut self, item: &Value) -> Result<Result<Value, Step<H::Control>>, RuleError> {
        match item {
            Value::Group(code) => Ok(self.evaluate(code)),
            Value::Word(name) if Keyword::from_name(*name).is_none() => match self.host.get(*name) {
                Some(value) => Ok(Ok(value)),
                None => {
                    let word = self.interner.lookup(*name).to_owned();
                    Err(self.error(RuleErrorKind::UndefinedRule { word }, item))
                }
            },
            other => Ok(Ok(other.clone())),
        }
    }

    fn insert<S: SeriesCursor>(&mut self, cursor: &S, pos: usize, rules: &mut RuleCursor) -> StepResult<H::Control> {
        let replacement = self.fetch_replacement(rules, Keyword::Insert)?;
        let value = match self.mutation_value(&replacement.item)? {
            Ok(value) => value,
            Err(signal) => return Ok(signal),
        };
        let pos = cursor.clamp(pos);
        let inserted = cursor
            .splice(pos, 0, &value, replacement.only, replacement.dup, self.interner)
            .map_err(|kind| self.error(kind, &value))?;
        Ok(Step::Matched(pos + inserted))
    }

    /// `accept`, with an optional value from a following group, word or literal.
    fn accept<S: SeriesCursor>(&mut self, cursor: &S, pos: usize, rules: &mut RuleCursor) -> StepResult<H::Control> {
        let bare = match rules.peek() {
            None => true,
            Some(item) => keyword_of(&item).is_some(),
        };
        let value = if bare {
            cursor.value_at(cursor.clamp(pos))
        } else {
            self.rule_pos = rules.position();
            let item = rules.next().unwrap_or(Value::None);
            match self.mutation_value(&item)? {
                Ok(value) => value,
                Err(signal) => return Ok(signal),
            }
        };
        trace!(pos, "accept");
        Ok(Step::Accept(value))
    }

    /// `if (code)`: fail the alternative when the result is falsey.
    fn if_code<S: SeriesCursor>(&mut self, cursor: &S, pos: usize, rules: &mut RuleCursor) -> StepResult<H::Control> {
        self.rule_pos = rules.position();
        let code = match rules.next() {
            Some(Value::Group(code)) => code,
            Some(other) => return Err(self.error(invalid_rule(&other, self.interner), &other)),
            None => return Err(self.unexpected_end("if", rules)),
        };
        Ok(match self.evaluate(&code) {
            Ok(result) if result.is_truthy() => Step::Matched(cursor.clamp(pos)),
            Ok(_) => Step::NoMatch,
            Err(signal) => signal,
        })
    }

    /// `:x` moves the cursor to the position saved in `x`.
    fn reposition<S: SeriesCursor>(&mut self, cursor: &S, name: Name, item: &Value) -> StepResult<H::Control> {
        let here = cursor.value_at(0);
        match self.host.get(name) {
            Some(saved) if saved.same_series(&here) => {
                let index = saved.series_index().unwrap_or(0);
                Ok(Step::Matched(cursor.clamp(index)))
            }
            _ => {
                let word = self.interner.lookup(name).to_owned();
                Err(self.error(RuleErrorKind::BadReposition { word }, item))
            }
        }
    }

    /// `keep (code)`: append the evaluated result to the innermost buffer.
    fn keep_code(&mut self, code: &Series<Value>, only: bool, pos: usize) -> StepResult<H::Control> {
        let value = match self.evaluate(code) {
            Ok(value) => value,
            Err(signal) => return Ok(signal),
        };
        match value {
            Value::Block(s) if !only => {
                for item in s.to_vec() {
                    self.keep(item)?;
                }
            }
            other => self.keep(other)?,
        }
        Ok(Step::Matched(pos))
    }
}
