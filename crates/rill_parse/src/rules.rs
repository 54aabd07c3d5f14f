//! Rule cursor and indirection resolution.
//!
//! Rule blocks are walked by index over a `[begin, end)` range of their
//! series, so a `|`-separated branch can be run as a pass of its own without
//! copying. Words are resolved through the host's variable store until a
//! non-word value appears; the result is classified into a [`Rule`].

use rill_ir::{Keyword, Name, Series, Value};
use smallvec::SmallVec;

use crate::error::{excerpt, invalid_rule, RuleError, RuleErrorKind};
use crate::host::Host;
use crate::session::Session;

/// Limit on word-to-word indirection chains.
const MAX_INDIRECTION: usize = 16;

/// A resolved terminal rule.
#[derive(Clone, Debug)]
pub(crate) enum Rule {
    /// A literal, a nested rule block, or embedded code.
    Value(Value),
    /// `skip`, `<any>`
    Skip,
    /// `end`, `<end>`
    End,
    Fail,
    /// `none`, `<here>`: zero width, always matches.
    Succeed,
    To(Box<Rule>),
    Thru(Box<Rule>),
    /// `into [rules]`
    Into(Series<Value>),
    /// `quote value`: match the value literally.
    Quote(Value),
}

#[inline]
pub(crate) fn keyword_of(value: &Value) -> Option<Keyword> {
    match value {
        Value::Word(name) => Keyword::from_name(*name),
        _ => None,
    }
}

#[inline]
pub(crate) fn is_bar(value: &Value) -> bool {
    keyword_of(value) == Some(Keyword::Bar)
}

/// Map tags with a rule meaning onto their rules.
fn tag_rule(value: &Value) -> Option<Rule> {
    let Value::Tag(s) = value else {
        return None;
    };
    match s.to_text().as_str() {
        "end" => Some(Rule::End),
        "here" => Some(Rule::Succeed),
        "any" => Some(Rule::Skip),
        _ => None,
    }
}

/// Walks one rule block range.
#[derive(Clone, Debug)]
pub(crate) struct RuleCursor {
    series: Series<Value>,
    pos: usize,
    end: usize,
}

impl RuleCursor {
    pub(crate) fn new(series: Series<Value>, begin: usize, end: usize) -> Self {
        RuleCursor {
            series,
            pos: begin,
            end,
        }
    }

    /// The whole block from its head index.
    pub(crate) fn whole(series: &Series<Value>) -> Self {
        RuleCursor::new(series.clone(), series.index(), series.len())
    }

    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn limit(&self) -> usize {
        self.end.min(self.series.len())
    }

    pub(crate) fn peek(&self) -> Option<Value> {
        if self.pos < self.limit() {
            self.series.get(self.pos)
        } else {
            None
        }
    }

    pub(crate) fn next(&mut self) -> Option<Value> {
        let item = self.peek()?;
        self.pos += 1;
        Some(item)
    }

    /// True at the end of the range or at a `|`.
    pub(crate) fn at_boundary(&self) -> bool {
        match self.peek() {
            Some(item) => is_bar(&item),
            None => true,
        }
    }

    /// Skip past the next `|` at this level. Returns false if there is none.
    pub(crate) fn skip_alternative(&mut self) -> bool {
        while let Some(item) = self.next() {
            if is_bar(&item) {
                return true;
            }
        }
        false
    }

    /// Ranges of the `|`-separated branches of the remaining items.
    pub(crate) fn branches(&self) -> SmallVec<[(usize, usize); 4]> {
        let mut out = SmallVec::new();
        let limit = self.limit();
        let mut begin = self.pos;
        for i in self.pos..limit {
            if self.series.get(i).is_some_and(|v| is_bar(&v)) {
                out.push((begin, i));
                begin = i + 1;
            }
        }
        out.push((begin, limit));
        out
    }

    /// A cursor over `[begin, end)` of the same block.
    pub(crate) fn range(&self, begin: usize, end: usize) -> Self {
        RuleCursor::new(self.series.clone(), begin, end)
    }

    pub(crate) fn get(&self, index: usize) -> Option<Value> {
        self.series.get(index)
    }
}

impl<H: Host> Session<'_, H> {
    /// Build a rule error located at the item being processed.
    pub(crate) fn error(&self, kind: RuleErrorKind, near: &Value) -> RuleError {
        tracing::debug!(position = self.rule_pos, %kind, "rule error");
        RuleError::new(kind, self.rule_pos, excerpt(near, self.interner))
    }

    /// Follow a word through the variable store to a non-word value.
    pub(crate) fn resolve_word(&self, name: Name) -> Result<Value, RuleError> {
        let mut current = name;
        for _ in 0..MAX_INDIRECTION {
            match self.host.get(current) {
                Some(Value::Word(next)) if Keyword::from_name(next).is_none() => current = next,
                Some(value) => return Ok(value),
                None => {
                    let word = self.interner.lookup(current).to_owned();
                    return Err(self.error(RuleErrorKind::UndefinedRule { word }, &Value::Word(name)));
                }
            }
        }
        Err(self.error(invalid_rule(&Value::Word(name), self.interner), &Value::Word(name)))
    }

    /// Classify a value (already fetched, possibly resolved) as a terminal.
    pub(crate) fn to_rule(&self, value: Value) -> Result<Rule, RuleError> {
        if let Some(rule) = tag_rule(&value) {
            return Ok(rule);
        }
        match value {
            Value::Word(name) => match Keyword::from_name(name) {
                Some(Keyword::Skip) => Ok(Rule::Skip),
                Some(Keyword::End) => Ok(Rule::End),
                Some(Keyword::Fail) => Ok(Rule::Fail),
                Some(Keyword::None) => Ok(Rule::Succeed),
                Some(_) => Err(self.error(invalid_rule(&value, self.interner), &value)),
                None => {
                    let resolved = self.resolve_word(name)?;
                    if matches!(resolved, Value::Word(_)) {
                        return self.to_rule(resolved);
                    }
                    Ok(Rule::Value(resolved))
                }
            },
            Value::None => Ok(Rule::Succeed),
            other => Ok(Rule::Value(other)),
        }
    }

    /// Fetch the parameter of `to` / `thru`.
    pub(crate) fn fetch_rule_param(&mut self, rules: &mut RuleCursor, after: Keyword) -> Result<Rule, RuleError> {
        if rules.at_boundary() {
            return Err(self.unexpected_end(after.as_str(), rules));
        }
        self.rule_pos = rules.position();
        match rules.next() {
            Some(value) => self.to_rule(value),
            None => Err(self.unexpected_end(after.as_str(), rules)),
        }
    }

    pub(crate) fn unexpected_end(&self, after: &'static str, rules: &RuleCursor) -> RuleError {
        let near = rules.peek().unwrap_or(Value::Word(Name::EMPTY));
        RuleError::new(
            RuleErrorKind::UnexpectedEnd { after },
            rules.position(),
            excerpt(&near, self.interner),
        )
    }
}
