//! Character- and byte-stream cursor.

use std::iter;

use memchr::memmem;
use rill_ir::value::chars_eq;
use rill_ir::{Bitset, Kind, Series, StringInterner, Value};

use super::{Search, SeriesCursor};
use crate::error::{invalid_mutation, unsupported, RuleErrorKind};

/// An element of a scalar stream.
pub(crate) trait ScalarElem: Copy + PartialEq + 'static {
    /// What a blank `_` rule consumes.
    const SPACE: Self;

    fn eq_case(a: Self, b: Self, case_sensitive: bool) -> bool;

    fn in_bitset(self, set: &Bitset, case_sensitive: bool) -> bool;

    /// The element as a standalone value (`set` capture, `keep` of one).
    fn to_value(self) -> Value;

    fn wrap(series: Series<Self>, kind: Kind) -> Value;

    /// The element sequence a literal rule stands for, if it is one.
    fn literal(value: &Value, interner: &StringInterner) -> Option<Vec<Self>>;

    /// The element sequence a mutation value inserts, if it can be inserted.
    fn insertable(value: &Value, only: bool, interner: &StringInterner) -> Option<Vec<Self>>;

    fn search(haystack: &[Self], needle: &[Self], case_sensitive: bool) -> Option<usize>;
}

impl ScalarElem for char {
    const SPACE: Self = ' ';

    #[inline]
    fn eq_case(a: Self, b: Self, case_sensitive: bool) -> bool {
        chars_eq(a, b, case_sensitive)
    }

    fn in_bitset(self, set: &Bitset, case_sensitive: bool) -> bool {
        set.contains_char(self, case_sensitive)
    }

    fn to_value(self) -> Value {
        Value::Char(self)
    }

    fn wrap(series: Series<Self>, kind: Kind) -> Value {
        if kind == Kind::Tag {
            Value::Tag(series)
        } else {
            Value::Text(series)
        }
    }

    fn literal(value: &Value, interner: &StringInterner) -> Option<Vec<Self>> {
        match value {
            Value::Text(s) => Some(s.to_vec()),
            Value::Tag(s) => Some(format!("<{}>", s.to_text()).chars().collect()),
            Value::Char(c) => Some(vec![*c]),
            Value::LitWord(n) => Some(interner.lookup(*n).chars().collect()),
            _ => None,
        }
    }

    fn insertable(value: &Value, only: bool, interner: &StringInterner) -> Option<Vec<Self>> {
        match value {
            Value::Text(s) => Some(s.to_vec()),
            Value::Char(c) => Some(vec![*c]),
            Value::Block(s) if !only => Some(
                s.to_vec()
                    .iter()
                    .flat_map(|v| v.form(interner).chars().collect::<Vec<_>>())
                    .collect(),
            ),
            other => Some(other.form(interner).chars().collect()),
        }
    }

    fn search(haystack: &[Self], needle: &[Self], case_sensitive: bool) -> Option<usize> {
        if needle.is_empty() {
            return Some(0);
        }
        haystack.windows(needle.len()).position(|window| {
            window
                .iter()
                .zip(needle)
                .all(|(a, b)| chars_eq(*a, *b, case_sensitive))
        })
    }
}

impl ScalarElem for u8 {
    const SPACE: Self = b' ';

    #[inline]
    fn eq_case(a: Self, b: Self, _case_sensitive: bool) -> bool {
        a == b
    }

    fn in_bitset(self, set: &Bitset, _case_sensitive: bool) -> bool {
        set.contains(u32::from(self))
    }

    fn to_value(self) -> Value {
        Value::Integer(i64::from(self))
    }

    fn wrap(series: Series<Self>, _kind: Kind) -> Value {
        Value::Binary(series)
    }

    fn literal(value: &Value, interner: &StringInterner) -> Option<Vec<Self>> {
        match value {
            Value::Binary(s) => Some(s.to_vec()),
            Value::Text(s) => Some(s.to_text().into_bytes()),
            Value::Char(c) => Some(c.to_string().into_bytes()),
            Value::Integer(n) => u8::try_from(*n).ok().map(|b| vec![b]),
            Value::LitWord(n) => Some(interner.lookup(*n).as_bytes().to_vec()),
            _ => None,
        }
    }

    fn insertable(value: &Value, only: bool, interner: &StringInterner) -> Option<Vec<Self>> {
        match value {
            Value::Binary(s) => Some(s.to_vec()),
            Value::Integer(n) => u8::try_from(*n).ok().map(|b| vec![b]),
            Value::Text(s) => Some(s.to_text().into_bytes()),
            Value::Char(c) => Some(c.to_string().into_bytes()),
            Value::Block(s) if !only => {
                let mut bytes = Vec::new();
                for item in s.to_vec() {
                    bytes.extend(Self::insertable(&item, false, interner)?);
                }
                Some(bytes)
            }
            _ => None,
        }
    }

    fn search(haystack: &[Self], needle: &[Self], _case_sensitive: bool) -> Option<usize> {
        memmem::find(haystack, needle)
    }
}

pub(crate) struct ScalarCursor<E> {
    series: Series<E>,
    kind: Kind,
}

impl<E: ScalarElem> ScalarCursor<E> {
    pub(crate) fn new(series: Series<E>, kind: Kind) -> Self {
        ScalarCursor { series, kind }
    }
}

impl<E: ScalarElem> SeriesCursor for ScalarCursor<E> {
    fn kind(&self) -> Kind {
        self.kind
    }

    #[inline]
    fn len(&self) -> usize {
        self.series.len()
    }

    fn is_structured(&self) -> bool {
        false
    }

    fn value_at(&self, index: usize) -> Value {
        E::wrap(self.series.with_index(index), self.kind)
    }

    fn slice_value(&self, begin: usize, end: usize) -> Value {
        E::wrap(Series::new(self.series.copy_range(begin, end)), self.kind)
    }

    fn element_value(&self, index: usize) -> Option<Value> {
        self.series.get(index).map(E::to_value)
    }

    fn keep_values(&self, begin: usize, end: usize, _only: bool) -> Vec<Value> {
        match end.saturating_sub(begin) {
            0 => Vec::new(),
            1 => self.element_value(begin).into_iter().collect(),
            _ => vec![self.slice_value(begin, end)],
        }
    }

    fn remove(&self, begin: usize, end: usize) {
        self.series.remove_range(begin, end);
    }

    fn splice(
        &self,
        at: usize,
        remove: usize,
        value: &Value,
        only: bool,
        dup: usize,
        interner: &StringInterner,
    ) -> Result<usize, RuleErrorKind> {
        let items = E::insertable(value, only, interner)
            .ok_or_else(|| invalid_mutation(value, self.kind, interner))?;
        let repeated = iter::repeat(items).take(dup).flatten();
        Ok(self.series.splice(at, remove, repeated))
    }

    fn match_literal(
        &self,
        pos: usize,
        rule: &Value,
        case_sensitive: bool,
        interner: &StringInterner,
    ) -> Result<Option<usize>, RuleErrorKind> {
        match rule {
            Value::Blank => {
                let hit = self.series.get(pos).is_some_and(|e| e == E::SPACE);
                return Ok(hit.then_some(pos + 1));
            }
            Value::Bitset(set) => {
                let hit = self
                    .series
                    .get(pos)
                    .is_some_and(|e| e.in_bitset(set, case_sensitive));
                return Ok(hit.then_some(pos + 1));
            }
            _ => {}
        }
        let Some(needle) = E::literal(rule, interner) else {
            return Err(unsupported(rule, self.kind, interner));
        };
        let buf = self.series.borrow();
        let end = pos + needle.len();
        if end > buf.len() {
            return Ok(None);
        }
        let hit = buf[pos..end]
            .iter()
            .zip(&needle)
            .all(|(a, b)| E::eq_case(*a, *b, case_sensitive));
        Ok(hit.then_some(end))
    }

    fn find(&self, from: usize, target: &Value, case_sensitive: bool, interner: &StringInterner) -> Search {
        if matches!(target, Value::Bitset(_) | Value::Blank) {
            return Search::Unsupported;
        }
        let Some(needle) = E::literal(target, interner) else {
            return Search::Unsupported;
        };
        let buf = self.series.borrow();
        let from = from.min(buf.len());
        match E::search(&buf[from..], &needle, case_sensitive) {
            Some(offset) => Search::Found {
                at: from + offset,
                end: from + offset + needle.len(),
            },
            None => Search::NotFound,
        }
    }

    fn element_series(&self, _pos: usize) -> Option<Value> {
        None
    }
}
