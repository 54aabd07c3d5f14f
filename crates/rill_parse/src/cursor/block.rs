//! Structured-list cursor.

use std::iter;

use rill_ir::{Kind, Name, Series, StringInterner, Value};

use super::{Search, SeriesCursor};
use crate::error::RuleErrorKind;

pub(crate) struct BlockCursor {
    series: Series<Value>,
    kind: Kind,
}

impl BlockCursor {
    pub(crate) fn new(series: Series<Value>, kind: Kind) -> Self {
        BlockCursor { series, kind }
    }

    fn wrap(&self, series: Series<Value>) -> Value {
        match self.kind {
            Kind::Group => Value::Group(series),
            Kind::GetGroup => Value::GetGroup(series),
            _ => Value::Block(series),
        }
    }
}

fn words_eq(a: Name, b: Name, case_sensitive: bool, interner: &StringInterner) -> bool {
    if case_sensitive {
        a == b
    } else {
        interner.eq_ignore_case(a, b)
    }
}

impl SeriesCursor for BlockCursor {
    fn kind(&self) -> Kind {
        self.kind
    }

    #[inline]
    fn len(&self) -> usize {
        self.series.len()
    }

    fn is_structured(&self) -> bool {
        true
    }

    fn value_at(&self, index: usize) -> Value {
        self.wrap(self.series.with_index(index))
    }

    fn slice_value(&self, begin: usize, end: usize) -> Value {
        self.wrap(Series::new(self.series.copy_range(begin, end)))
    }

    fn element_value(&self, index: usize) -> Option<Value> {
        self.series.get(index)
    }

    fn keep_values(&self, begin: usize, end: usize, only: bool) -> Vec<Value> {
        let items = self.series.copy_range(begin, end);
        if only && items.len() > 1 {
            vec![Value::block(items)]
        } else {
            items
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
        _interner: &StringInterner,
    ) -> Result<usize, RuleErrorKind> {
        let items = match value {
            Value::Block(s) if !only => s.to_vec(),
            other => vec![other.clone()],
        };
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
        if matches!(rule, Value::Blank) {
            return Ok(Some(pos));
        }
        let Some(elem) = self.series.get(pos) else {
            return Ok(None);
        };
        let matched = match (rule, &elem) {
            (Value::Datatype(kind), _) => elem.kind() == *kind,
            (Value::Typeset(set), _) => set.has_kind(elem.kind()),
            (Value::LitWord(want), Value::Word(have)) => {
                words_eq(*want, *have, case_sensitive, interner)
            }
            (Value::LitWord(_), _) => false,
            (Value::Bitset(set), Value::Char(c)) => set.contains_char(*c, case_sensitive),
            (Value::Bitset(_), _) => false,
            (rule, elem) => elem.equivalent(rule, case_sensitive, interner),
        };
        Ok(matched.then_some(pos + 1))
    }

    fn find(&self, _from: usize, _target: &Value, _case_sensitive: bool, _interner: &StringInterner) -> Search {
        Search::Unsupported
    }

    fn element_series(&self, pos: usize) -> Option<Value> {
        self.series.get(pos).filter(|v| v.kind().is_series())
    }
}
