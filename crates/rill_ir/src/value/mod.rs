//! Values shared by input sequences, rule sequences and the reference host.
//!
//! # Sharing
//!
//! Every series-carrying variant holds a [`Series`], a reference-counted
//! buffer plus a head index. Cloning a `Value` never copies a buffer, so a
//! rule that removes or inserts elements mutates the caller's input too.
//! Values are therefore `!Send`; only the interner is shared across threads.
//!
//! # Factory Methods
//!
//! ```text
//! let s = Value::text("hello");
//! let b = Value::block(vec![Value::Integer(1)]);
//! ```

mod bitset;
mod kind;
mod mold;
mod series;

use crate::{Name, StringInterner};

pub use bitset::Bitset;
pub use kind::{Kind, TypeSet};
pub use series::Series;

/// A built-in function of the reference host.
///
/// The IR only records identity and arity; dispatch happens in the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Native {
    pub name: &'static str,
    pub arity: usize,
}

/// A value of the data model.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    // Scalars
    None,
    /// `_`
    Blank,
    Logic(bool),
    Integer(i64),
    Char(char),

    // Words
    Word(Name),
    /// `x:`
    SetWord(Name),
    /// `:x`
    GetWord(Name),
    /// `'x`
    LitWord(Name),

    // Types
    Datatype(Kind),
    Typeset(TypeSet),
    Bitset(Bitset),

    // Scalar series
    Text(Series<char>),
    Binary(Series<u8>),
    Tag(Series<char>),

    // Structured series
    Block(Series<Value>),
    /// `(code)`
    Group(Series<Value>),
    /// `:(code)`
    GetGroup(Series<Value>),

    Native(Native),
}

// Factory methods
impl Value {
    #[inline]
    pub fn text(s: &str) -> Self {
        Value::Text(Series::from_text(s))
    }

    #[inline]
    pub fn tag(s: &str) -> Self {
        Value::Tag(Series::from_text(s))
    }

    #[inline]
    pub fn binary(bytes: Vec<u8>) -> Self {
        Value::Binary(Series::new(bytes))
    }

    #[inline]
    pub fn block(items: Vec<Value>) -> Self {
        Value::Block(Series::new(items))
    }

    #[inline]
    pub fn group(items: Vec<Value>) -> Self {
        Value::Group(Series::new(items))
    }

    #[inline]
    pub fn get_group(items: Vec<Value>) -> Self {
        Value::GetGroup(Series::new(items))
    }

    #[inline]
    pub fn logic(b: bool) -> Self {
        Value::Logic(b)
    }
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::None => Kind::None,
            Value::Blank => Kind::Blank,
            Value::Logic(_) => Kind::Logic,
            Value::Integer(_) => Kind::Integer,
            Value::Char(_) => Kind::Char,
            Value::Word(_) => Kind::Word,
            Value::SetWord(_) => Kind::SetWord,
            Value::GetWord(_) => Kind::GetWord,
            Value::LitWord(_) => Kind::LitWord,
            Value::Datatype(_) => Kind::Datatype,
            Value::Typeset(_) => Kind::Typeset,
            Value::Bitset(_) => Kind::Bitset,
            Value::Text(_) => Kind::Text,
            Value::Binary(_) => Kind::Binary,
            Value::Tag(_) => Kind::Tag,
            Value::Block(_) => Kind::Block,
            Value::Group(_) => Kind::Group,
            Value::GetGroup(_) => Kind::GetGroup,
            Value::Native(_) => Kind::Native,
        }
    }

    /// `none` and `false` are falsey; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::None | Value::Logic(false))
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// The structured series of a block-like value.
    pub fn as_block(&self) -> Option<&Series<Value>> {
        match self {
            Value::Block(s) | Value::Group(s) | Value::GetGroup(s) => Some(s),
            _ => None,
        }
    }

    /// The series head index, for any series-carrying value.
    pub fn series_index(&self) -> Option<usize> {
        match self {
            Value::Text(s) | Value::Tag(s) => Some(s.index()),
            Value::Binary(s) => Some(s.index()),
            Value::Block(s) | Value::Group(s) | Value::GetGroup(s) => Some(s.index()),
            _ => None,
        }
    }

    /// The same series at another head index. Non-series values are returned
    /// unchanged.
    #[must_use]
    pub fn at_index(&self, index: usize) -> Value {
        match self {
            Value::Text(s) => Value::Text(s.with_index(index)),
            Value::Tag(s) => Value::Tag(s.with_index(index)),
            Value::Binary(s) => Value::Binary(s.with_index(index)),
            Value::Block(s) => Value::Block(s.with_index(index)),
            Value::Group(s) => Value::Group(s.with_index(index)),
            Value::GetGroup(s) => Value::GetGroup(s.with_index(index)),
            other => other.clone(),
        }
    }

    /// True if both values are series over one shared buffer.
    pub fn same_series(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Text(a) | Value::Tag(a), Value::Text(b) | Value::Tag(b)) => a.same_buffer(b),
            (Value::Binary(a), Value::Binary(b)) => a.same_buffer(b),
            (
                Value::Block(a) | Value::Group(a) | Value::GetGroup(a),
                Value::Block(b) | Value::Group(b) | Value::GetGroup(b),
            ) => a.same_buffer(b),
            _ => false,
        }
    }

    /// Equivalence as used by matching: kinds must agree, words and text
    /// compare ignoring case unless `case_sensitive`, blocks compare
    /// element-wise from their head index.
    pub fn equivalent(&self, other: &Value, case_sensitive: bool, interner: &StringInterner) -> bool {
        let words_eq = |a: Name, b: Name| {
            if case_sensitive {
                a == b
            } else {
                interner.eq_ignore_case(a, b)
            }
        };
        match (self, other) {
            (Value::Word(a), Value::Word(b))
            | (Value::SetWord(a), Value::SetWord(b))
            | (Value::GetWord(a), Value::GetWord(b))
            | (Value::LitWord(a), Value::LitWord(b)) => words_eq(*a, *b),
            (Value::Char(a), Value::Char(b)) => chars_eq(*a, *b, case_sensitive),
            (Value::Text(a), Value::Text(b)) | (Value::Tag(a), Value::Tag(b)) => {
                let a = a.to_vec();
                let b = b.to_vec();
                a.len() == b.len()
                    && a.iter().zip(&b).all(|(x, y)| chars_eq(*x, *y, case_sensitive))
            }
            (Value::Block(a), Value::Block(b))
            | (Value::Group(a), Value::Group(b))
            | (Value::GetGroup(a), Value::GetGroup(b)) => {
                let a = a.to_vec();
                let b = b.to_vec();
                a.len() == b.len()
                    && a.iter()
                        .zip(&b)
                        .all(|(x, y)| x.equivalent(y, case_sensitive, interner))
            }
            _ => self == other,
        }
    }
}

/// Character equality, optionally ignoring case.
pub fn chars_eq(a: char, b: char, case_sensitive: bool) -> bool {
    a == b || (!case_sensitive && a.to_lowercase().eq(b.to_lowercase()))
}
