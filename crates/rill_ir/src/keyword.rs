//! Dialect keywords.
//!
//! Keywords are ordinary words. The interner pre-interns every keyword at a
//! fixed index (`1 + position in Keyword::ALL`), so mapping a `Name` back to
//! a keyword is a bounds check plus a table read.

use std::fmt;

use crate::Name;

/// A word with a reserved meaning inside a rule block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `|` alternation separator.
    Bar,
    Some,
    Any,
    While,
    Opt,
    Maybe,
    Further,
    Set,
    Copy,
    Across,
    Not,
    Ahead,
    /// Legacy spelling of `ahead`.
    And,
    Remove,
    Insert,
    Change,
    Only,
    Dup,
    Collect,
    Keep,
    Into,
    Accept,
    Reject,
    Break,
    Fail,
    Skip,
    End,
    None,
    To,
    Thru,
    Quote,
    If,
}

impl Keyword {
    /// Every keyword, in pre-interning order.
    pub const ALL: [Keyword; 32] = [
        Keyword::Bar,
        Keyword::Some,
        Keyword::Any,
        Keyword::While,
        Keyword::Opt,
        Keyword::Maybe,
        Keyword::Further,
        Keyword::Set,
        Keyword::Copy,
        Keyword::Across,
        Keyword::Not,
        Keyword::Ahead,
        Keyword::And,
        Keyword::Remove,
        Keyword::Insert,
        Keyword::Change,
        Keyword::Only,
        Keyword::Dup,
        Keyword::Collect,
        Keyword::Keep,
        Keyword::Into,
        Keyword::Accept,
        Keyword::Reject,
        Keyword::Break,
        Keyword::Fail,
        Keyword::Skip,
        Keyword::End,
        Keyword::None,
        Keyword::To,
        Keyword::Thru,
        Keyword::Quote,
        Keyword::If,
    ];

    /// The spelling of the keyword.
    pub const fn as_str(self) -> &'static str {
        match self {
            Keyword::Bar => "|",
            Keyword::Some => "some",
            Keyword::Any => "any",
            Keyword::While => "while",
            Keyword::Opt => "opt",
            Keyword::Maybe => "maybe",
            Keyword::Further => "further",
            Keyword::Set => "set",
            Keyword::Copy => "copy",
            Keyword::Across => "across",
            Keyword::Not => "not",
            Keyword::Ahead => "ahead",
            Keyword::And => "and",
            Keyword::Remove => "remove",
            Keyword::Insert => "insert",
            Keyword::Change => "change",
            Keyword::Only => "only",
            Keyword::Dup => "dup",
            Keyword::Collect => "collect",
            Keyword::Keep => "keep",
            Keyword::Into => "into",
            Keyword::Accept => "accept",
            Keyword::Reject => "reject",
            Keyword::Break => "break",
            Keyword::Fail => "fail",
            Keyword::Skip => "skip",
            Keyword::End => "end",
            Keyword::None => "none",
            Keyword::To => "to",
            Keyword::Thru => "thru",
            Keyword::Quote => "quote",
            Keyword::If => "if",
        }
    }

    /// The pre-interned name of this keyword.
    #[inline]
    pub fn name(self) -> Name {
        let position = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "Keyword::ALL has 32 entries"
        )]
        Name::from_raw(position as u32 + 1)
    }

    /// Map an interned name back to a keyword, if it is one.
    #[inline]
    pub fn from_name(name: Name) -> Option<Keyword> {
        let index = name.index();
        if index == 0 {
            return None;
        }
        Self::ALL.get(index - 1).copied()
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
