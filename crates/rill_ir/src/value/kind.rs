//! Datatypes and typesets.

use std::fmt;

use bitflags::bitflags;

/// The datatype of a value, as written `integer!`, `text!` and so on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    None,
    Blank,
    Logic,
    Integer,
    Char,
    Word,
    SetWord,
    GetWord,
    LitWord,
    Datatype,
    Typeset,
    Bitset,
    Text,
    Binary,
    Tag,
    Block,
    Group,
    GetGroup,
    Native,
}

impl Kind {
    pub const ALL: [Kind; 19] = [
        Kind::None,
        Kind::Blank,
        Kind::Logic,
        Kind::Integer,
        Kind::Char,
        Kind::Word,
        Kind::SetWord,
        Kind::GetWord,
        Kind::LitWord,
        Kind::Datatype,
        Kind::Typeset,
        Kind::Bitset,
        Kind::Text,
        Kind::Binary,
        Kind::Tag,
        Kind::Block,
        Kind::Group,
        Kind::GetGroup,
        Kind::Native,
    ];

    /// Source spelling, including the trailing `!`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Kind::None => "none!",
            Kind::Blank => "blank!",
            Kind::Logic => "logic!",
            Kind::Integer => "integer!",
            Kind::Char => "char!",
            Kind::Word => "word!",
            Kind::SetWord => "set-word!",
            Kind::GetWord => "get-word!",
            Kind::LitWord => "lit-word!",
            Kind::Datatype => "datatype!",
            Kind::Typeset => "typeset!",
            Kind::Bitset => "bitset!",
            Kind::Text => "text!",
            Kind::Binary => "binary!",
            Kind::Tag => "tag!",
            Kind::Block => "block!",
            Kind::Group => "group!",
            Kind::GetGroup => "get-group!",
            Kind::Native => "native!",
        }
    }

    /// Parse a datatype spelling. `string!` and `paren!` are accepted as
    /// aliases of `text!` and `group!`.
    pub fn from_name(s: &str) -> Option<Kind> {
        match s {
            "string!" => return Some(Kind::Text),
            "paren!" => return Some(Kind::Group),
            _ => {}
        }
        Kind::ALL.into_iter().find(|k| k.as_str() == s)
    }

    /// The single-kind typeset for this kind.
    pub fn typeset(self) -> TypeSet {
        let position = Kind::ALL.iter().position(|k| *k == self).unwrap_or(0);
        TypeSet::from_bits_truncate(1 << position)
    }

    /// True for kinds whose values carry a series.
    pub fn is_series(self) -> bool {
        TypeSet::ANY_SERIES.contains(self.typeset())
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// A set of datatypes, one bit per [`Kind`] in declaration order.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct TypeSet: u32 {
        const NONE = 1 << 0;
        const BLANK = 1 << 1;
        const LOGIC = 1 << 2;
        const INTEGER = 1 << 3;
        const CHAR = 1 << 4;
        const WORD = 1 << 5;
        const SET_WORD = 1 << 6;
        const GET_WORD = 1 << 7;
        const LIT_WORD = 1 << 8;
        const DATATYPE = 1 << 9;
        const TYPESET = 1 << 10;
        const BITSET = 1 << 11;
        const TEXT = 1 << 12;
        const BINARY = 1 << 13;
        const TAG = 1 << 14;
        const BLOCK = 1 << 15;
        const GROUP = 1 << 16;
        const GET_GROUP = 1 << 17;
        const NATIVE = 1 << 18;

        const ANY_STRING = Self::TEXT.bits() | Self::TAG.bits();
        const ANY_WORD = Self::WORD.bits()
            | Self::SET_WORD.bits()
            | Self::GET_WORD.bits()
            | Self::LIT_WORD.bits();
        const ANY_BLOCK = Self::BLOCK.bits() | Self::GROUP.bits() | Self::GET_GROUP.bits();
        const ANY_SERIES = Self::ANY_STRING.bits() | Self::BINARY.bits() | Self::ANY_BLOCK.bits();
        const NUMBER = Self::INTEGER.bits();
        const ANY_TYPE = (1 << 19) - 1;
    }
}

/// Named typesets, as written in source.
const NAMED: [(&str, TypeSet); 6] = [
    ("any-string!", TypeSet::ANY_STRING),
    ("any-word!", TypeSet::ANY_WORD),
    ("any-block!", TypeSet::ANY_BLOCK),
    ("any-series!", TypeSet::ANY_SERIES),
    ("number!", TypeSet::NUMBER),
    ("any-type!", TypeSet::ANY_TYPE),
];

impl TypeSet {
    /// Parse a named typeset spelling.
    pub fn from_spelling(s: &str) -> Option<TypeSet> {
        NAMED.iter().find(|(n, _)| *n == s).map(|(_, t)| *t)
    }

    /// The source spelling of a named typeset, if this is one.
    pub fn name(self) -> Option<&'static str> {
        NAMED.iter().find(|(_, t)| *t == self).map(|(n, _)| *n)
    }

    /// True if values of `kind` belong to this set.
    pub fn has_kind(self, kind: Kind) -> bool {
        self.contains(kind.typeset())
    }
}
