//! Raw Token Definition
//!
//! The `RawToken` enum is the logos-derived tokenizer output before
//! interning and nesting.

use logos::Logos;

/// Raw token from logos (before interning).
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum RawToken {
    #[regex(r";[^\n]*")]
    LineComment,

    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(":(")]
    ColonParen,

    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i64>().ok(), priority = 4)]
    Integer(i64),

    // Text literal; escapes are resolved by the loader
    #[regex(r#""([^"\\]|\\.)*""#)]
    Text,

    #[regex(r#"#"([^"\\]|\\.)""#)]
    Char,

    #[regex(r"#\{[0-9A-Fa-f \t\r\n]*\}")]
    Binary,

    #[regex(r"<[A-Za-z/][^<>\s]*>", priority = 4)]
    Tag,

    #[regex(r"[A-Za-z_?!*+\-=<>|~&/][A-Za-z0-9_?!*+\-=<>|~&/]*")]
    Word,

    #[regex(r"[A-Za-z_?!*+\-=<>|~&/][A-Za-z0-9_?!*+\-=<>|~&/]*:")]
    SetWord,

    #[regex(r":[A-Za-z_?!*+\-=<>|~&/][A-Za-z0-9_?!*+\-=<>|~&/]*")]
    GetWord,

    #[regex(r"'[A-Za-z_?!*+\-=<>|~&/][A-Za-z0-9_?!*+\-=<>|~&/]*")]
    LitWord,
}
