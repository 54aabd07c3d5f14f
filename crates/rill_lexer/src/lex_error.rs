//! Loader error types.

use std::ops::Range;

use thiserror::Error;

/// A loader error with the byte span it refers to.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{kind} at {}..{}", span.start, span.end)]
pub struct LexError {
    pub span: Range<usize>,
    pub kind: LexErrorKind,
}

/// What went wrong while loading.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum LexErrorKind {
    #[error("unrecognized input `{text}`")]
    InvalidToken { text: String },
    #[error("integer literal out of range")]
    IntegerOverflow,
    #[error("invalid escape `\\{escape}`")]
    InvalidEscape { escape: char },
    #[error("binary literal has an odd number of hex digits")]
    OddBinary,
    #[error("unexpected `{found}`")]
    UnexpectedClose { found: char },
    #[error("missing `{expected}`")]
    Unclosed { expected: char },
}

impl LexError {
    pub(crate) fn new(span: Range<usize>, kind: LexErrorKind) -> Self {
        LexError { span, kind }
    }
}
