//! Input cursors.
//!
//! The engine is written once against [`SeriesCursor`]. Two implementations
//! back it:
//!
//! - [`BlockCursor`]: structured lists, compared element by element with
//!   datatype and typeset tests.
//! - [`ScalarCursor`]: character streams (text, tag) and byte streams
//!   (binary), with case-folding comparison and substring search.
//!
//! All positions are absolute indices into the shared buffer. Nothing here
//! caches the length: mutation rules and host code can shrink the buffer
//! between any two calls, and callers re-clamp after each of those.

mod block;
mod scalar;

use rill_ir::{Kind, StringInterner, Value};

use crate::error::RuleErrorKind;

pub(crate) use block::BlockCursor;
pub(crate) use scalar::ScalarCursor;

/// Result of a substring search over a scalar stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Search {
    Found { at: usize, end: usize },
    NotFound,
    /// The target is not a plain literal for this input; scan rule by rule.
    Unsupported,
}

/// Sequence primitives the matcher needs from an input.
pub(crate) trait SeriesCursor {
    /// Datatype of the input value, for error reporting.
    fn kind(&self) -> Kind;

    fn len(&self) -> usize;

    fn is_structured(&self) -> bool;

    /// Clamp a position to the current length.
    #[inline]
    fn clamp(&self, pos: usize) -> usize {
        pos.min(self.len())
    }

    /// The input itself, positioned at `index`.
    fn value_at(&self, index: usize) -> Value;

    /// A fresh series of the input's kind holding `[begin, end)`.
    fn slice_value(&self, begin: usize, end: usize) -> Value;

    /// The element at `index` as a standalone value.
    fn element_value(&self, index: usize) -> Option<Value>;

    /// What `keep` appends to a collection buffer for `[begin, end)`.
    fn keep_values(&self, begin: usize, end: usize, only: bool) -> Vec<Value>;

    fn remove(&self, begin: usize, end: usize);

    /// Replace `remove` elements at `at` with `dup` copies of `value`;
    /// returns the number of elements inserted.
    fn splice(
        &self,
        at: usize,
        remove: usize,
        value: &Value,
        only: bool,
        dup: usize,
        interner: &StringInterner,
    ) -> Result<usize, RuleErrorKind>;

    /// Anchored literal match at `pos`; returns the end position.
    fn match_literal(
        &self,
        pos: usize,
        rule: &Value,
        case_sensitive: bool,
        interner: &StringInterner,
    ) -> Result<Option<usize>, RuleErrorKind>;

    /// Forward literal search from `from`.
    fn find(&self, from: usize, target: &Value, case_sensitive: bool, interner: &StringInterner) -> Search;

    /// The series held by the element at `pos`, for `into`.
    fn element_series(&self, pos: usize) -> Option<Value>;
}
