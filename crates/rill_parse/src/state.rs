//! Per-item match state.
//!
//! Modifier keywords match nothing by themselves. They accumulate here until
//! a terminal rule arrives; the quantifier loop and post-match processing
//! then read the accumulated flags, and the state is dropped before the next
//! item is fetched.

use bitflags::bitflags;
use rill_ir::{Name, Value};

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub(crate) struct MatchFlags: u16 {
        /// `copy` / `across`: capture the matched span.
        const COPY = 1 << 0;
        /// `set`: capture the first matched element.
        const SET = 1 << 1;
        /// `not`: invert success and failure.
        const NOT = 1 << 2;
        /// A second `not` cancelled the first.
        const NOT_INVERT = 1 << 3;
        /// `ahead`: restore the begin position after a match.
        const AHEAD = 1 << 4;
        const REMOVE = 1 << 5;
        const CHANGE = 1 << 6;
        /// `further` (and `some`): a zero-width iteration ends the loop.
        const MUST_ADVANCE = 1 << 7;
        /// `opt` / `maybe`: zero matches is success.
        const OPT = 1 << 8;
        /// `while`: keep looping through zero-width iterations.
        const WHILE = 1 << 9;
        const KEEP = 1 << 10;
        const ONLY = 1 << 11;
        const COLLECT = 1 << 12;
        /// An explicit repetition count or quantifier keyword was seen.
        const BOUNDED = 1 << 13;
    }
}

/// Where a `collect` delivers its buffer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum CollectTarget {
    /// Appended to the enclosing buffer, or the parse result at top level.
    #[default]
    Enclosing,
    /// `collect set x`
    Set(Name),
    /// `collect into x`
    Into(Name),
}

/// The value half of a `change` rule, fetched before matching so the rule
/// cursor stays in step whether or not the match succeeds.
#[derive(Clone, Debug)]
pub(crate) struct Replacement {
    pub item: Value,
    pub only: bool,
    pub dup: usize,
}

#[derive(Clone, Debug)]
pub(crate) struct MatchState {
    pub flags: MatchFlags,
    pub min: usize,
    pub max: usize,
    /// Capture target for `set` / `copy`.
    pub target: Option<Name>,
    pub collect: CollectTarget,
    pub replacement: Option<Replacement>,
    /// Input position when the item started.
    pub begin: usize,
}

impl MatchState {
    pub(crate) fn new(begin: usize) -> Self {
        MatchState {
            flags: MatchFlags::empty(),
            min: 1,
            max: 1,
            target: None,
            collect: CollectTarget::Enclosing,
            replacement: None,
            begin,
        }
    }

    /// True once any modifier has been applied.
    pub(crate) fn has_modifiers(&self) -> bool {
        !self.flags.is_empty()
    }

    pub(crate) fn has(&self, flag: MatchFlags) -> bool {
        self.flags.contains(flag)
    }

    /// Effective bounds after `opt`.
    pub(crate) fn bounds(&self) -> (usize, usize) {
        if self.has(MatchFlags::OPT) {
            (0, self.max)
        } else {
            (self.min, self.max)
        }
    }

    /// Apply `not`; a second `not` cancels the first.
    pub(crate) fn toggle_not(&mut self) {
        if self.has(MatchFlags::NOT) {
            self.flags.remove(MatchFlags::NOT);
            self.flags.insert(MatchFlags::NOT_INVERT);
        } else {
            self.flags.insert(MatchFlags::NOT);
            self.flags.remove(MatchFlags::NOT_INVERT);
        }
    }

    /// True if the loop repeats more than once.
    #[inline]
    pub(crate) fn is_iterated(&self) -> bool {
        self.max > 1
    }
}
