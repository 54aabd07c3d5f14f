//! String interner for word spellings.
//!
//! Provides O(1) interning and lookup behind a single `RwLock`. Words are
//! compared by `Name` everywhere in the engine; the interner is only
//! consulted for case-insensitive comparison and for display.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::{Keyword, Name};

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// More than `u32::MAX` distinct spellings.
    Overflow { count: usize },
}

impl std::fmt::Display for InternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InternError::Overflow { count } => write!(
                f,
                "interner exceeded capacity: {count} strings, max is {}",
                u32::MAX
            ),
        }
    }
}

impl std::error::Error for InternError {}

struct InternTable {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

/// String interner.
///
/// Spellings are leaked to obtain `'static` lifetimes; an interner is
/// expected to live as long as the program that loads rules with it.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

/// Interner shared between the loader, the engine and a host.
pub type SharedInterner = Arc<StringInterner>;

impl StringInterner {
    /// Create a new interner with the empty string at index 0 and every
    /// dialect keyword at its fixed index.
    pub fn new() -> Self {
        let mut table = InternTable {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(256),
        };
        let empty: &'static str = "";
        table.map.insert(empty, 0);
        table.strings.push(empty);
        for (i, keyword) in Keyword::ALL.iter().enumerate() {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "Keyword::ALL has 32 entries"
            )]
            let index = i as u32 + 1;
            table.map.insert(keyword.as_str(), index);
            table.strings.push(keyword.as_str());
        }
        StringInterner {
            table: RwLock::new(table),
        }
    }

    /// Create a new interner wrapped for sharing.
    pub fn shared() -> SharedInterner {
        Arc::new(Self::new())
    }

    /// Try to intern a string, returning its `Name` or an error on overflow.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        {
            let guard = self.table.read();
            if let Some(&index) = guard.map.get(s) {
                return Ok(Name::from_raw(index));
            }
        }

        let mut guard = self.table.write();
        // Double-check after acquiring the write lock
        if let Some(&index) = guard.map.get(s) {
            return Ok(Name::from_raw(index));
        }

        let index = u32::try_from(guard.strings.len()).map_err(|_| InternError::Overflow {
            count: guard.strings.len(),
        })?;
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        guard.strings.push(leaked);
        guard.map.insert(leaked, index);
        Ok(Name::from_raw(index))
    }

    /// Intern a string, returning its `Name`.
    ///
    /// # Panics
    /// Panics if the interner exceeds `u32::MAX` spellings.
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up the spelling of a name.
    ///
    /// Unknown names (from a different interner) resolve to the empty string.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table
            .read()
            .strings
            .get(name.index())
            .copied()
            .unwrap_or("")
    }

    /// Compare two names ignoring case.
    pub fn eq_ignore_case(&self, a: Name, b: Name) -> bool {
        if a == b {
            return true;
        }
        let guard = self.table.read();
        match (guard.strings.get(a.index()), guard.strings.get(b.index())) {
            (Some(x), Some(y)) => {
                x.len() == y.len() && x.chars().flat_map(char::to_lowercase).eq(y.chars().flat_map(char::to_lowercase))
            }
            _ => false,
        }
    }

    /// Number of interned spellings (including the empty string and keywords).
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// Always false: the empty string is pre-interned.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
