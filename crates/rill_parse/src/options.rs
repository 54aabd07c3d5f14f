//! Parse configuration.

/// Keyword/semantics variant.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Dialect {
    #[default]
    Native,
    /// Legacy compatibility: `and` is accepted as `ahead`, and a zero-width
    /// `set` always clears its target.
    Redbol,
}

/// Options for one top-level parse.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Compare characters and words case-sensitively.
    pub case_sensitive: bool,
    /// A match that stops short of the end of the input is a failure.
    pub require_full_match: bool,
    pub dialect: Dialect,
    /// Maximum nesting of rule blocks before a runaway recursion is reported.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            case_sensitive: false,
            require_full_match: true,
            dialect: Dialect::Native,
            max_depth: 1000,
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    #[must_use]
    pub fn with_full_match(mut self, require_full_match: bool) -> Self {
        self.require_full_match = require_full_match;
        self
    }

    #[must_use]
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub(crate) fn is_redbol(&self) -> bool {
        self.dialect == Dialect::Redbol
    }
}
