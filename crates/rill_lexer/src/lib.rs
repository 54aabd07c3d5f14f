//! Rill Lexer - loads source text into values
//!
//! Source text uses the same data model rules are written in: blocks
//! `[...]`, groups `(...)`, text `"..."`, chars `#"c"`, binaries `#{0A}`,
//! tags `<end>`, integers, and the word forms `x`, `x:`, `:x`, `'x`.
//! Words ending in `!` that name a datatype or typeset load as those.
//! Comments run from `;` to end of line.

mod lex_error;
mod loader;
mod raw_token;

pub use lex_error::{LexError, LexErrorKind};
pub use loader::{load, load_block};
