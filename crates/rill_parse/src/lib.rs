//! Rill Parse - grammar-driven sequence matcher
//!
//! Matches an input series against a rule block written in the same data
//! model as the input. One algorithm runs over structured lists and over
//! character/byte streams.
//!
//! # Architecture
//!
//! - `cursor`: input primitives, one implementation per input shape
//! - `single`: one elementary rule at one position
//! - `scan`: `to` / `thru` forward search
//! - `rules`: rule-block walking and word resolution
//! - `quantifier`: repetition with must-advance and loop-caught signals
//! - `state`: modifier flags accumulated until a terminal rule
//! - `collect`: `collect` / `keep` buffers with rollback
//! - `subparse` + `post_match`: one pass over a rule block with alternation
//! - `driver`: the public [`Parser`]
//!
//! # Control Flow
//!
//! Early exits (`accept`, `reject`, `break`) and host control signals are an
//! explicit `Step` value returned through every frame. Malformed rules are
//! `Err(RuleError)` and travel beside it. Match failure is never an error
//! until the driver reports it.

mod collect;
mod cursor;
mod driver;
mod error;
mod host;
mod options;
mod post_match;
mod quantifier;
mod rules;
mod scan;
mod session;
mod single;
mod stack;
mod state;
mod step;
mod subparse;

pub use driver::{Parsed, Parser};
pub use error::{ParseError, RuleError, RuleErrorKind};
pub use host::Host;
pub use options::{Dialect, ParseOptions};

#[cfg(test)]
mod tests;
