//! Rill IR - the shared data model
//!
//! This crate contains the data structures every other rill crate speaks:
//! - Names for interned word spellings
//! - Keywords pre-interned at fixed indices
//! - Values, including the shared mutable series that input and rule
//!   sequences are built from
//!
//! # Design Philosophy
//!
//! - **Intern Words**: spellings become `Name(u32)`; keyword recognition is an
//!   index check.
//! - **Share Series**: cloning a series value shares its buffer, so in-place
//!   mutation by the matcher is visible to every holder.
//! - **One Value Type**: rules are written in the same data model as input.

mod interner;
mod keyword;
mod name;
pub mod value;

pub use interner::{InternError, SharedInterner, StringInterner};
pub use keyword::Keyword;
pub use name::Name;
pub use value::{Bitset, Kind, Native, Series, TypeSet, Value};
