//! Rill CLI support library.
//!
//! The binary in `main.rs` only dispatches on arguments; everything it runs
//! lives here so it can be tested without spawning a process.

pub mod commands;
pub mod logging;
