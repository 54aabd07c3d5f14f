//! Command handlers for the `rill` binary.
//!
//! Handlers return their output (or an error message) instead of printing
//! or exiting, so `main.rs` owns stdout, stderr and the process status.

mod load;
mod parse;
mod run;

pub use load::load_source;
pub use parse::{ParseCommand, ParseOutcome};
pub use run::run_program;

/// Read a source file, with a readable message for the common failures.
pub fn read_file(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        std::io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        std::io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
        _ => format!("error reading '{path}': {e}"),
    })
}

#[cfg(test)]
mod tests;
