//! Tracing setup for the CLI.
//!
//! Enable with `RILL_LOG=rill_parse=trace` (or `RUST_LOG`). Output is an
//! indented tree that follows the engine's nested rule passes.

use std::sync::Once;

use tracing_subscriber::{prelude::*, EnvFilter, Registry};
use tracing_tree::HierarchicalLayer;

static TRACING_INIT: Once = Once::new();

/// Install the subscriber if `RILL_LOG` or `RUST_LOG` is set.
///
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let Some(directives) = log_directives() else {
            return;
        };
        let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("warn"));
        let subscriber = Registry::default().with(filter).with(
            HierarchicalLayer::new(2)
                .with_targets(true)
                .with_bracketed_fields(true)
                .with_writer(std::io::stderr),
        );
        if tracing::subscriber::set_global_default(subscriber).is_err() {
            eprintln!("warning: a tracing subscriber is already installed");
        }
    });
}

/// `RILL_LOG` wins over `RUST_LOG`.
fn log_directives() -> Option<String> {
    std::env::var("RILL_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok()
        .filter(|directives| !directives.trim().is_empty())
}
