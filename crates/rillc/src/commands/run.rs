//! The `run` command: evaluate a program with the reference host.

use rill_eval::{ControlAction, InterpreterBuilder, SharedPrintHandler};
use tracing::debug;

/// Run `source`, printing through `handler`.
///
/// Returns the process exit status: 0 when the program finishes, the `quit`
/// code when it quits. Errors and uncaught throws are `Err`.
pub fn run_program(source: &str, handler: SharedPrintHandler) -> Result<i32, String> {
    let mut interp = InterpreterBuilder::new().print_handler(handler).build();
    match interp.run_source(source) {
        Ok(value) => {
            debug!(result = %value.mold(interp.interner()), "program finished");
            Ok(0)
        }
        Err(ControlAction::Quit(code)) => Ok(i32::try_from(code).unwrap_or(1)),
        Err(ControlAction::Error(err)) => Err(err.to_string()),
        Err(ControlAction::Throw(value)) => Err(format!("no `catch` for thrown {}", value.mold(interp.interner()))),
        Err(ControlAction::Return(value)) => Err(format!("stray return of {}", value.mold(interp.interner()))),
    }
}
