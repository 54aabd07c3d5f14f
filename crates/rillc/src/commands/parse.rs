//! The `parse` command: match one input against one rule block.
//!
//! ```text
//! rill parse "aabb" "some \"a\" some \"b\""
//! rill parse "1 2 x" "some integer! word!" --block
//! ```
//!
//! Code rules run in a fresh reference interpreter, so `(print ...)` inside
//! the rules writes to stdout.

use rill_eval::{ControlAction, InterpreterBuilder, SharedPrintHandler};
use rill_ir::Value;
use rill_parse::{Dialect, ParseError, ParseOptions, Parsed, Parser};

/// Arguments of `rill parse`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseCommand {
    pub input: String,
    pub rules: String,
    /// `--case`
    pub case_sensitive: bool,
    /// `--part`: accept a match that stops before the end.
    pub partial: bool,
    /// `--redbol`
    pub redbol: bool,
    /// `--block`: load the input as source instead of taking it as text.
    pub block: bool,
    /// `--binary`: take the input's UTF-8 bytes.
    pub binary: bool,
}

/// What a successful `parse` command reports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseOutcome {
    Matched { position: usize },
    Collected(String),
    Accepted(String),
    /// The rules did not match; the message says how far they got.
    NoMatch(String),
}

impl ParseCommand {
    /// Build from the arguments after `parse`.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut command = ParseCommand::default();
        let mut positional = Vec::new();
        for arg in args {
            match arg.as_str() {
                "--case" => command.case_sensitive = true,
                "--part" => command.partial = true,
                "--redbol" => command.redbol = true,
                "--block" => command.block = true,
                "--binary" => command.binary = true,
                flag if flag.starts_with("--") => return Err(format!("unknown option '{flag}'")),
                _ => positional.push(arg.clone()),
            }
        }
        if command.block && command.binary {
            return Err("--block and --binary cannot be combined".to_owned());
        }
        let mut positional = positional.into_iter();
        let (Some(input), Some(rules), None) = (positional.next(), positional.next(), positional.next()) else {
            return Err("expected exactly <input> and <rules>".to_owned());
        };
        command.input = input;
        command.rules = rules;
        Ok(command)
    }

    pub fn options(&self) -> ParseOptions {
        ParseOptions::default()
            .with_case_sensitive(self.case_sensitive)
            .with_full_match(!self.partial)
            .with_dialect(if self.redbol { Dialect::Redbol } else { Dialect::Native })
    }

    /// Run the match. `Err` is reserved for malformed input, malformed rules
    /// and failures raised by code rules.
    pub fn execute(&self, handler: SharedPrintHandler) -> Result<ParseOutcome, String> {
        let mut interp = InterpreterBuilder::new().print_handler(handler).build();
        let interner = interp.shared_interner();

        let input = if self.block {
            interp.load(&self.input).map_err(|err| err.to_string())?
        } else if self.binary {
            Value::binary(self.input.as_bytes().to_vec())
        } else {
            Value::text(&self.input)
        };
        let rules = interp.load(&self.rules).map_err(|err| err.to_string())?;

        let result = Parser::new(&interner, &mut interp)
            .with_options(self.options())
            .parse(&input, &rules);
        match result {
            Ok(Parsed::Matched {
                collected: Some(block), ..
            }) => Ok(ParseOutcome::Collected(block.mold(&interner))),
            Ok(Parsed::Matched { position, .. }) => Ok(ParseOutcome::Matched { position }),
            Ok(Parsed::Accepted(value)) => Ok(ParseOutcome::Accepted(value.mold(&interner))),
            Err(err @ (ParseError::Mismatch { .. } | ParseError::Incomplete { .. })) => {
                Ok(ParseOutcome::NoMatch(err.to_string()))
            }
            Err(err @ ParseError::Rule(_)) => Err(err.to_string()),
            Err(ParseError::Host(ControlAction::Error(err))) => Err(err.to_string()),
            Err(ParseError::Host(control)) => Err(format!("code rule stopped the parse: {control:?}")),
        }
    }
}
