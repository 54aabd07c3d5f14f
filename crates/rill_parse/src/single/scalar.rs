//! Literal rules against character and byte streams.

use rill_ir::Value;

use crate::cursor::SeriesCursor;
use crate::error::unsupported;
use crate::host::Host;
use crate::session::Session;
use crate::step::{Step, StepResult};

impl<H: Host> Session<'_, H> {
    /// Chars and bitsets compare one element under the current case
    /// sensitivity; text, binary, tag and lit-word literals match as an
    /// anchored substring. Blank consumes one space. Datatype tests have no
    /// meaning on a scalar stream and are a rule error.
    pub(crate) fn match_scalar<S: SeriesCursor>(
        &mut self,
        cursor: &S,
        pos: usize,
        literal: &Value,
    ) -> StepResult<H::Control> {
        if matches!(literal, Value::Datatype(_) | Value::Typeset(_)) {
            let kind = unsupported(literal, cursor.kind(), self.interner);
            return Err(self.error(kind, literal));
        }
        let case = self.case_sensitive();
        let found = cursor
            .match_literal(pos, literal, case, self.interner)
            .map_err(|kind| self.error(kind, literal))?;
        Ok(Step::from_match(found))
    }
}
