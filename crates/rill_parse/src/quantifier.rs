//! Quantifier loop.

use tracing::trace;

use crate::cursor::SeriesCursor;
use crate::host::Host;
use crate::rules::Rule;
use crate::session::Session;
use crate::state::{MatchFlags, MatchState};
use crate::step::{Step, StepResult};

impl<H: Host> Session<'_, H> {
    /// Repeat `rule` from `pos` within the state's bounds.
    ///
    /// Greedy: stops at the first failed iteration, then checks the minimum.
    /// An iterated loop (`max > 1`) is the frame that catches `reject` (the
    /// iteration fails) and `break` (the loop succeeds where it broke);
    /// a single-shot loop relays both.
    pub(crate) fn repeat<S: SeriesCursor>(
        &mut self,
        cursor: &S,
        pos: usize,
        rule: &Rule,
        state: &MatchState,
    ) -> StepResult<H::Control> {
        let (min, max) = state.bounds();
        let iterated = state.is_iterated();
        let must_advance = state.has(MatchFlags::MUST_ADVANCE);
        let stop_on_empty = max == usize::MAX && !state.has(MatchFlags::WHILE);

        let mut count: usize = 0;
        let mut p = cursor.clamp(pos);
        while count < max {
            let before = p;
            match self.match_rule(cursor, p, rule)? {
                Step::Matched(next) => {
                    let next = cursor.clamp(next);
                    if next == before {
                        if must_advance {
                            break;
                        }
                        count = count.saturating_add(1);
                        if stop_on_empty {
                            break;
                        }
                    } else {
                        count = count.saturating_add(1);
                        p = next;
                        self.note_progress(p);
                    }
                }
                Step::NoMatch => break,
                Step::Reject if iterated => {
                    trace!(count, "reject ends the loop");
                    break;
                }
                Step::Break(at) if iterated => {
                    trace!(count, at, "break ends the loop");
                    return Ok(Step::Matched(cursor.clamp(at)));
                }
                signal => return Ok(signal),
            }
        }

        if count < min {
            Ok(Step::NoMatch)
        } else {
            Ok(Step::Matched(p))
        }
    }
}
