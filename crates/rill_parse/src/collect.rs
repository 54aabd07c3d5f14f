//! Collection buffers for `collect` / `keep`.
//!
//! Buffers form a stack owned by the session, innermost on top and visible
//! to nested passes. A pass records a [`CollectMark`] on entry and truncates
//! back to it when an alternative fails; the input itself is never rolled
//! back.

use rill_ir::Value;

/// Stack depth and top-buffer length at some point in time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct CollectMark {
    depth: usize,
    len: usize,
}

#[derive(Debug, Default)]
pub(crate) struct CollectStack {
    buffers: Vec<Vec<Value>>,
    /// Block produced by an outermost bare `collect`.
    result: Option<Value>,
}

impl CollectStack {
    pub(crate) fn new() -> Self {
        CollectStack::default()
    }

    pub(crate) fn is_active(&self) -> bool {
        !self.buffers.is_empty()
    }

    pub(crate) fn mark(&self) -> CollectMark {
        CollectMark {
            depth: self.buffers.len(),
            len: self.buffers.last().map_or(0, Vec::len),
        }
    }

    /// Roll the stack back to `mark`.
    pub(crate) fn truncate(&mut self, mark: CollectMark) {
        self.buffers.truncate(mark.depth);
        if let Some(top) = self.buffers.last_mut() {
            top.truncate(mark.len);
        }
    }

    pub(crate) fn open(&mut self) {
        self.buffers.push(Vec::new());
    }

    /// Pop the innermost buffer.
    pub(crate) fn close(&mut self) -> Option<Vec<Value>> {
        self.buffers.pop()
    }

    /// Append to the innermost buffer; false if no buffer is open.
    pub(crate) fn push(&mut self, value: Value) -> bool {
        match self.buffers.last_mut() {
            Some(top) => {
                top.push(value);
                true
            }
            None => false,
        }
    }

    /// Deliver a closed bare `collect` to its enclosing scope.
    pub(crate) fn deliver(&mut self, block: Value) {
        match self.buffers.last_mut() {
            Some(top) => top.push(block),
            None => self.result = Some(block),
        }
    }

    pub(crate) fn take_result(&mut self) -> Option<Value> {
        self.result.take()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_truncate_restores_top_buffer() {
        let mut stack = CollectStack::new();
        stack.open();
        stack.push(Value::Integer(1));
        let mark = stack.mark();
        stack.push(Value::Integer(2));
        stack.open();
        stack.push(Value::Integer(3));
        stack.truncate(mark);
        assert_eq!(stack.close(), Some(vec![Value::Integer(1)]));
        assert!(!stack.is_active());
    }

    #[test]
    fn test_push_without_buffer() {
        let mut stack = CollectStack::new();
        assert!(!stack.push(Value::None));
    }

    #[test]
    fn test_deliver_outermost_sets_result() {
        let mut stack = CollectStack::new();
        stack.deliver(Value::block(vec![Value::Integer(1)]));
        assert_eq!(
            stack.take_result(),
            Some(Value::block(vec![Value::Integer(1)]))
        );
        assert_eq!(stack.take_result(), None);
    }

    #[test]
    fn test_deliver_nested_appends_block() {
        let mut stack = CollectStack::new();
        stack.open();
        stack.deliver(Value::block(vec![]));
        assert_eq!(stack.close(), Some(vec![Value::block(vec![])]));
        assert_eq!(stack.take_result(), None);
    }
}
