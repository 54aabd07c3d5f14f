//! Shared, in-place mutable series.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

/// A shared buffer plus a head index.
///
/// Cloning shares the buffer. All positions taken and returned by the methods
/// below are absolute buffer indices; the head index only matters for
/// equality, molding and as the starting point of a match.
pub struct Series<T> {
    buf: Rc<RefCell<Vec<T>>>,
    index: usize,
}

impl<T> Clone for Series<T> {
    fn clone(&self) -> Self {
        Series {
            buf: Rc::clone(&self.buf),
            index: self.index,
        }
    }
}

impl<T: Clone> Series<T> {
    /// Create a series over a fresh buffer, positioned at its head.
    pub fn new(items: Vec<T>) -> Self {
        Series {
            buf: Rc::new(RefCell::new(items)),
            index: 0,
        }
    }

    /// Same buffer, different head index.
    #[must_use]
    pub fn with_index(&self, index: usize) -> Self {
        Series {
            buf: Rc::clone(&self.buf),
            index,
        }
    }

    /// Head index of this series value.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Length of the whole buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.borrow().len()
    }

    /// True if the buffer holds no elements at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.borrow().is_empty()
    }

    /// Elements from the head index to the end.
    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.index)
    }

    /// True if the head index is at (or past) the end of the buffer.
    pub fn is_tail(&self) -> bool {
        self.index >= self.len()
    }

    /// Element at an absolute index.
    pub fn get(&self, index: usize) -> Option<T> {
        self.buf.borrow().get(index).cloned()
    }

    /// Borrow the whole buffer.
    pub fn borrow(&self) -> Ref<'_, Vec<T>> {
        self.buf.borrow()
    }

    /// Copy of the elements from the head index to the end.
    pub fn to_vec(&self) -> Vec<T> {
        let buf = self.buf.borrow();
        buf.get(self.index.min(buf.len())..)
            .map(<[T]>::to_vec)
            .unwrap_or_default()
    }

    /// Copy of `[begin, end)`, clamped to the buffer.
    pub fn copy_range(&self, begin: usize, end: usize) -> Vec<T> {
        let buf = self.buf.borrow();
        let end = end.min(buf.len());
        let begin = begin.min(end);
        buf[begin..end].to_vec()
    }

    /// Replace `remove` elements at `at` with `items`; returns the number of
    /// elements inserted. Out-of-range positions are clamped.
    pub fn splice<I>(&self, at: usize, remove: usize, items: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let mut buf = self.buf.borrow_mut();
        let at = at.min(buf.len());
        let end = at.saturating_add(remove).min(buf.len());
        let before = buf.len() - (end - at);
        buf.splice(at..end, items);
        buf.len() - before
    }

    /// Delete `[begin, end)`, clamped to the buffer.
    pub fn remove_range(&self, begin: usize, end: usize) {
        let mut buf = self.buf.borrow_mut();
        let end = end.min(buf.len());
        let begin = begin.min(end);
        buf.drain(begin..end);
    }

    /// Append one element.
    pub fn push(&self, item: T) {
        self.buf.borrow_mut().push(item);
    }

    /// True if both values share one buffer.
    pub fn same_buffer(&self, other: &Series<T>) -> bool {
        Rc::ptr_eq(&self.buf, &other.buf)
    }
}

impl Series<char> {
    /// Create a text series from a string.
    pub fn from_text(s: &str) -> Self {
        Series::new(s.chars().collect())
    }

    /// Contents from the head index as a `String`.
    pub fn to_text(&self) -> String {
        let buf = self.buf.borrow();
        buf.iter().skip(self.index).collect()
    }
}

impl<T: Clone + PartialEq> PartialEq for Series<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.same_buffer(other) && self.index == other.index {
            return true;
        }
        let a = self.buf.borrow();
        let b = other.buf.borrow();
        let a = a.get(self.index.min(a.len())..).unwrap_or_default();
        let b = b.get(other.index.min(b.len())..).unwrap_or_default();
        a == b
    }
}

impl<T: fmt::Debug> fmt::Debug for Series<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let buf = self.buf.borrow();
        f.debug_struct("Series")
            .field("index", &self.index)
            .field("items", &*buf)
            .finish()
    }
}
