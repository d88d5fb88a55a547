//! Append-only, strictly increasing list of integers that backs every prime cache.

use std::ops::Deref;

/// A sorted list that only grows at its end.
///
/// Appending a value that is not strictly greater than the current maximum is silently
/// ignored, which makes re-inserting an already recorded value harmless.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonotonicSequence {
    values: Vec<u64>,
}

impl MonotonicSequence {
    #[inline]
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Append `v` if it is greater than the current maximum, otherwise do nothing.
    /// Returns whether the value was appended.
    pub fn append(&mut self, v: u64) -> bool {
        match self.max() {
            Some(m) if v <= m => false,
            _ => {
                self.values.push(v);
                true
            }
        }
    }

    /// The largest (i.e. last) element, or None if the sequence is empty
    #[inline]
    pub fn max(&self) -> Option<u64> {
        self.values.last().copied()
    }

    /// Returns the longest prefix whose elements are all <= `ceiling`.
    pub fn elements_at_most(&self, ceiling: u64) -> &[u64] {
        let end = self.values.partition_point(|&v| v <= ceiling);
        &self.values[..end]
    }

    #[inline]
    pub fn contains(&self, v: u64) -> bool {
        self.values.binary_search(&v).is_ok()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u64] {
        &self.values
    }
}

impl Deref for MonotonicSequence {
    type Target = [u64];

    fn deref(&self) -> &[u64] {
        &self.values
    }
}

impl Extend<u64> for MonotonicSequence {
    fn extend<I: IntoIterator<Item = u64>>(&mut self, iter: I) {
        for v in iter {
            self.append(v);
        }
    }
}

impl FromIterator<u64> for MonotonicSequence {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        let mut seq = Self::new();
        seq.extend(iter);
        seq
    }
}
