//! Character-offset spans.
//!
//! Every offset in this crate is a **character offset** (Unicode scalar values from the start of
//! the document), never a byte offset. A [`Span`] is half-open: `[start, end)`.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A half-open character range `[start, end)` in a document.
///
/// Matches, gaps, line boundaries, folds and marks are all expressed as spans. A span with
/// `end <= start` is empty; empty spans are legal values and are used as placeholders by the gap
/// splitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start character offset.
    pub start: usize,
    /// Exclusive end character offset.
    pub end: usize,
}

impl Span {
    /// Create a span from `start` and `end` character offsets.
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create a zero-length span anchored at `offset`.
    pub const fn point(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Returns the length of the span in characters (`0` for inverted spans).
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if the span covers no characters.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Check if the span contains a specific offset.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Check if `other` lies completely inside this span.
    pub fn covers(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Check if two spans share at least one character.
    pub fn overlaps(&self, other: Span) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end && other.start < self.end
    }

    /// Bounding span of a set of spans: the smallest start and the largest end.
    ///
    /// Empty members still contribute their endpoints. Returns `None` for an empty iterator.
    pub fn cover<I>(spans: I) -> Option<Span>
    where
        I: IntoIterator<Item = Span>,
    {
        spans.into_iter().fold(None, |acc, span| match acc {
            None => Some(span),
            Some(acc) => Some(Span::new(acc.start.min(span.start), acc.end.max(span.end))),
        })
    }
}

impl From<(usize, usize)> for Span {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.start, self.end)
    }
}
