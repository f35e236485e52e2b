//! Gap computation and gap splitting.
//!
//! Gaps are the complement of the match spans: the text between document start and the first
//! match, between consecutive matches, and between the last match and document end. A pass with
//! `n` matches always produces `n + 1` gaps, some of which may be empty.

use crate::host::LineLookup;
use crate::span::Span;

/// One gap between matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    /// The gap itself.
    pub span: Span,
    /// Gap between document start and the first match.
    pub is_first: bool,
    /// Gap between the last match and document end.
    pub is_last: bool,
}

impl Gap {
    /// Returns `true` if neither the first nor the last gap.
    pub fn is_interior(&self) -> bool {
        !self.is_first && !self.is_last
    }
}

/// Compute the ordered gaps for a document of `len` characters and its ordered,
/// non-overlapping `matches`.
///
/// Without matches the single gap `(0, len)` is both first and last.
pub fn compute_gaps(len: usize, matches: &[Span]) -> Vec<Gap> {
    let mut bounds = Vec::with_capacity(matches.len() + 2);
    bounds.push(Span::point(0));
    bounds.extend_from_slice(matches);
    bounds.push(Span::point(len));

    let count = bounds.len() - 1;
    bounds
        .windows(2)
        .enumerate()
        .map(|(idx, pair)| Gap {
            span: Span::new(pair[0].end, pair[1].start),
            is_first: idx == 0,
            is_last: idx + 1 == count,
        })
        .collect()
}

/// A gap split at line boundaries into three contiguous parts.
///
/// `before` runs from the gap start to the end of its first line, `after` from the start of
/// the gap's last line to the gap end, and `middle` covers the whole lines in between. When the
/// gap starts and ends on the same line, `middle` is the whole gap and the other two are empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapPartition {
    /// Tail of the line the gap starts on.
    pub before: Span,
    /// Whole lines strictly inside the gap.
    pub middle: Span,
    /// Head of the line the gap ends on.
    pub after: Span,
    /// The gap starts and ends on the same line.
    pub same_line: bool,
}

impl GapPartition {
    /// Split `gap` using the document's line boundaries.
    pub fn split<L>(gap: Span, lines: &L) -> Self
    where
        L: LineLookup + ?Sized,
    {
        let first_line = lines.line_boundary(gap.start);
        let last_line = lines.line_boundary(gap.end);

        if first_line == last_line {
            Self {
                before: Span::point(gap.start),
                middle: gap,
                after: Span::point(gap.end),
                same_line: true,
            }
        } else {
            Self {
                before: Span::new(gap.start, first_line.end),
                middle: Span::new(first_line.end, last_line.start),
                after: Span::new(last_line.start, gap.end),
                same_line: false,
            }
        }
    }

    /// Returns `true` if the gap starts and ends on the same line.
    pub fn is_same_line(&self) -> bool {
        self.same_line
    }

    /// The gap this partition was built from.
    pub fn span(&self) -> Span {
        Span::new(self.before.start, self.after.end)
    }
}
