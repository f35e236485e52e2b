//! Fold-policy engine.
//!
//! Turns each gap between matches into host fold calls according to a [`FoldingPolicy`].
//!
//! | Policy | First gap | Last gap | Same-line interior gap | Other interior gap |
//! |---|---|---|---|---|
//! | `Line` | `before+middle`, shrunk | `middle+after` unless same-line | nothing | `middle` widened one char to the left, shrunk |
//! | `MatchOnly` | `before+middle`, shrunk; `after` | as interior | `middle` | `before+middle`, shrunk; `after` |
//! | `BeforeOnly` | `before+after` | as interior | `after` | `middle+after` |
//! | `AfterOnly` | as interior | whole gap | `before+middle`, shrunk | `before+middle`, shrunk |
//! | `HighlightOnly` | nothing | nothing | nothing | nothing |
//!
//! "Shrunk" drops the last character of the folded span so the fold never swallows the first
//! character of the next visible line. Empty gaps are skipped before any line lookup.

use crate::gaps::{Gap, GapPartition};
use crate::host::Document;
use crate::policy::FoldingPolicy;
use crate::span::Span;
use tracing::{debug, trace};

/// Fold the bounding span of `spans`, optionally dropping its last character.
///
/// Returns `false` without calling the host when the resulting span is empty (including when
/// `spans` is empty), otherwise forwards the host's answer.
pub fn fold_span<D, I>(document: &mut D, spans: I, shrink_end: bool) -> bool
where
    D: Document + ?Sized,
    I: IntoIterator<Item = Span>,
{
    let Some(mut span) = Span::cover(spans) else {
        return false;
    };
    if shrink_end {
        span.end = span.end.saturating_sub(1);
    }

    if span.is_empty() {
        trace!(%span, shrink_end, "fold span is empty, not folding");
        return false;
    }

    trace!(%span, shrink_end, "folding");
    document.fold(span)
}

/// Apply `policy` to one gap. Returns the number of folds the host accepted.
pub fn fold_gap<D>(document: &mut D, gap: Gap, policy: FoldingPolicy) -> usize
where
    D: Document + ?Sized,
{
    if gap.span.is_empty() || !policy.folds() {
        return 0;
    }

    let GapPartition {
        before,
        middle,
        after,
        same_line,
    } = GapPartition::split(gap.span, document);
    trace!(gap = %gap.span, %before, %middle, %after, same_line, "split gap");

    let mut folded = 0;
    let mut fold = |spans: &[Span], shrink_end: bool| {
        if fold_span(document, spans.iter().copied(), shrink_end) {
            folded += 1;
        }
    };

    match policy {
        FoldingPolicy::Line => {
            if gap.is_first {
                fold(&[before, middle], true);
            }
            if gap.is_last && !same_line {
                fold(&[middle, after], false);
            }
            if gap.is_interior() && !same_line {
                // Start on the newline ending the previous match's line.
                let widened = Span::new(middle.start.saturating_sub(1), middle.end);
                fold(&[widened], true);
            }
        }
        FoldingPolicy::MatchOnly => {
            if gap.is_first || !same_line {
                fold(&[before, middle], true);
                fold(&[after], false);
            } else {
                fold(&[middle], false);
            }
        }
        FoldingPolicy::BeforeOnly => {
            if gap.is_first {
                fold(&[before, after], false);
            } else if same_line {
                fold(&[after], false);
            } else {
                fold(&[middle, after], false);
            }
        }
        FoldingPolicy::AfterOnly => {
            if gap.is_last {
                fold(&[gap.span], false);
            } else {
                fold(&[before, middle], true);
            }
        }
        FoldingPolicy::HighlightOnly => {}
    }

    folded
}

/// Apply `policy` to every gap. Returns the total number of folds the host accepted.
pub fn fold_gaps<D>(document: &mut D, gaps: &[Gap], policy: FoldingPolicy) -> usize
where
    D: Document + ?Sized,
{
    let folded = gaps
        .iter()
        .map(|gap| fold_gap(document, *gap, policy))
        .sum();
    debug!(policy = policy.name(), gaps = gaps.len(), folded, "folded gaps");
    folded
}
