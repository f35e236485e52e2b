//! Folded regions.
//!
//! A [`FoldSet`] keeps folds sorted and pairwise disjoint: a new fold that overlaps existing
//! ones absorbs them, and a fold already covered by another is rejected. Touching folds stay
//! separate regions.

use file_filter_core::Span;

/// Sorted, non-overlapping folded spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoldSet {
    regions: Vec<Span>,
}

impl FoldSet {
    /// Create an empty fold set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folded regions, ordered by start.
    pub fn regions(&self) -> &[Span] {
        &self.regions
    }

    /// Number of folded regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns `true` if nothing is folded.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Fold `span`. Returns `false` for empty spans and spans already inside a fold.
    pub fn fold(&mut self, span: Span) -> bool {
        if span.is_empty() || self.regions.iter().any(|region| region.covers(span)) {
            return false;
        }

        let mut merged = span;
        self.regions.retain(|region| {
            if region.overlaps(merged) {
                merged = Span::new(region.start.min(merged.start), region.end.max(merged.end));
                false
            } else {
                true
            }
        });

        let pos = self
            .regions
            .binary_search(&merged)
            .unwrap_or_else(|pos| pos);
        self.regions.insert(pos, merged);
        true
    }

    /// Remove every fold intersecting `span`. An empty `span` removes the fold containing it.
    /// Returns the removed regions.
    pub fn unfold(&mut self, span: Span) -> Vec<Span> {
        let hit = |region: &Span| {
            region.overlaps(span) || (span.is_empty() && region.contains(span.start))
        };
        let removed: Vec<Span> = self.regions.iter().copied().filter(hit).collect();
        self.regions.retain(|region| !hit(region));
        removed
    }

    /// Remove every fold.
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// The fold hiding `offset`, if any.
    pub fn fold_at(&self, offset: usize) -> Option<Span> {
        let idx = self.regions.partition_point(|region| region.end <= offset);
        self.regions
            .get(idx)
            .copied()
            .filter(|region| region.contains(offset))
    }

    /// Returns `true` if `offset` is hidden by a fold.
    pub fn is_folded(&self, offset: usize) -> bool {
        self.fold_at(offset).is_some()
    }

    /// The unfolded spans of a document of `len` characters, in order. Empty spans are omitted.
    pub fn visible_spans(&self, len: usize) -> Vec<Span> {
        let mut visible = Vec::with_capacity(self.regions.len() + 1);
        let mut cursor = 0;
        for region in &self.regions {
            if region.start > cursor {
                visible.push(Span::new(cursor, region.start.min(len)));
            }
            cursor = cursor.max(region.end);
        }
        if cursor < len {
            visible.push(Span::new(cursor, len));
        }
        visible
    }
}
