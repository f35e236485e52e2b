//! In-memory host document.

use crate::folds::FoldSet;
use crate::line_index::LineIndex;
use crate::search;
use file_filter_core::{Document, DocumentError, DrawFlags, LineLookup, Span};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Default number of lines in the viewport.
pub const DEFAULT_VIEWPORT_HEIGHT: usize = 40;

/// A group of marked spans drawn with one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkGroup {
    /// Marked spans, as set.
    pub spans: Vec<Span>,
    /// How the host draws them.
    pub flags: DrawFlags,
}

/// Vertical viewport, in logical lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// First visible line.
    pub top_line: usize,
    /// Number of visible lines.
    pub height: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            top_line: 0,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

/// Rope-backed text buffer implementing [`Document`].
///
/// The text is immutable; everything the filter changes (folds, marks, status text, selection,
/// viewport) is view state layered on top.
pub struct TextBuffer {
    text: String,
    lines: LineIndex,
    folds: FoldSet,
    marks: BTreeMap<String, MarkGroup>,
    status: BTreeMap<String, String>,
    selection: Option<Span>,
    viewport: Viewport,
}

impl std::fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBuffer")
            .field("chars", &self.lines.char_count())
            .field("lines", &self.lines.line_count())
            .field("folds", &self.folds)
            .field("marks", &self.marks)
            .field("status", &self.status)
            .field("selection", &self.selection)
            .field("viewport", &self.viewport)
            .finish()
    }
}

impl TextBuffer {
    /// Create a buffer holding `text`.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            lines: LineIndex::from_text(text),
            folds: FoldSet::new(),
            marks: BTreeMap::new(),
            status: BTreeMap::new(),
            selection: None,
            viewport: Viewport::default(),
        }
    }

    /// Set the viewport height, keeping the top line.
    pub fn with_viewport_height(mut self, height: usize) -> Self {
        self.viewport.height = height;
        self
    }

    /// The whole text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of logical lines.
    pub fn line_count(&self) -> usize {
        self.lines.line_count()
    }

    /// Line containing `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        self.lines.char_to_line(offset)
    }

    /// Folded regions, ordered by start.
    pub fn folded_regions(&self) -> &[Span] {
        self.folds.regions()
    }

    /// Returns `true` if `offset` is hidden by a fold.
    pub fn is_folded(&self, offset: usize) -> bool {
        self.folds.is_folded(offset)
    }

    /// Unfolded spans, in order.
    pub fn visible_spans(&self) -> Vec<Span> {
        self.folds.visible_spans(self.lines.char_count())
    }

    /// The mark group stored under `key`.
    pub fn marks(&self, key: &str) -> Option<&MarkGroup> {
        self.marks.get(key)
    }

    /// Number of mark groups.
    pub fn mark_group_count(&self) -> usize {
        self.marks.len()
    }

    /// Status text stored under `key`.
    pub fn status_text(&self, key: &str) -> Option<&str> {
        self.status.get(key).map(String::as_str)
    }

    /// Set the primary selection. `None` clears it.
    pub fn set_selection(&mut self, selection: Option<Span>) {
        self.selection = selection;
    }

    /// Place a caret (empty selection) at `offset`.
    pub fn set_caret(&mut self, offset: usize) {
        self.selection = Some(Span::point(offset.min(self.lines.char_count())));
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Scroll so that `line` is the first visible line (clamped to the last line).
    pub fn scroll_to_line(&mut self, line: usize) {
        self.viewport.top_line = line.min(self.lines.line_count().saturating_sub(1));
    }

    /// Character span shown by the viewport.
    pub fn visible_region(&self) -> Span {
        let top = self.viewport.top_line;
        let bottom = (top + self.viewport.height).min(self.lines.line_count());
        if bottom <= top {
            return Span::point(self.lines.line_to_char(top));
        }
        Span::new(self.lines.line_to_char(top), self.lines.line_end(bottom - 1))
    }

    /// Returns `true` if the viewport shows `offset`. The document end counts as shown when the
    /// last line is.
    pub fn is_offset_in_view(&self, offset: usize) -> bool {
        let region = self.visible_region();
        region.contains(offset)
            || (offset == region.end && region.end == self.lines.char_count())
    }

    /// The text with every fold replaced by `placeholder`.
    pub fn render_visible(&self, placeholder: &str) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut cursor = 0;
        for region in self.folds.regions() {
            out.push_str(&self.lines.slice(Span::new(cursor, region.start)));
            out.push_str(placeholder);
            cursor = region.end;
        }
        out.push_str(&self.lines.slice(Span::new(cursor, self.lines.char_count())));
        out
    }
}

impl LineLookup for TextBuffer {
    fn line_boundary(&self, offset: usize) -> Span {
        self.lines.line_span(offset)
    }
}

impl Document for TextBuffer {
    fn len(&self) -> usize {
        self.lines.char_count()
    }

    fn find_all(&self, pattern: &str) -> Result<Vec<Span>, DocumentError> {
        let matches = search::find_all(&self.text, pattern)?;
        trace!(pattern, matches = matches.len(), "search");
        Ok(matches)
    }

    fn substr(&self, span: Span) -> String {
        self.lines.slice(span)
    }

    fn primary_selection(&self) -> Option<Span> {
        self.selection
    }

    fn fold(&mut self, span: Span) -> bool {
        if span.end > self.lines.char_count() {
            debug!(%span, "fold outside document rejected");
            return false;
        }
        self.folds.fold(span)
    }

    fn unfold(&mut self, span: Span) {
        let removed = self.folds.unfold(span);
        trace!(%span, removed = removed.len(), "unfold");
    }

    fn set_marks(&mut self, key: &str, spans: &[Span], flags: DrawFlags) {
        self.marks.insert(
            key.to_string(),
            MarkGroup {
                spans: spans.to_vec(),
                flags,
            },
        );
    }

    fn clear_marks(&mut self, key: &str) {
        self.marks.remove(key);
    }

    fn set_status_text(&mut self, key: &str, text: &str) {
        self.status.insert(key.to_string(), text.to_string());
    }

    fn clear_status_text(&mut self, key: &str) {
        self.status.remove(key);
    }

    fn scroll_to_center(&mut self, offset: usize) {
        let line = self.lines.char_to_line(offset);
        let max_top = self
            .lines
            .line_count()
            .saturating_sub(self.viewport.height.max(1));
        self.viewport.top_line = line.saturating_sub(self.viewport.height / 2).min(max_top);
        trace!(offset, line, top = self.viewport.top_line, "scrolled to center");
    }
}
