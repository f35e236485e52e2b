//! Host document interface.
//!
//! The filter engine never owns text. Everything it needs from the editor (search, line
//! lookup, folding, marks, status text, scrolling) goes through [`Document`]. Hosts implement it
//! over their own buffer type; `file-filter-buffer` ships an in-memory implementation.

use crate::policy::DrawFlags;
use crate::span::Span;
use thiserror::Error;

/// Errors reported by a host document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// The regex pattern failed to compile.
    #[error("invalid regex '{pattern}': {message}")]
    InvalidRegex {
        /// The rejected pattern.
        pattern: String,
        /// The compiler error message.
        message: String,
    },
}

/// Line lookup capability, bound to one document.
pub trait LineLookup {
    /// Returns the full line containing `offset`: from the start of the line to the start of
    /// the next line (so the trailing newline is included), or to the document end.
    fn line_boundary(&self, offset: usize) -> Span;
}

/// An open document in the host editor.
pub trait Document: LineLookup {
    /// Document length in characters.
    fn len(&self) -> usize;

    /// Returns `true` if the document has no characters.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All non-overlapping matches of `pattern`, ordered left to right.
    fn find_all(&self, pattern: &str) -> Result<Vec<Span>, DocumentError>;

    /// Text covered by `span`.
    fn substr(&self, span: Span) -> String;

    /// Primary selection, if any. A caret is an empty selection.
    fn primary_selection(&self) -> Option<Span>;

    /// Fold (hide) `span`. Returns `false` if nothing new was folded.
    fn fold(&mut self, span: Span) -> bool;

    /// Unfold every fold intersecting `span`.
    fn unfold(&mut self, span: Span);

    /// Replace the mark group `key` with `spans`, drawn with `flags`.
    fn set_marks(&mut self, key: &str, spans: &[Span], flags: DrawFlags);

    /// Remove the mark group `key`.
    fn clear_marks(&mut self, key: &str);

    /// Show `text` in the status area under `key`.
    fn set_status_text(&mut self, key: &str, text: &str);

    /// Remove the status text stored under `key`.
    fn clear_status_text(&mut self, key: &str);

    /// Scroll so that `offset` is vertically centered.
    fn scroll_to_center(&mut self, offset: usize);
}
