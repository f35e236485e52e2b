//! Logical line index
//!
//! Line lookup over a `ropey::Rope`, in character offsets.

use file_filter_core::Span;
use ropey::Rope;

/// Logical line index - implemented using Rope data structure
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Build line index from text
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Total character count.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Number of logical lines. A trailing newline starts an (empty) last line.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line containing `char_offset` (clamped to the document end).
    pub fn char_to_line(&self, char_offset: usize) -> usize {
        self.rope.char_to_line(char_offset.min(self.char_count()))
    }

    /// First character offset of `line` (clamped to the last line).
    pub fn line_to_char(&self, line: usize) -> usize {
        let line = line.min(self.line_count().saturating_sub(1));
        self.rope.line_to_char(line)
    }

    /// Offset where the line after `line` starts, or the document end for the last line.
    pub fn line_end(&self, line: usize) -> usize {
        if line + 1 < self.line_count() {
            self.rope.line_to_char(line + 1)
        } else {
            self.char_count()
        }
    }

    /// Text of `span`, clamped to the document.
    pub fn slice(&self, span: Span) -> String {
        let end = span.end.min(self.char_count());
        let start = span.start.min(end);
        self.rope.slice(start..end).to_string()
    }

    /// Full line containing `char_offset`, trailing newline included.
    ///
    /// Offset `len` at the end of a document that ends in a newline belongs to the empty last
    /// line, whose span is `(len, len)`.
    pub fn line_span(&self, char_offset: usize) -> Span {
        let line = self.char_to_line(char_offset);
        Span::new(self.rope.line_to_char(line), self.line_end(line))
    }
}
