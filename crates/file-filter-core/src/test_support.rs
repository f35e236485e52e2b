//! Test doubles for the host traits.

use crate::host::{Document, DocumentError, LineLookup};
use crate::policy::DrawFlags;
use crate::span::Span;
use std::collections::BTreeMap;

/// Line lookup over a plain string.
pub(crate) struct TextLines {
    /// Character offset of every line start.
    line_starts: Vec<usize>,
    len: usize,
}

impl TextLines {
    pub(crate) fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        let mut len = 0;
        for (idx, ch) in text.chars().enumerate() {
            if ch == '\n' {
                line_starts.push(idx + 1);
            }
            len = idx + 1;
        }
        Self { line_starts, len }
    }
}

impl LineLookup for TextLines {
    fn line_boundary(&self, offset: usize) -> Span {
        let offset = offset.min(self.len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let start = self.line_starts[line];
        let end = self.line_starts.get(line + 1).copied().unwrap_or(self.len);
        Span::new(start, end)
    }
}

/// A document that records every host call instead of rendering anything.
pub(crate) struct RecordingDocument {
    text: String,
    lines: TextLines,
    pub(crate) selection: Option<Span>,
    pub(crate) folds: Vec<Span>,
    pub(crate) unfolds: Vec<Span>,
    pub(crate) marks: BTreeMap<String, (Vec<Span>, DrawFlags)>,
    pub(crate) status: BTreeMap<String, String>,
    pub(crate) scrolled_to: Option<usize>,
}

impl RecordingDocument {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            lines: TextLines::new(text),
            selection: None,
            folds: Vec::new(),
            unfolds: Vec::new(),
            marks: BTreeMap::new(),
            status: BTreeMap::new(),
            scrolled_to: None,
        }
    }

    pub(crate) fn fold_tuples(&self) -> Vec<(usize, usize)> {
        self.folds.iter().map(|s| (s.start, s.end)).collect()
    }
}

impl LineLookup for RecordingDocument {
    fn line_boundary(&self, offset: usize) -> Span {
        self.lines.line_boundary(offset)
    }
}

impl Document for RecordingDocument {
    fn len(&self) -> usize {
        self.lines.len
    }

    fn find_all(&self, pattern: &str) -> Result<Vec<Span>, DocumentError> {
        let re = regex::RegexBuilder::new(pattern)
            .multi_line(true)
            .build()
            .map_err(|err| DocumentError::InvalidRegex {
                pattern: pattern.to_string(),
                message: err.to_string(),
            })?;

        let to_char = |byte: usize| self.text[..byte].chars().count();
        Ok(re
            .find_iter(&self.text)
            .map(|m| Span::new(to_char(m.start()), to_char(m.end())))
            .filter(|span| !span.is_empty())
            .collect())
    }

    fn substr(&self, span: Span) -> String {
        self.text
            .chars()
            .skip(span.start)
            .take(span.len())
            .collect()
    }

    fn primary_selection(&self) -> Option<Span> {
        self.selection
    }

    fn fold(&mut self, span: Span) -> bool {
        if span.is_empty() {
            return false;
        }
        self.folds.push(span);
        true
    }

    fn unfold(&mut self, span: Span) {
        self.unfolds.push(span);
        self.folds.clear();
    }

    fn set_marks(&mut self, key: &str, spans: &[Span], flags: DrawFlags) {
        self.marks.insert(key.to_string(), (spans.to_vec(), flags));
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
        self.scrolled_to = Some(offset);
    }
}
