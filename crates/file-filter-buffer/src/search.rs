//! Regex search in character offsets.
//!
//! The regex engine reports byte offsets; hosts and the filter engine work in characters.
//! [`CharIndex`] maps between the two once per search.

use file_filter_core::{DocumentError, Span};
use regex::{Regex, RegexBuilder};

#[derive(Debug)]
pub(crate) struct CharIndex {
    char_to_byte: Vec<usize>,
    text_len: usize,
}

impl CharIndex {
    pub(crate) fn new(text: &str) -> Self {
        let mut char_to_byte: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        char_to_byte.push(text.len());
        Self {
            char_to_byte,
            text_len: text.len(),
        }
    }

    pub(crate) fn char_count(&self) -> usize {
        self.char_to_byte.len().saturating_sub(1)
    }

    pub(crate) fn byte_to_char(&self, byte_offset: usize) -> usize {
        let clamped = byte_offset.min(self.text_len);
        match self.char_to_byte.binary_search(&clamped) {
            Ok(idx) => idx,
            Err(idx) => idx,
        }
    }
}

/// Compile `pattern` the way every search in this crate does: multi-line, so `^` and `$` match
/// at line boundaries.
pub fn compile(pattern: &str) -> Result<Regex, DocumentError> {
    RegexBuilder::new(pattern)
        .multi_line(true)
        .build()
        .map_err(|err| DocumentError::InvalidRegex {
            pattern: pattern.to_string(),
            message: err.to_string(),
        })
}

/// All non-empty, non-overlapping matches of `pattern` in `text`, left to right.
///
/// An empty pattern yields no matches. Zero-length matches are skipped.
pub fn find_all(text: &str, pattern: &str) -> Result<Vec<Span>, DocumentError> {
    if pattern.is_empty() {
        return Ok(Vec::new());
    }

    let re = compile(pattern)?;
    let index = CharIndex::new(text);

    let matches = re
        .find_iter(text)
        .map(|m| Span::new(index.byte_to_char(m.start()), index.byte_to_char(m.end())))
        .filter(|span| !span.is_empty())
        .collect();
    Ok(matches)
}
