#![warn(missing_docs)]
//! File Filter Buffer - In-Memory Host Document
//!
//! # Overview
//!
//! `file-filter-buffer` provides [`TextBuffer`], a reference implementation of the
//! [`file_filter_core::Document`] host trait. It keeps the text in a `ropey::Rope` for line
//! lookup, searches with `regex` in character offsets, and models the view state an editor
//! would own: folds, mark groups, status text, the primary selection and a line viewport.
//!
//! It backs the integration tests, the benchmarks and the `file-filter` command-line tool.
//!
//! # Quick Start
//!
//! ```rust
//! use file_filter_buffer::TextBuffer;
//! use file_filter_core::{filter, FoldingPolicy, HighlightStyle, MemorySession};
//!
//! let mut buffer = TextBuffer::new("abc\nd1e\nfgh\ni2j\nklm\nn3o4p");
//! let mut session = MemorySession::new();
//!
//! filter(&mut buffer, &mut session, "[0-9]", FoldingPolicy::Line, HighlightStyle::Solid);
//!
//! let folds: Vec<_> = buffer.folded_regions().iter().map(|s| (s.start, s.end)).collect();
//! assert_eq!(folds, vec![(0, 3), (7, 11), (15, 19)]);
//! ```

pub mod buffer;
pub mod folds;
pub mod line_index;
pub mod search;

pub use buffer::{DEFAULT_VIEWPORT_HEIGHT, MarkGroup, TextBuffer, Viewport};
pub use folds::FoldSet;
pub use line_index::LineIndex;
