#![warn(missing_docs)]
//! File Filter Core - Headless Regex Filter Engine
//!
//! # Overview
//!
//! `file-filter-core` hides everything in a document that does not match a regex and
//! highlights what does. It never owns text: the host editor provides the document through
//! [`Document`] and per-document state through [`SessionState`], and the engine drives them.
//!
//! # Core Features
//!
//! - **Gap Computation**: the complement of the match spans, `matches + 1` gaps per pass
//! - **Gap Splitting**: each gap split at line boundaries into `before`, `middle` and `after`
//! - **Folding Policies**: five rule sets deciding which parts of each gap get folded
//! - **Highlight Styles**: six draw styles for the matched spans
//! - **Session State**: current regex, policies, history and the "filter active" flag
//! - **Live Settings**: favorites and defaults, reloaded with scoped subscriptions
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Commands (menus, prompts, previews)        │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Filter / Clear orchestration               │  ← Session + host effects
//! ├─────────────────────────────────────────────┤
//! │  Fold-policy engine                         │  ← Folding rules
//! ├─────────────────────────────────────────────┤
//! │  Gaps and gap partitions                    │  ← Span arithmetic
//! ├─────────────────────────────────────────────┤
//! │  Host traits (Document, SessionState)       │  ← Editor integration
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use file_filter_core::{compute_gaps, GapPartition, Span};
//! # use file_filter_core::LineLookup;
//! # struct OneLinePerTen;
//! # impl LineLookup for OneLinePerTen {
//! #     fn line_boundary(&self, offset: usize) -> Span {
//! #         let start = offset / 10 * 10;
//! #         Span::new(start, start + 10)
//! #     }
//! # }
//!
//! let matches = [Span::new(3, 5), Span::new(24, 26)];
//! let gaps = compute_gaps(40, &matches);
//! assert_eq!(gaps.len(), 3);
//!
//! let partition = GapPartition::split(gaps[1].span, &OneLinePerTen);
//! assert_eq!(partition.before, Span::new(5, 10));
//! assert_eq!(partition.middle, Span::new(10, 20));
//! assert_eq!(partition.after, Span::new(20, 24));
//! ```
//!
//! # Module Description
//!
//! - [`span`] - Character-offset spans
//! - [`policy`] - Folding policies, highlight styles, draw flags
//! - [`gaps`] - Gap computation and splitting
//! - [`engine`] - Fold-span primitive and fold-policy engine
//! - [`filter`] - Filter orchestrator
//! - [`clear`] - Clear / reset
//! - [`session`] - Per-document session state
//! - [`history`] - Regex history
//! - [`settings`] - Settings file model and live reload
//! - [`preview`] - Mini-HTML match preview
//! - [`commands`] - Menu and prompt command flows
//!
//! # Logging
//!
//! Every operation emits `tracing` events. The library never installs a subscriber; the
//! embedding application picks one.

pub mod clear;
pub mod commands;
pub mod engine;
pub mod filter;
pub mod gaps;
pub mod history;
pub mod host;
pub mod policy;
pub mod preview;
pub mod session;
pub mod settings;
pub mod span;

#[cfg(test)]
mod test_support;

pub use clear::{ClearOptions, clear};
pub use commands::{
    Command, CommandContext, CommandError, CommandExecutor, CommandResult, FilterMenuOption,
    PanelItem, PreviewFn, Ui,
};
pub use engine::{fold_gap, fold_gaps, fold_span};
pub use filter::{FilterOutcome, FilterReport, HIGHLIGHT_KEY, STATUS_KEY, filter};
pub use gaps::{Gap, GapPartition, compute_gaps};
pub use history::{HISTORY_LIMIT, add_to_history, regex_history};
pub use host::{Document, DocumentError, LineLookup};
pub use policy::{DrawFlags, FoldingPolicy, HighlightStyle, ParsePolicyError};
pub use preview::{filter_preview, render_preview};
pub use session::{MemorySession, SessionState};
pub use settings::{Favorite, LiveSettings, Settings, SettingsError, SettingsStore, Subscription};
pub use span::Span;
