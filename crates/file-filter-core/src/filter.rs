//! Filter orchestrator.
//!
//! One filter pass resets the document, searches for the regex, folds the gaps between matches
//! according to the folding policy and marks the matches with the highlight style. Folds and
//! marks are always recomputed from scratch, so running the same pass twice leaves the same
//! state as running it once.

use crate::clear::{ClearOptions, clear};
use crate::engine::fold_gaps;
use crate::gaps::compute_gaps;
use crate::host::{Document, DocumentError};
use crate::policy::{FoldingPolicy, HighlightStyle};
use crate::session::{self, SessionState};
use tracing::{debug, info, warn};

/// Mark group holding the highlighted matches.
pub const HIGHLIGHT_KEY: &str = "file_filter.view_settings.highlighted_regions";

/// Status-text key for the filter summary.
pub const STATUS_KEY: &str = "file_filter.status";

/// Counts produced by a successful filter pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterReport {
    /// Number of regex matches.
    pub match_count: usize,
    /// Number of gaps between matches (`match_count + 1`).
    pub gap_count: usize,
    /// Number of folds the host accepted.
    pub fold_count: usize,
}

/// What a call to [`filter`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// The regex was empty. Nothing was touched.
    NoRegex,
    /// The regex failed to compile. The document was reset and the status line reports the
    /// error.
    InvalidPattern {
        /// Compiler message from the host.
        message: String,
    },
    /// The filter was applied.
    Applied(FilterReport),
}

impl FilterOutcome {
    /// The report of an applied pass.
    pub fn report(&self) -> Option<&FilterReport> {
        match self {
            FilterOutcome::Applied(report) => Some(report),
            _ => None,
        }
    }
}

/// Status line for a completed pass.
pub fn status_text(
    regex: &str,
    folding: FoldingPolicy,
    highlight: HighlightStyle,
    match_count: usize,
) -> String {
    let matches = match match_count {
        0 => "no matches".to_string(),
        1 => "1 match".to_string(),
        n => format!("{n} matches"),
    };
    format!(
        "File Filter [{} | {}] /{regex}/ - {matches}",
        folding.label(),
        highlight.label()
    )
}

/// Status line for a pattern that failed to compile.
pub fn invalid_status_text(regex: &str, message: &str) -> String {
    format!("File Filter: invalid regex /{regex}/ - {message}")
}

/// Apply `regex` to `document`.
///
/// An empty regex is a logged no-op. Otherwise the document is cleared first, the regex and
/// the "filter active" flag are persisted, and the pass runs. A regex that fails to compile
/// leaves the document cleared, the flag erased and the regex persisted.
pub fn filter<D, S>(
    document: &mut D,
    session: &mut S,
    regex: &str,
    folding: FoldingPolicy,
    highlight: HighlightStyle,
) -> FilterOutcome
where
    D: Document + ?Sized,
    S: SessionState + ?Sized,
{
    if regex.is_empty() {
        debug!("no regex, not filtering");
        return FilterOutcome::NoRegex;
    }
    debug!(regex, folding = folding.name(), highlight = highlight.name(), "filtering");

    clear(document, session, ClearOptions::default());
    session::set_filter_active(session, true);
    session::set_current_regex(session, regex);

    let matches = match document.find_all(regex) {
        Ok(matches) => matches,
        Err(DocumentError::InvalidRegex { message, .. }) => {
            warn!(regex, %message, "invalid regex");
            document.set_status_text(STATUS_KEY, &invalid_status_text(regex, &message));
            session::set_filter_active(session, false);
            return FilterOutcome::InvalidPattern { message };
        }
    };

    let status = status_text(regex, folding, highlight, matches.len());
    document.set_status_text(STATUS_KEY, &status);

    let gaps = compute_gaps(document.len(), &matches);
    let fold_count = if folding.folds() && !matches.is_empty() {
        fold_gaps(document, &gaps, folding)
    } else {
        0
    };

    if highlight.marks() {
        document.set_marks(HIGHLIGHT_KEY, &matches, highlight.draw_flags());
    }

    let report = FilterReport {
        match_count: matches.len(),
        gap_count: gaps.len(),
        fold_count,
    };
    info!(regex, matches = report.match_count, folds = report.fold_count, "filter applied");
    FilterOutcome::Applied(report)
}
