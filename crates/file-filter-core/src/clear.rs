//! Clear / reset.

use crate::filter::{HIGHLIGHT_KEY, STATUS_KEY};
use crate::host::Document;
use crate::session::{self, SessionState};
use crate::span::Span;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which effects [`clear`] performs.
///
/// The session's current regex and the "filter active" flag are always erased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearOptions {
    /// Unfold the whole document.
    #[serde(default = "enabled")]
    pub unfold_regions: bool,
    /// Remove the highlight marks.
    #[serde(default = "enabled")]
    pub remove_highlights: bool,
    /// Scroll the primary caret (or offset 0) to the vertical center.
    #[serde(default = "enabled", alias = "center_viewport_on_carret")]
    pub center_viewport_on_caret: bool,
}

fn enabled() -> bool {
    true
}

impl ClearOptions {
    /// Options used by the clear command when the settings do not override them: everything on.
    pub const fn command_default() -> Self {
        Self {
            unfold_regions: true,
            remove_highlights: true,
            center_viewport_on_caret: true,
        }
    }
}

impl Default for ClearOptions {
    /// Unfold and remove highlights, leave the viewport alone.
    fn default() -> Self {
        Self {
            unfold_regions: true,
            remove_highlights: true,
            center_viewport_on_caret: false,
        }
    }
}

/// Reset the filter on `document`.
pub fn clear<D, S>(document: &mut D, session: &mut S, options: ClearOptions)
where
    D: Document + ?Sized,
    S: SessionState + ?Sized,
{
    debug!(?options, "clearing filter");

    session::erase_current_regex(session);

    if options.unfold_regions {
        let len = document.len();
        document.unfold(Span::new(0, len));
    }

    if options.remove_highlights {
        document.clear_marks(HIGHLIGHT_KEY);
    }

    if options.center_viewport_on_caret {
        let caret = document.primary_selection().map_or(0, |selection| selection.start);
        document.scroll_to_center(caret);
    }

    document.clear_status_text(STATUS_KEY);
    session::set_filter_active(session, false);
}
