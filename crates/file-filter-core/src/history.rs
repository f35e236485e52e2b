//! Regex history.

use crate::session::{SessionState, keys};
use serde_json::Value;
use tracing::trace;

/// Maximum number of remembered regexes.
pub const HISTORY_LIMIT: usize = 100;

/// The stored history, most recent first. Empty and non-string entries are skipped.
pub fn regex_history<S: SessionState + ?Sized>(session: &S) -> Vec<String> {
    match session.get(keys::REGEX_HISTORY) {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(text) if !text.is_empty() => Some(text),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Prepend `text` to the history, drop empty entries, cap at [`HISTORY_LIMIT`] and persist.
///
/// Repeated entries are kept; the history is a log, not a set.
pub fn add_to_history<S: SessionState + ?Sized>(session: &mut S, text: &str) {
    let mut history = Vec::with_capacity(HISTORY_LIMIT);
    if !text.is_empty() {
        history.push(text.to_string());
    }
    history.extend(regex_history(session));
    history.truncate(HISTORY_LIMIT);

    trace!(entries = history.len(), "saving regex history");
    session.set(
        keys::REGEX_HISTORY,
        Value::Array(history.into_iter().map(Value::String).collect()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySession;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_most_recent_first() {
        let mut session = MemorySession::new();
        add_to_history(&mut session, "a");
        add_to_history(&mut session, "b");
        add_to_history(&mut session, "a");
        assert_eq!(regex_history(&session), vec!["a", "b", "a"]);
    }

    #[test]
    fn test_empty_text_is_not_recorded() {
        let mut session = MemorySession::new();
        add_to_history(&mut session, "");
        assert!(regex_history(&session).is_empty());
        assert_eq!(session.get(keys::REGEX_HISTORY), Some(json!([])));
    }

    #[test]
    fn test_malformed_entries_are_dropped() {
        let mut session = MemorySession::new();
        session.set(keys::REGEX_HISTORY, json!(["x", "", null, 3, "y"]));
        add_to_history(&mut session, "z");
        assert_eq!(
            session.get(keys::REGEX_HISTORY),
            Some(json!(["z", "x", "y"]))
        );
    }

    #[test]
    fn test_capped_at_limit() {
        let mut session = MemorySession::new();
        for i in 0..250 {
            add_to_history(&mut session, &format!("re{i}"));
        }
        let history = regex_history(&session);
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[0], "re249");
        assert_eq!(history[HISTORY_LIMIT - 1], "re150");
    }
}
