//! Per-document session state.
//!
//! # Overview
//!
//! Hosts keep a small key-value store per open document. The filter persists its current regex,
//! policies, history and the "filter active" flag there, so repeated invocations pick up where
//! the last one left off. Values are plain [`serde_json::Value`]s, which keeps the store
//! compatible with editors that persist view settings as JSON.
//!
//! # Example
//!
//! ```rust
//! use file_filter_core::session::{self, MemorySession};
//! use file_filter_core::{FoldingPolicy, Settings};
//! use serde_json::json;
//!
//! let mut state = MemorySession::new();
//! let settings = Settings::default();
//!
//! // Unknown values fall back to the hard default.
//! let policy = session::set_folding_policy(&mut state, &settings, Some(&json!(999)));
//! assert_eq!(policy, FoldingPolicy::Line);
//! assert_eq!(session::folding_policy(&mut state, &settings), FoldingPolicy::Line);
//! ```

use crate::policy::{FoldingPolicy, HighlightStyle};
use crate::settings::Settings;
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::{debug, warn};

/// Session keys.
pub mod keys {
    /// Present (and `true`) while a filter is applied.
    pub const IS_FILTER_ACTIVE: &str = "file_filter.view_settings.is_filter_active";
    /// The regex of the last filter pass.
    pub const CURRENT_REGEX: &str = "file_filter.view_settings.current_regex";
    /// Most-recent-first list of confirmed regexes.
    pub const REGEX_HISTORY: &str = "file_filter.view_settings.regex_history";
    /// Machine name of the current folding policy.
    pub const CURRENT_FOLDING_TYPE: &str = "file_filter.view_settings.current_folding_type";
    /// Machine name of the current highlight style.
    pub const CURRENT_HIGHLIGHT_TYPE: &str = "file_filter.view_settings.current_highlight_type";
    /// Keybinding context that is true while a filter is active.
    pub const KEYMAP_CONTEXT_CLEAR: &str = "file_filter.keymaps_context.clear";
}

/// Key-value state scoped to one open document.
pub trait SessionState {
    /// Value stored under `key`.
    fn get(&self, key: &str) -> Option<Value>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: Value);

    /// Remove `key`. Erasing a missing key is a no-op.
    fn erase(&mut self, key: &str);
}

/// In-memory [`SessionState`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySession {
    values: BTreeMap<String, Value>,
}

impl MemorySession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SessionState for MemorySession {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    fn erase(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// The persisted regex, if one is set and non-empty.
pub fn current_regex<S: SessionState + ?Sized>(session: &S) -> Option<String> {
    match session.get(keys::CURRENT_REGEX) {
        Some(Value::String(regex)) if !regex.is_empty() => Some(regex),
        _ => None,
    }
}

/// Persist `regex` as the current regex.
pub fn set_current_regex<S: SessionState + ?Sized>(session: &mut S, regex: &str) {
    session.set(keys::CURRENT_REGEX, Value::String(regex.to_string()));
}

/// Forget the current regex.
pub fn erase_current_regex<S: SessionState + ?Sized>(session: &mut S) {
    session.erase(keys::CURRENT_REGEX);
}

/// Returns `true` while a filter is applied.
pub fn is_filter_active<S: SessionState + ?Sized>(session: &S) -> bool {
    matches!(session.get(keys::IS_FILTER_ACTIVE), Some(Value::Bool(true)))
}

/// Set or erase the "filter active" flag. The flag is only ever present while active.
pub fn set_filter_active<S: SessionState + ?Sized>(session: &mut S, active: bool) {
    if active {
        session.set(keys::IS_FILTER_ACTIVE, Value::Bool(true));
    } else {
        session.erase(keys::IS_FILTER_ACTIVE);
    }
}

/// Answer a host keybinding-context query. Returns `None` for keys this crate does not own.
pub fn query_context<S: SessionState + ?Sized>(session: &S, key: &str) -> Option<bool> {
    (key == keys::KEYMAP_CONTEXT_CLEAR).then(|| is_filter_active(session))
}

/// Resolve and persist the folding policy.
///
/// Candidates are tried in order: `requested`, the session value, the settings default, then
/// [`FoldingPolicy::default`]. Unset or unrecognized values are skipped. The winner's machine
/// name is written back to the session.
pub fn set_folding_policy<S: SessionState + ?Sized>(
    session: &mut S,
    settings: &Settings,
    requested: Option<&Value>,
) -> FoldingPolicy {
    let policy = resolve(
        session,
        keys::CURRENT_FOLDING_TYPE,
        requested,
        settings.default_folding_type.as_ref(),
        "folding policy",
    );
    session.set(
        keys::CURRENT_FOLDING_TYPE,
        Value::String(FoldingPolicy::name(policy).to_string()),
    );
    policy
}

/// The session's folding policy, resolved (and persisted) like
/// [`set_folding_policy`] with no requested value.
pub fn folding_policy<S: SessionState + ?Sized>(
    session: &mut S,
    settings: &Settings,
) -> FoldingPolicy {
    set_folding_policy(session, settings, None)
}

/// Resolve and persist the highlight style. Same fallback chain as [`set_folding_policy`].
pub fn set_highlight_style<S: SessionState + ?Sized>(
    session: &mut S,
    settings: &Settings,
    requested: Option<&Value>,
) -> HighlightStyle {
    let style = resolve(
        session,
        keys::CURRENT_HIGHLIGHT_TYPE,
        requested,
        settings.default_highlight_type.as_ref(),
        "highlight style",
    );
    session.set(
        keys::CURRENT_HIGHLIGHT_TYPE,
        Value::String(HighlightStyle::name(style).to_string()),
    );
    style
}

/// The session's highlight style, resolved (and persisted) like [`set_highlight_style`] with
/// no requested value.
pub fn highlight_style<S: SessionState + ?Sized>(
    session: &mut S,
    settings: &Settings,
) -> HighlightStyle {
    set_highlight_style(session, settings, None)
}

/// Resolve the folding policy without persisting it.
pub fn peek_folding_policy<S: SessionState + ?Sized>(
    session: &S,
    settings: &Settings,
) -> FoldingPolicy {
    resolve(
        session,
        keys::CURRENT_FOLDING_TYPE,
        None,
        settings.default_folding_type.as_ref(),
        "folding policy",
    )
}

/// Resolve the highlight style without persisting it.
pub fn peek_highlight_style<S: SessionState + ?Sized>(
    session: &S,
    settings: &Settings,
) -> HighlightStyle {
    resolve(
        session,
        keys::CURRENT_HIGHLIGHT_TYPE,
        None,
        settings.default_highlight_type.as_ref(),
        "highlight style",
    )
}

fn parse_name<T: FromStr>(value: &Value) -> Option<T> {
    value.as_str()?.parse().ok()
}

fn resolve<S, T>(
    session: &S,
    key: &str,
    requested: Option<&Value>,
    settings_default: Option<&Value>,
    kind: &str,
) -> T
where
    S: SessionState + ?Sized,
    T: FromStr + Default + std::fmt::Debug,
{
    if let Some(value) = requested {
        match parse_name(value) {
            Some(resolved) => return resolved,
            None => warn!(%value, kind, "invalid value, falling back"),
        }
    }

    if let Some(resolved) = session.get(key).as_ref().and_then(parse_name) {
        return resolved;
    }

    if let Some(value) = settings_default {
        match parse_name(value) {
            Some(resolved) => return resolved,
            None => warn!(%value, kind, "invalid settings default, ignoring"),
        }
    }

    let resolved = T::default();
    debug!(?resolved, kind, "using built-in default");
    resolved
}
