//! User-facing commands.
//!
//! # Overview
//!
//! Commands are the menu and prompt flows a host binds to its command palette: open the filter
//! menu, filter with a regex, change the folding policy or highlight style, clear. The host
//! supplies the document, its session state and a [`Ui`] that presents quick panels and input
//! panels; [`CommandExecutor`] runs the flow to completion.
//!
//! A dismissed panel ends the flow with [`CommandResult::Cancelled`] and leaves the session
//! untouched.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut executor = CommandExecutor::new(&store);
//! let mut ctx = CommandContext::new(&mut document, &mut session, &mut ui);
//! executor.execute(&mut ctx, Command::Filter { regex: "ERROR".into() })?;
//! ```

use crate::clear::clear;
use crate::filter::{FilterOutcome, filter};
use crate::history::{add_to_history, regex_history};
use crate::host::Document;
use crate::policy::{FoldingPolicy, HighlightStyle};
use crate::preview::filter_preview;
use crate::session::{self, SessionState};
use crate::settings::{LiveSettings, Settings, SettingsStore};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Placeholder entry shown when the history is empty.
pub const EMPTY_HISTORY_ITEM: &str = "** empty history **";

/// Placeholder entry shown when no favorites are configured.
pub const EMPTY_FAVORITES_ITEM: &str = "** no favorites **";

/// One row of a quick panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelItem {
    /// Main text.
    pub label: String,
    /// Secondary text shown next to the label.
    pub detail: Option<String>,
}

impl PanelItem {
    /// Item with a label only.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            detail: None,
        }
    }

    /// Item with a label and a detail.
    pub fn with_detail(label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            detail: Some(detail.into()),
        }
    }
}

/// Preview hook handed to input panels: HTML for the text typed so far.
pub type PreviewFn<'a> = dyn Fn(&str) -> Option<String> + 'a;

/// Menu and prompt presentation.
pub trait Ui {
    /// Let the user pick one of `items`. `None` means the panel was dismissed.
    fn show_quick_panel(&mut self, items: &[PanelItem], placeholder: &str) -> Option<usize>;

    /// Let the user type a line of text, starting from `initial_text`. The UI may call
    /// `preview` as the text changes. `None` means the panel was dismissed.
    fn show_input_panel(
        &mut self,
        caption: &str,
        initial_text: &str,
        preview: &PreviewFn<'_>,
    ) -> Option<String>;
}

/// Entries of the filter menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMenuOption {
    /// Type a new regex.
    New,
    /// Type a new regex, starting from the selected text.
    NewFromSelection,
    /// Pick a regex from the history.
    History,
    /// Pick a favorite regex.
    Favorites,
    /// Clear the filter.
    Clear,
}

impl FilterMenuOption {
    /// All options, in menu order.
    pub const ALL: [FilterMenuOption; 5] = [
        FilterMenuOption::New,
        FilterMenuOption::NewFromSelection,
        FilterMenuOption::History,
        FilterMenuOption::Favorites,
        FilterMenuOption::Clear,
    ];

    /// Menu label.
    pub const fn label(self) -> &'static str {
        match self {
            FilterMenuOption::New => "New",
            FilterMenuOption::NewFromSelection => "New from selection",
            FilterMenuOption::History => "From history",
            FilterMenuOption::Favorites => "From favorites",
            FilterMenuOption::Clear => "Clear",
        }
    }
}

/// A command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the filter menu and run the chosen flow.
    OpenFilterMenu,
    /// Filter with `regex` and add it to the history.
    Filter {
        /// The regex.
        regex: String,
    },
    /// Filter again with the session's current regex and policies.
    Refilter,
    /// Change the folding policy, then refilter. `None` asks the user.
    SetFoldingPolicy {
        /// The new policy.
        policy: Option<FoldingPolicy>,
    },
    /// Change the highlight style, then refilter. `None` asks the user.
    SetHighlightStyle {
        /// The new style.
        style: Option<HighlightStyle>,
    },
    /// Clear the filter using the configured clear options.
    Clear,
}

/// Result of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// A filter pass ran (or was skipped for lack of a regex).
    Filtered(FilterOutcome),
    /// The folding policy changed and the filter was re-run.
    FoldingPolicySet {
        /// The policy now in effect.
        policy: FoldingPolicy,
        /// Outcome of the re-run.
        outcome: FilterOutcome,
    },
    /// The highlight style changed and the filter was re-run.
    HighlightStyleSet {
        /// The style now in effect.
        style: HighlightStyle,
        /// Outcome of the re-run.
        outcome: FilterOutcome,
    },
    /// The filter was cleared.
    Cleared,
    /// The user dismissed a panel, or picked a placeholder entry.
    Cancelled,
}

/// Command errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The UI returned an index outside the list it was shown.
    #[error("selection {index} out of range for {len} items")]
    SelectionOutOfRange {
        /// Returned index.
        index: usize,
        /// Number of items shown.
        len: usize,
    },
}

/// What a command runs against.
pub struct CommandContext<'a> {
    /// The document being filtered.
    pub document: &'a mut dyn Document,
    /// The document's session state.
    pub session: &'a mut dyn SessionState,
    /// Panel presentation.
    pub ui: &'a mut dyn Ui,
}

impl<'a> CommandContext<'a> {
    /// Bundle a document, its session and a UI.
    pub fn new(
        document: &'a mut dyn Document,
        session: &'a mut dyn SessionState,
        ui: &'a mut dyn Ui,
    ) -> Self {
        Self {
            document,
            session,
            ui,
        }
    }
}

/// Runs [`Command`]s with live settings.
#[derive(Debug)]
pub struct CommandExecutor {
    settings: LiveSettings,
    command_history: Vec<Command>,
}

impl CommandExecutor {
    /// Create an executor that follows reloads of `store`.
    pub fn new(store: &SettingsStore) -> Self {
        Self {
            settings: LiveSettings::new(store),
            command_history: Vec::new(),
        }
    }

    /// Create an executor with fixed settings.
    pub fn with_settings(settings: Settings) -> Self {
        Self::new(&SettingsStore::new(settings))
    }

    /// Executed commands, oldest first.
    pub fn command_history(&self) -> &[Command] {
        &self.command_history
    }

    /// Execute `command`.
    pub fn execute(
        &mut self,
        ctx: &mut CommandContext<'_>,
        command: Command,
    ) -> Result<CommandResult, CommandError> {
        debug!(?command, "executing command");
        self.command_history.push(command.clone());

        let settings = self.settings.snapshot().clone();
        match command {
            Command::OpenFilterMenu => Self::open_filter_menu(ctx, &settings),
            Command::Filter { regex } => Ok(Self::confirm(ctx, &settings, &regex)),
            Command::Refilter => Ok(CommandResult::Filtered(Self::refilter(ctx, &settings))),
            Command::SetFoldingPolicy { policy } => Self::set_folding_policy(ctx, &settings, policy),
            Command::SetHighlightStyle { style } => Self::set_highlight_style(ctx, &settings, style),
            Command::Clear => {
                clear(ctx.document, ctx.session, settings.on_clear_command_options);
                Ok(CommandResult::Cleared)
            }
        }
    }

    fn open_filter_menu(
        ctx: &mut CommandContext<'_>,
        settings: &Settings,
    ) -> Result<CommandResult, CommandError> {
        let items: Vec<_> = FilterMenuOption::ALL
            .iter()
            .map(|option| PanelItem::new(option.label()))
            .collect();
        let Some(option) = pick(ctx.ui, &items, "File Filter", &FilterMenuOption::ALL)? else {
            return Ok(CommandResult::Cancelled);
        };
        debug!(?option, "filter menu option picked");

        match option {
            FilterMenuOption::New => {
                let initial = session::current_regex(&*ctx.session).unwrap_or_default();
                Ok(Self::prompt_regex(ctx, settings, &initial))
            }
            FilterMenuOption::NewFromSelection => {
                let initial = ctx
                    .document
                    .primary_selection()
                    .filter(|selection| !selection.is_empty())
                    .map(|selection| ctx.document.substr(selection))
                    .or_else(|| session::current_regex(&*ctx.session))
                    .unwrap_or_default();
                Ok(Self::prompt_regex(ctx, settings, &initial))
            }
            FilterMenuOption::History => {
                let history = regex_history(&*ctx.session);
                let items: Vec<_> = if history.is_empty() {
                    vec![PanelItem::new(EMPTY_HISTORY_ITEM)]
                } else {
                    history.iter().map(PanelItem::new).collect()
                };
                match pick(ctx.ui, &items, "Regex history", &history)? {
                    Some(regex) => Ok(Self::confirm(ctx, settings, &regex)),
                    None => Ok(CommandResult::Cancelled),
                }
            }
            FilterMenuOption::Favorites => {
                let items: Vec<_> = if settings.favorites.is_empty() {
                    vec![PanelItem::new(EMPTY_FAVORITES_ITEM)]
                } else {
                    settings
                        .favorites
                        .iter()
                        .map(|fav| PanelItem::with_detail(&fav.name, &fav.expression))
                        .collect()
                };
                match pick(ctx.ui, &items, "Favorites", &settings.favorites)? {
                    Some(favorite) => Ok(Self::confirm(ctx, settings, &favorite.expression)),
                    None => Ok(CommandResult::Cancelled),
                }
            }
            FilterMenuOption::Clear => {
                clear(ctx.document, ctx.session, settings.on_clear_command_options);
                Ok(CommandResult::Cleared)
            }
        }
    }

    fn prompt_regex(
        ctx: &mut CommandContext<'_>,
        settings: &Settings,
        initial: &str,
    ) -> CommandResult {
        let folding = session::peek_folding_policy(&*ctx.session, settings);
        let highlight = session::peek_highlight_style(&*ctx.session, settings);

        let document: &dyn Document = ctx.document;
        let preview = |text: &str| filter_preview(document, text, folding, highlight);
        let Some(regex) = ctx.ui.show_input_panel("Regex:", initial, &preview) else {
            return CommandResult::Cancelled;
        };
        if regex.is_empty() {
            return CommandResult::Cancelled;
        }
        Self::confirm(ctx, settings, &regex)
    }

    fn confirm(ctx: &mut CommandContext<'_>, settings: &Settings, regex: &str) -> CommandResult {
        add_to_history(ctx.session, regex);
        let folding = session::folding_policy(ctx.session, settings);
        let highlight = session::highlight_style(ctx.session, settings);
        CommandResult::Filtered(filter(ctx.document, ctx.session, regex, folding, highlight))
    }

    fn refilter(ctx: &mut CommandContext<'_>, settings: &Settings) -> FilterOutcome {
        let regex = session::current_regex(&*ctx.session).unwrap_or_default();
        let folding = session::folding_policy(ctx.session, settings);
        let highlight = session::highlight_style(ctx.session, settings);
        filter(ctx.document, ctx.session, &regex, folding, highlight)
    }

    fn set_folding_policy(
        ctx: &mut CommandContext<'_>,
        settings: &Settings,
        policy: Option<FoldingPolicy>,
    ) -> Result<CommandResult, CommandError> {
        let policy = match policy {
            Some(policy) => policy,
            None => {
                let items: Vec<_> = FoldingPolicy::ALL
                    .iter()
                    .map(|p| PanelItem::with_detail(p.label(), p.name()))
                    .collect();
                match pick(ctx.ui, &items, "Folding", &FoldingPolicy::ALL)? {
                    Some(policy) => policy,
                    None => return Ok(CommandResult::Cancelled),
                }
            }
        };

        let requested = Value::String(policy.name().to_string());
        let policy = session::set_folding_policy(ctx.session, settings, Some(&requested));
        let outcome = Self::refilter(ctx, settings);
        Ok(CommandResult::FoldingPolicySet { policy, outcome })
    }

    fn set_highlight_style(
        ctx: &mut CommandContext<'_>,
        settings: &Settings,
        style: Option<HighlightStyle>,
    ) -> Result<CommandResult, CommandError> {
        let style = match style {
            Some(style) => style,
            None => {
                let items: Vec<_> = HighlightStyle::ALL
                    .iter()
                    .map(|s| PanelItem::with_detail(s.label(), s.name()))
                    .collect();
                match pick(ctx.ui, &items, "Highlight", &HighlightStyle::ALL)? {
                    Some(style) => style,
                    None => return Ok(CommandResult::Cancelled),
                }
            }
        };

        let requested = Value::String(style.name().to_string());
        let style = session::set_highlight_style(ctx.session, settings, Some(&requested));
        let outcome = Self::refilter(ctx, settings);
        Ok(CommandResult::HighlightStyleSet { style, outcome })
    }
}

/// Show `items` and map the picked index into `values`.
///
/// `values` may be shorter than `items` when trailing items are placeholders; picking one of
/// those yields `None` like a dismissal.
fn pick<T: Clone>(
    ui: &mut dyn Ui,
    items: &[PanelItem],
    placeholder: &str,
    values: &[T],
) -> Result<Option<T>, CommandError> {
    let Some(index) = ui.show_quick_panel(items, placeholder) else {
        return Ok(None);
    };
    if index >= items.len() {
        return Err(CommandError::SelectionOutOfRange {
            index,
            len: items.len(),
        });
    }
    Ok(values.get(index).cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterReport, HIGHLIGHT_KEY};
    use crate::history::regex_history;
    use crate::session::{MemorySession, keys};
    use crate::settings::Favorite;
    use crate::span::Span;
    use crate::test_support::RecordingDocument;
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;

    const CASE_1: &str = "abc\nd1e\nfgh\ni2j\nklm\nn3o4p";

    /// Answers panels from a script and records what it was shown.
    #[derive(Default)]
    struct ScriptedUi {
        picks: VecDeque<Option<usize>>,
        inputs: VecDeque<Option<String>>,
        shown_items: Vec<Vec<PanelItem>>,
        initial_texts: Vec<String>,
        previews: Vec<Option<String>>,
    }

    impl Ui for ScriptedUi {
        fn show_quick_panel(&mut self, items: &[PanelItem], _placeholder: &str) -> Option<usize> {
            self.shown_items.push(items.to_vec());
            self.picks.pop_front().flatten()
        }

        fn show_input_panel(
            &mut self,
            _caption: &str,
            initial_text: &str,
            preview: &PreviewFn<'_>,
        ) -> Option<String> {
            self.initial_texts.push(initial_text.to_string());
            let answer = self.inputs.pop_front().flatten();
            if let Some(text) = &answer {
                self.previews.push(preview(text));
            }
            answer
        }
    }

    fn run(
        executor: &mut CommandExecutor,
        doc: &mut RecordingDocument,
        session: &mut MemorySession,
        ui: &mut ScriptedUi,
        command: Command,
    ) -> Result<CommandResult, CommandError> {
        let mut ctx = CommandContext::new(doc, session, ui);
        executor.execute(&mut ctx, command)
    }

    fn applied(match_count: usize, fold_count: usize) -> CommandResult {
        CommandResult::Filtered(FilterOutcome::Applied(FilterReport {
            match_count,
            gap_count: match_count + 1,
            fold_count,
        }))
    }

    #[test]
    fn test_menu_new_regex() {
        let mut executor = CommandExecutor::with_settings(Settings::default());
        let mut doc = RecordingDocument::new(CASE_1);
        let mut session = MemorySession::new();
        let mut ui = ScriptedUi {
            picks: VecDeque::from([Some(0)]),
            inputs: VecDeque::from([Some("[0-9]".to_string())]),
            ..ScriptedUi::default()
        };

        let result = run(&mut executor, &mut doc, &mut session, &mut ui, Command::OpenFilterMenu);
        assert_eq!(result, Ok(applied(4, 3)));

        let labels: Vec<_> = ui.shown_items[0].iter().map(|i| i.label.as_str()).collect();
        assert_eq!(
            labels,
            ["New", "New from selection", "From history", "From favorites", "Clear"]
        );
        assert_eq!(ui.initial_texts, vec![String::new()]);
        assert!(ui.previews[0].as_deref().is_some_and(|html| html.contains("<span>4</span>")));
        assert_eq!(regex_history(&session), vec!["[0-9]"]);
        assert_eq!(executor.command_history(), &[Command::OpenFilterMenu]);
    }

    #[test]
    fn test_dismissed_prompt_leaves_session_untouched() {
        let mut executor = CommandExecutor::with_settings(Settings::default());
        let mut doc = RecordingDocument::new(CASE_1);
        let mut session = MemorySession::new();
        let mut ui = ScriptedUi {
            picks: VecDeque::from([None]),
            ..ScriptedUi::default()
        };

        let result = run(&mut executor, &mut doc, &mut session, &mut ui, Command::OpenFilterMenu);
        assert_eq!(result, Ok(CommandResult::Cancelled));
        assert!(session.is_empty());
        assert!(doc.unfolds.is_empty());
    }

    #[test]
    fn test_new_from_selection_prefills_selected_text() {
        let mut executor = CommandExecutor::with_settings(Settings::default());
        let mut doc = RecordingDocument::new(CASE_1);
        doc.selection = Some(Span::new(4, 7));
        let mut session = MemorySession::new();
        let mut ui = ScriptedUi {
            picks: VecDeque::from([Some(1)]),
            inputs: VecDeque::from([None]),
            ..ScriptedUi::default()
        };

        let result = run(&mut executor, &mut doc, &mut session, &mut ui, Command::OpenFilterMenu);
        assert_eq!(result, Ok(CommandResult::Cancelled));
        assert_eq!(ui.initial_texts, vec!["d1e".to_string()]);
        assert!(session.is_empty());
    }

    #[test]
    fn test_empty_history_placeholder_is_a_no_op() {
        let mut executor = CommandExecutor::with_settings(Settings::default());
        let mut doc = RecordingDocument::new(CASE_1);
        let mut session = MemorySession::new();
        let mut ui = ScriptedUi {
            picks: VecDeque::from([Some(2), Some(0)]),
            ..ScriptedUi::default()
        };

        let result = run(&mut executor, &mut doc, &mut session, &mut ui, Command::OpenFilterMenu);
        assert_eq!(result, Ok(CommandResult::Cancelled));
        assert_eq!(ui.shown_items[1], vec![PanelItem::new(EMPTY_HISTORY_ITEM)]);
        assert!(session.is_empty());
    }

    #[test]
    fn test_history_and_favorites_pick() {
        let settings = Settings {
            favorites: vec![Favorite {
                name: "Digits".into(),
                expression: "[0-9]".into(),
            }],
            ..Settings::default()
        };
        let mut executor = CommandExecutor::with_settings(settings);
        let mut doc = RecordingDocument::new(CASE_1);
        let mut session = MemorySession::new();
        let mut ui = ScriptedUi {
            picks: VecDeque::from([Some(3), Some(0), Some(2), Some(0)]),
            ..ScriptedUi::default()
        };

        let result = run(&mut executor, &mut doc, &mut session, &mut ui, Command::OpenFilterMenu);
        assert_eq!(result, Ok(applied(4, 3)));
        assert_eq!(
            ui.shown_items[1],
            vec![PanelItem::with_detail("Digits", "[0-9]")]
        );

        let result = run(&mut executor, &mut doc, &mut session, &mut ui, Command::OpenFilterMenu);
        assert_eq!(result, Ok(applied(4, 3)));
        assert_eq!(regex_history(&session), vec!["[0-9]", "[0-9]"]);
    }

    #[test]
    fn test_set_folding_policy_refilters() {
        let mut executor = CommandExecutor::with_settings(Settings::default());
        let mut doc = RecordingDocument::new(CASE_1);
        let mut session = MemorySession::new();
        let mut ui = ScriptedUi {
            picks: VecDeque::from([Some(2)]),
            ..ScriptedUi::default()
        };

        run(
            &mut executor,
            &mut doc,
            &mut session,
            &mut ui,
            Command::Filter {
                regex: "[0-9]".into(),
            },
        )
        .unwrap();

        let result = run(
            &mut executor,
            &mut doc,
            &mut session,
            &mut ui,
            Command::SetFoldingPolicy { policy: None },
        )
        .unwrap();

        assert_eq!(
            result,
            CommandResult::FoldingPolicySet {
                policy: FoldingPolicy::BeforeOnly,
                outcome: FilterOutcome::Applied(FilterReport {
                    match_count: 4,
                    gap_count: 5,
                    fold_count: 3,
                }),
            }
        );
        assert_eq!(doc.fold_tuples(), vec![(0, 5), (8, 13), (16, 21)]);
        assert_eq!(
            session.get(keys::CURRENT_FOLDING_TYPE),
            Some(serde_json::json!("before_only"))
        );
    }

    #[test]
    fn test_set_highlight_style_without_regex() {
        let mut executor = CommandExecutor::with_settings(Settings::default());
        let mut doc = RecordingDocument::new(CASE_1);
        let mut session = MemorySession::new();
        let mut ui = ScriptedUi::default();

        let result = run(
            &mut executor,
            &mut doc,
            &mut session,
            &mut ui,
            Command::SetHighlightStyle {
                style: Some(HighlightStyle::UnderlineStippled),
            },
        );
        assert_eq!(
            result,
            Ok(CommandResult::HighlightStyleSet {
                style: HighlightStyle::UnderlineStippled,
                outcome: FilterOutcome::NoRegex,
            })
        );
        assert!(!doc.marks.contains_key(HIGHLIGHT_KEY));
    }

    #[test]
    fn test_clear_uses_configured_options() {
        let mut executor = CommandExecutor::with_settings(Settings::default());
        let mut doc = RecordingDocument::new(CASE_1);
        doc.selection = Some(Span::point(13));
        let mut session = MemorySession::new();
        let mut ui = ScriptedUi::default();

        run(
            &mut executor,
            &mut doc,
            &mut session,
            &mut ui,
            Command::Filter {
                regex: "[0-9]".into(),
            },
        )
        .unwrap();
        let result = run(&mut executor, &mut doc, &mut session, &mut ui, Command::Clear);

        assert_eq!(result, Ok(CommandResult::Cleared));
        assert!(doc.folds.is_empty());
        assert_eq!(doc.scrolled_to, Some(13));
        assert!(!session::is_filter_active(&session));
    }

    #[test]
    fn test_out_of_range_pick_is_an_error() {
        let mut executor = CommandExecutor::with_settings(Settings::default());
        let mut doc = RecordingDocument::new(CASE_1);
        let mut session = MemorySession::new();
        let mut ui = ScriptedUi {
            picks: VecDeque::from([Some(9)]),
            ..ScriptedUi::default()
        };

        let result = run(&mut executor, &mut doc, &mut session, &mut ui, Command::OpenFilterMenu);
        assert_eq!(
            result,
            Err(CommandError::SelectionOutOfRange { index: 9, len: 5 })
        );
    }

    #[test]
    fn test_executor_follows_settings_reload() {
        let mut store = SettingsStore::default();
        let mut executor = CommandExecutor::new(&store);
        store
            .reload_from_str(r#"{ "default_folding_type": "after_only" }"#)
            .unwrap();

        let mut doc = RecordingDocument::new(CASE_1);
        let mut session = MemorySession::new();
        let mut ui = ScriptedUi::default();
        run(
            &mut executor,
            &mut doc,
            &mut session,
            &mut ui,
            Command::Filter {
                regex: "[0-9]".into(),
            },
        )
        .unwrap();
        assert_eq!(doc.fold_tuples(), vec![(0, 3), (6, 11), (14, 19), (24, 25)]);
    }
}
