mod cli;
mod logging;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Output};
use file_filter_buffer::TextBuffer;
use file_filter_core::{
    Command, CommandContext, CommandExecutor, CommandResult, Document, FilterOutcome,
    FoldingPolicy, HighlightStyle, MemorySession, PanelItem, PreviewFn, STATUS_KEY, Settings,
    SettingsStore, Ui, session,
};
use serde_json::Value;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// Dismisses every panel. All choices come from the command line.
struct Headless;

impl Ui for Headless {
    fn show_quick_panel(&mut self, _items: &[PanelItem], _placeholder: &str) -> Option<usize> {
        None
    }

    fn show_input_panel(
        &mut self,
        _caption: &str,
        _initial_text: &str,
        _preview: &PreviewFn<'_>,
    ) -> Option<String> {
        None
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init()?;

    let text = read_input(&cli.path)?;
    let mut store = SettingsStore::default();
    if let Some(path) = &cli.settings {
        store
            .reload_from_path(path)
            .with_context(|| format!("loading settings from {}", path.display()))?;
    }
    let regex = resolve_regex(&cli, store.get())?;
    debug!(regex, path = %cli.path.display(), "resolved regex");

    let mut buffer = TextBuffer::new(&text);
    let mut session = MemorySession::new();
    apply_policies(&mut session, store.get(), cli.folding, cli.highlight);

    let mut executor = CommandExecutor::new(&store);
    let mut ui = Headless;
    let mut ctx = CommandContext::new(&mut buffer, &mut session, &mut ui);
    let outcome = match executor.execute(&mut ctx, Command::Filter { regex: regex.clone() })? {
        CommandResult::Filtered(outcome) => outcome,
        other => bail!("unexpected command result: {other:?}"),
    };

    if let FilterOutcome::InvalidPattern { message } = &outcome {
        bail!("invalid regex: {message}");
    }
    if let Some(status) = buffer.status_text(STATUS_KEY) {
        info!("{status}");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.output {
        Output::Visible => out.write_all(buffer.render_visible(&cli.placeholder).as_bytes())?,
        Output::Folds => {
            for span in buffer.folded_regions() {
                writeln!(out, "{span}")?;
            }
        }
        Output::Matches => {
            for span in buffer.find_all(&regex)? {
                writeln!(out, "{span}\t{}", buffer.substr(span))?;
            }
        }
        Output::Status => {
            writeln!(out, "{}", buffer.status_text(STATUS_KEY).unwrap_or_default())?
        }
    }
    out.flush()?;
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Store the requested policies in the session. Unset ones fall back to settings at filter time.
fn apply_policies(
    session: &mut MemorySession,
    settings: &Settings,
    folding: Option<FoldingPolicy>,
    highlight: Option<HighlightStyle>,
) {
    if let Some(policy) = folding {
        let requested = Value::String(policy.name().to_string());
        session::set_folding_policy(session, settings, Some(&requested));
    }
    if let Some(style) = highlight {
        let requested = Value::String(style.name().to_string());
        session::set_highlight_style(session, settings, Some(&requested));
    }
}

/// The explicit regex, else the named favorite, else the first favorite.
fn resolve_regex(cli: &Cli, settings: &Settings) -> Result<String> {
    if let Some(regex) = &cli.regex {
        return Ok(regex.clone());
    }
    let favorite = match &cli.favorite {
        Some(name) => settings
            .favorites
            .iter()
            .find(|fav| &fav.name == name)
            .with_context(|| format!("no favorite named '{name}'"))?,
        None => settings
            .favorites
            .first()
            .context("no regex given and no favorites configured")?,
    };
    Ok(favorite.expression.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings::from_json(
            r#"{ "favorites": [
                { "name": "errors", "expression": "ERROR" },
                { "name": "todo", "expression": "TODO|FIXME" }
            ] }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_explicit_regex_wins() {
        let cli = Cli::parse_from(["file-filter", "a.txt", "x+", "--favorite", "todo"]);
        assert_eq!(resolve_regex(&cli, &settings()).unwrap(), "x+");
    }

    #[test]
    fn test_named_and_first_favorite() {
        let cli = Cli::parse_from(["file-filter", "a.txt", "--favorite", "todo"]);
        assert_eq!(resolve_regex(&cli, &settings()).unwrap(), "TODO|FIXME");

        let cli = Cli::parse_from(["file-filter", "a.txt"]);
        assert_eq!(resolve_regex(&cli, &settings()).unwrap(), "ERROR");
    }

    #[test]
    fn test_policies_are_stored_without_filtering() {
        let mut buffer = TextBuffer::new("ok\nERROR x\nok\n");
        let mut session = MemorySession::new();
        apply_policies(
            &mut session,
            &Settings::default(),
            Some(FoldingPolicy::MatchOnly),
            Some(HighlightStyle::None),
        );

        assert!(!session::is_filter_active(&session));
        assert_eq!(session::current_regex(&session), None);
        assert!(buffer.folded_regions().is_empty());

        let store = SettingsStore::default();
        let mut executor = CommandExecutor::new(&store);
        let mut ui = Headless;
        let mut ctx = CommandContext::new(&mut buffer, &mut session, &mut ui);
        let result = executor
            .execute(&mut ctx, Command::Filter { regex: "ERROR".into() })
            .unwrap();
        let CommandResult::Filtered(FilterOutcome::Applied(_)) = result else {
            panic!("filter not applied: {result:?}");
        };
        assert_eq!(
            buffer.status_text(STATUS_KEY),
            Some("File Filter [Match only | None] /ERROR/ - 1 match")
        );
    }

    #[test]
    fn test_missing_regex_is_an_error() {
        let cli = Cli::parse_from(["file-filter", "a.txt", "--favorite", "nope"]);
        assert!(resolve_regex(&cli, &settings()).is_err());

        let cli = Cli::parse_from(["file-filter", "a.txt"]);
        assert!(resolve_regex(&cli, &Settings::default()).is_err());
    }
}
