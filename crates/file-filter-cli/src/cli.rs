use clap::{Parser, ValueEnum};
use file_filter_core::{FoldingPolicy, HighlightStyle};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "file-filter",
    version,
    about = "Fold away everything in a file except the lines around regex matches"
)]
pub struct Cli {
    #[arg(help = "File to filter ('-' reads stdin)")]
    pub path: PathBuf,

    #[arg(help = "Regex to filter by (default: --favorite, or the first favorite)")]
    pub regex: Option<String>,

    #[arg(long, short, help = "Use the favorite with this name as the regex")]
    pub favorite: Option<String>,

    #[arg(
        long,
        short = 'F',
        help = "Folding policy: line, match_only, before_only, after_only, highlight_only"
    )]
    pub folding: Option<FoldingPolicy>,

    #[arg(
        long,
        short = 'H',
        help = "Highlight style: outline, solid, underline_solid, underline_stippled, underline_squiggly, none"
    )]
    pub highlight: Option<HighlightStyle>,

    #[arg(long, short, env = "FILE_FILTER_SETTINGS", help = "JSON settings file")]
    pub settings: Option<PathBuf>,

    #[arg(long, short, default_value = "visible", help = "What to print")]
    pub output: Output,

    #[arg(long, default_value = "…", help = "Text shown in place of each fold")]
    pub placeholder: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Output {
    /// The text with folds replaced by the placeholder.
    #[default]
    Visible,
    /// One folded region per line.
    Folds,
    /// One match per line.
    Matches,
    /// The status line only.
    Status,
}
