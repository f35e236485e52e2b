//! Mini-HTML preview shown while a regex is typed or picked.

use crate::host::{Document, DocumentError};
use crate::policy::{FoldingPolicy, HighlightStyle};
use std::fmt::Write as _;

const STYLE: &str = "\
.container { overflow: hidden; margin: 0; padding: 0; }
.main { font-size: 15px; font-weight: bold; white-space: nowrap; }
.sub { font-size: 10px; white-space: nowrap; }
.item { display: inline-block; margin-right: 10px; }";

/// Escape `text` for interpolation into HTML.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Render a preview with an optional bold headline `(label, value)` and a row of smaller
/// `(label, value)` items. All text is escaped.
pub fn render_preview(main: Option<(&str, &str)>, items: &[(&str, &str)]) -> String {
    let mut main_html = String::new();
    if let Some((label, value)) = main {
        let _ = write!(
            main_html,
            r#"<div class="item"><span>{}</span>&nbsp;<span>{}</span></div>"#,
            escape_html(label),
            escape_html(value)
        );
    }

    let mut items_html = String::new();
    for (label, value) in items {
        let _ = write!(
            items_html,
            r#"<div class="item"><span>{}</span>&nbsp;<span><i>{}</i></span></div>"#,
            escape_html(label),
            escape_html(value)
        );
    }

    format!(
        "<html><head><style>\n{STYLE}\n</style></head><body>\
         <div class=\"container main\">{main_html}</div>\
         <div class=\"container sub\">{items_html}</div>\
         </body></html>"
    )
}

/// Preview for `regex` against `document`: total matches plus the active folding policy and
/// highlight style. Returns `None` for an empty regex.
pub fn filter_preview<D>(
    document: &D,
    regex: &str,
    folding: FoldingPolicy,
    highlight: HighlightStyle,
) -> Option<String>
where
    D: Document + ?Sized,
{
    if regex.is_empty() {
        return None;
    }

    let main = match document.find_all(regex) {
        Ok(matches) => ("Total matches", matches.len().to_string()),
        Err(DocumentError::InvalidRegex { message, .. }) => ("Invalid regex", message),
    };

    Some(render_preview(
        Some((main.0, &main.1)),
        &[
            ("Folding:", folding.label()),
            ("Highlight:", highlight.label()),
        ],
    ))
}
