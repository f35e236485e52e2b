use file_filter_buffer::TextBuffer;
use file_filter_core::{
    Document, FilterOutcome, FilterReport, FoldingPolicy, HIGHLIGHT_KEY, HighlightStyle,
    MemorySession, STATUS_KEY, Span, filter, session,
};
use pretty_assertions::assert_eq;

fn run(buffer: &mut TextBuffer, session: &mut MemorySession, regex: &str) -> FilterOutcome {
    filter(
        buffer,
        session,
        regex,
        FoldingPolicy::Line,
        HighlightStyle::Outline,
    )
}

#[test]
fn test_empty_document() {
    let mut buffer = TextBuffer::new("");
    let mut session = MemorySession::new();

    let outcome = run(&mut buffer, &mut session, "a");

    assert_eq!(
        outcome,
        FilterOutcome::Applied(FilterReport {
            match_count: 0,
            gap_count: 1,
            fold_count: 0,
        })
    );
    assert_eq!(
        buffer.status_text(STATUS_KEY),
        Some("File Filter [Line | Outline] /a/ - no matches")
    );
    assert!(session::is_filter_active(&session));
}

#[test]
fn test_match_covering_whole_document() {
    let mut buffer = TextBuffer::new("ab\ncd");
    let mut session = MemorySession::new();

    let outcome = run(&mut buffer, &mut session, "(?s).*");

    assert_eq!(outcome.report().map(|r| r.match_count), Some(1));
    assert!(buffer.folded_regions().is_empty());
    assert_eq!(
        buffer.marks(HIGHLIGHT_KEY).map(|m| m.spans.clone()),
        Some(vec![Span::new(0, 5)])
    );
}

#[test]
fn test_zero_length_matches_are_ignored() {
    let mut buffer = TextBuffer::new("abc\ndef");
    let mut session = MemorySession::new();

    let outcome = run(&mut buffer, &mut session, "x*");

    assert_eq!(outcome.report().map(|r| r.match_count), Some(0));
    assert!(buffer.folded_regions().is_empty());
    assert_eq!(
        buffer.status_text(STATUS_KEY),
        Some("File Filter [Line | Outline] /x*/ - no matches")
    );
}

#[test]
fn test_no_matches_unfolds_previous_pass() {
    let mut buffer = TextBuffer::new("a1\nb\nc\nd1");
    let mut session = MemorySession::new();
    run(&mut buffer, &mut session, "1");
    assert!(!buffer.folded_regions().is_empty());

    run(&mut buffer, &mut session, "zzz");

    assert!(buffer.folded_regions().is_empty());
    assert_eq!(buffer.marks(HIGHLIGHT_KEY).map(|m| m.spans.len()), Some(0));
}

#[test]
fn test_invalid_regex_resets_document() {
    let mut buffer = TextBuffer::new("a1\nb\nc\nd1");
    let mut session = MemorySession::new();
    run(&mut buffer, &mut session, "1");

    let outcome = run(&mut buffer, &mut session, "(");

    assert!(matches!(outcome, FilterOutcome::InvalidPattern { .. }));
    assert!(buffer.folded_regions().is_empty());
    assert!(buffer.marks(HIGHLIGHT_KEY).is_none());
    assert!(
        buffer
            .status_text(STATUS_KEY)
            .is_some_and(|s| s.starts_with("File Filter: invalid regex /(/ - "))
    );
    assert!(!session::is_filter_active(&session));
    assert_eq!(session::current_regex(&session).as_deref(), Some("("));
}

#[test]
fn test_empty_regex_is_a_no_op() {
    let mut buffer = TextBuffer::new("a1\nb\nc\nd1");
    let mut session = MemorySession::new();
    run(&mut buffer, &mut session, "1");
    let folds = buffer.folded_regions().to_vec();

    let outcome = run(&mut buffer, &mut session, "");

    assert_eq!(outcome, FilterOutcome::NoRegex);
    assert_eq!(buffer.folded_regions(), folds.as_slice());
    assert_eq!(session::current_regex(&session).as_deref(), Some("1"));
}

#[test]
fn test_offsets_are_characters() {
    let mut buffer = TextBuffer::new("日本\n語1\n本");
    let mut session = MemorySession::new();

    run(&mut buffer, &mut session, "1");

    assert_eq!(buffer.find_all("1").unwrap(), vec![Span::new(4, 5)]);
    assert_eq!(buffer.folded_regions(), &[Span::new(0, 2), Span::new(6, 7)]);
    assert_eq!(buffer.render_visible("…"), "…\n語1\n…");
}

#[test]
fn test_crlf_line_endings() {
    let mut buffer = TextBuffer::new("a\r\nb1\r\nc");
    let mut session = MemorySession::new();

    run(&mut buffer, &mut session, "1");

    assert_eq!(buffer.folded_regions(), &[Span::new(0, 2), Span::new(7, 8)]);
}
