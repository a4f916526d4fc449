//! Tests for building styled documents.

use styled::{Color, Document, FontDescriptor, Run, RunStyle, StyleFlags, StyledTextError};

fn font(family: &str, flags: StyleFlags) -> FontDescriptor {
    FontDescriptor::new(family, 14.0, flags)
}

// ============================================================================
// Appending
// ============================================================================

#[test]
fn append_plain_covers_default_style_only() {
    let mut doc = Document::new();
    doc.append("Hello");
    doc.append(" World");
    assert_eq!(doc.text(), "Hello World");
    assert!(doc.is_plain());
}

#[test]
fn each_styled_append_is_one_run() {
    let mut doc = Document::new();
    doc.append_with_font("bold", font("Arial", StyleFlags::BOLD));
    doc.append_with_font("bold", font("Arial", StyleFlags::BOLD));

    // Identical neighbours stay separate.
    assert_eq!(doc.runs().len(), 2);
    assert_eq!(doc.runs()[0].range, 0..4);
    assert_eq!(doc.runs()[1].range, 4..8);
}

#[test]
fn append_with_dispatches_every_style() {
    let arial = font("Arial", StyleFlags::ITALIC);
    let teal = Color::rgb(0, 128, 128);

    let mut doc = Document::new();
    doc.append_with("a", RunStyle::from_parts(Some(arial.clone()), Some(teal)));
    doc.append_with("b", RunStyle::from_parts(Some(arial.clone()), None));
    doc.append_with("c", RunStyle::from_parts(None, Some(teal)));
    doc.append_with("d", RunStyle::from_parts(None, None));

    assert_eq!(doc.text(), "abcd");
    assert_eq!(
        doc.runs(),
        &[
            Run::new(0..1, arial.clone(), Some(teal)),
            Run::new(1..2, arial, None),
            Run::new(2..3, FontDescriptor::default(), Some(teal)),
        ]
    );
}

#[test]
fn line_feeds_are_ordinary_characters() {
    let mut doc = Document::new();
    doc.append_with_color("a\nb", Color::rgb(1, 1, 1));
    assert_eq!(doc.runs()[0].range, 0..3);
}

// ============================================================================
// Explicit construction
// ============================================================================

#[test]
fn from_parts_accepts_adjacent_runs() {
    let runs = vec![
        Run::new(0..2, FontDescriptor::default(), None),
        Run::new(2..4, FontDescriptor::default(), Some(Color::rgb(0, 0, 0))),
    ];
    let doc = Document::from_parts("abcd", runs).unwrap();
    assert_eq!(doc.runs().len(), 2);
}

#[test]
fn from_parts_measures_characters_not_bytes() {
    let runs = vec![Run::new(0..3, FontDescriptor::default(), None)];
    assert!(Document::from_parts("äöü", runs).is_ok());
}

#[test]
fn from_parts_error_messages() {
    let err = Document::from_parts("ab", vec![Run::new(1..5, FontDescriptor::default(), None)])
        .unwrap_err();
    assert_eq!(err.to_string(), "run 0 (1..5) is out of bounds for 2 characters");

    let err = StyledTextError::Overlapping {
        index: 2,
        start: 3,
        previous_end: 4,
    };
    assert_eq!(
        err.to_string(),
        "run 2 starts at 3, before the previous run ends at 4"
    );
}

#[test]
fn into_parts_returns_text_and_runs() {
    let mut doc = Document::new();
    doc.append_with_font("x", FontDescriptor::default());
    let (text, runs) = doc.into_parts();
    assert_eq!(text, "x");
    assert_eq!(runs.len(), 1);
}

// ============================================================================
// Segments
// ============================================================================

#[test]
fn segments_cover_the_whole_text() {
    let mut doc = Document::new();
    doc.append("¡");
    doc.append_with_color("Hola", Color::rgb(200, 0, 0));
    doc.append(", ");
    doc.append_with_font("mundo", font("Georgia", StyleFlags::UNDERLINED));
    doc.append("!");

    let joined: String = doc.segments().map(|(text, _)| text).collect();
    assert_eq!(joined, doc.text());

    let styled: Vec<_> = doc
        .segments()
        .filter_map(|(text, run)| run.map(|_| text))
        .collect();
    assert_eq!(styled, vec!["Hola", "mundo"]);
}

#[test]
fn segments_of_empty_document() {
    assert_eq!(Document::new().segments().count(), 0);
}
