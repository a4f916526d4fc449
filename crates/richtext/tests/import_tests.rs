//! Importing RTF documents into styled documents.

use richtext::{
    AttributeSet, AttributedString, NativeFont, RichTextDecoder, RtfDecoder, import_rich_text,
    to_document,
};
use styled::{Color, Document, FontDescriptor, StyleFlags};

/// A document as written by a typical macOS editor.
const TEXTEDIT_SAMPLE: &[u8] = br"{\rtf1\ansi\ansicpg1252\cocoartf2709
\cocoatextscaling0\cocoaplatform0{\fonttbl\f0\fswiss\fcharset0 Helvetica;\f1\fnil\fcharset0 Menlo-Regular;}
{\colortbl;\red255\green255\blue255;\red26\green150\blue65;}
{\*\expandedcolortbl;;\cssrgb\c11765\c61176\c31373;}
\paperw11900\paperh16840\margl1440\margr1440\vieww11520\viewh8400\viewkind0
\pard\tx566\tx1133\pardirnatural\partightenfactor0

\f0\fs24 \cf0 Plain \b bold\b0  and \i\ul italic\i0\ulnone \
\f1\fs28 \cf2 code\
}";

fn runs(doc: &Document) -> String {
    doc.runs()
        .iter()
        .map(|run| {
            format!(
                "{:?} {:?} {} {} [{}]{}",
                run.range,
                doc.slice(run.range.clone()),
                run.font.family,
                run.font.height,
                run.font.flags.to_markup(),
                run.color.map(|c| format!(" {}", c.to_hex())).unwrap_or_default()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn import_editor_sample() {
    let doc = import_rich_text(&RtfDecoder::new(), TEXTEDIT_SAMPLE).unwrap();

    assert_eq!(doc.text(), "Plain bold and italic\ncode\n");
    insta::assert_snapshot!(runs(&doc), @r#"
    0..6 "Plain " Helvetica 12 []
    6..10 "bold" Helvetica 12 [bold]
    10..15 " and " Helvetica 12 []
    15..21 "italic" Helvetica 12 [italic,underlined]
    21..22 "\n" Helvetica 12 []
    22..27 "code\n" Menlo-Regular 14 [] #1a9641
    "#);
}

#[test]
fn import_empty_input_is_none() {
    assert!(import_rich_text(&RtfDecoder::new(), b"").is_none());
}

#[test]
fn import_malformed_input_is_none() {
    for input in [
        &b"not rtf"[..],
        br"{\rtf1 unterminated",
        br"{\rtf1 bad \'zz hex}",
    ] {
        let doc = import_rich_text(&RtfDecoder::new(), input);
        assert!(doc.is_none(), "{:?}", String::from_utf8_lossy(input));
    }
}

#[test]
fn import_ignores_content_after_document() {
    let doc = import_rich_text(&RtfDecoder::new(), br"{\rtf1 a}}trailing").unwrap();
    assert_eq!(doc.text(), "a");
}

#[test]
fn import_document_without_attributes_is_plain() {
    let doc = import_rich_text(&RtfDecoder::new(), br"{\rtf1 just\tab text}").unwrap();
    assert_eq!(doc, Document::plain("just\ttext"));
}

#[test]
fn import_one_run_per_maximal_span() {
    let rtf = br"{\rtf1{\fonttbl\f0 Arial;}\f0 a{b}{c}\b d}";
    let doc = import_rich_text(&RtfDecoder::new(), rtf).unwrap();

    let ranges: Vec<_> = doc.runs().iter().map(|r| r.range.clone()).collect();
    assert_eq!(ranges, vec![0..3, 3..4]);
}

#[test]
fn import_unicode_and_code_page_text() {
    let rtf = br"{\rtf1\ansi{\fonttbl\f0 Arial;}\f0 na\'efve \u8220?q\u8221? \u-10179?\u-8704?}";
    let doc = import_rich_text(&RtfDecoder::new(), rtf).unwrap();

    assert_eq!(doc.text(), "na\u{ef}ve \u{201c}q\u{201d} \u{1f600}");
    assert_eq!(doc.runs().len(), 1);
    assert_eq!(doc.runs()[0].range, 0..11);
}

#[test]
fn decoder_with_fallback_encoding() {
    let decoder = RtfDecoder::new().with_encoding(encoding_rs::WINDOWS_1251);
    let doc = import_rich_text(&decoder, br"{\rtf1 \'cf}").unwrap();
    assert_eq!(doc.text(), "\u{41f}");
}

#[test]
fn parse_reports_reason() {
    assert_eq!(
        RtfDecoder::new().parse(b"{\\rtf1 a"),
        Err(richtext::RtfError::UnterminatedGroup(1))
    );
}

/// A decoder that hands back prepared attributed text.
struct Prepared(AttributedString);

impl RichTextDecoder for Prepared {
    type Output = AttributedString;

    fn decode(&self, _bytes: &[u8]) -> Option<AttributedString> {
        Some(self.0.clone())
    }
}

#[test]
fn import_through_custom_decoder() {
    let font = |bold| NativeFont {
        family: "Georgia".into(),
        point_size: 11.5,
        bold,
        italic: false,
    };

    let mut text = AttributedString::new();
    text.push("head ", &AttributeSet::default());
    text.push(
        "bold",
        &AttributeSet {
            font: Some(font(true)),
            underline: true,
            foreground: None,
        },
    );
    text.push(
        " green",
        &AttributeSet {
            font: None,
            underline: false,
            foreground: Some([0.0, 1.0, 0.0]),
        },
    );
    text.push(
        " both",
        &AttributeSet {
            font: Some(font(false)),
            underline: false,
            foreground: Some([0.0, 0.0, 0.0]),
        },
    );

    let doc = import_rich_text(&Prepared(text.clone()), b"ignored").unwrap();
    assert_eq!(doc, to_document(&text));

    let mut expected = Document::new();
    expected.append("head ");
    expected.append_with_font(
        "bold",
        FontDescriptor::new("Georgia", 11.5, StyleFlags::BOLD | StyleFlags::UNDERLINED),
    );
    expected.append_with_color(" green", Color::rgb(0, 255, 0));
    expected.append_styled(
        " both",
        FontDescriptor::new("Georgia", 11.5, StyleFlags::empty()),
        Color::rgb(0, 0, 0),
    );
    assert_eq!(doc, expected);
}
