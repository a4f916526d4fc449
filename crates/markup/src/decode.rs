//! Markup to document.

use std::io::{self, Read};

use log::{debug, trace};
use styled::{Color, DEFAULT_FONT_HEIGHT, Document, FontDescriptor, RunStyle, StyleFlags};

use crate::error::DecodeError;
use crate::format::{
    COLOUR_ATTR, FAMILY_ATTR, ROOT_TAG, SIZE_ATTR, STYLE_ATTR, is_line_break, is_styled_run,
};
use crate::parser::parse_document;
use crate::tree::{Element, Node};

/// Decodes markup bytes into a document.
///
/// Returns `None` when the bytes are not a well-formed tree with a `JUCE`
/// root. Missing or unparsable attributes fall back to defaults instead.
///
/// # Examples
///
/// ```
/// use markup::decode;
///
/// let doc = decode(b"<JUCE>a<line-break/>b</JUCE>").unwrap();
/// assert_eq!(doc.text(), "a\nb");
///
/// assert!(decode(b"<JUCE>a").is_none());
/// ```
pub fn decode(bytes: &[u8]) -> Option<Document> {
    match try_decode(bytes) {
        Ok(document) => Some(document),
        Err(err) => {
            debug!("cannot decode markup: {}", err);
            None
        }
    }
}

/// Like [`decode`], but says why decoding failed.
pub fn try_decode(bytes: &[u8]) -> Result<Document, DecodeError> {
    let source = std::str::from_utf8(bytes)?;
    let root = parse_document(source)?;

    if !root.has_tag_name(ROOT_TAG) {
        return Err(DecodeError::UnexpectedRoot(root.name));
    }

    Ok(from_element(&root))
}

/// Reads everything from `reader` and decodes it.
///
/// I/O failures are errors; malformed markup is `Ok(None)`.
pub fn decode_from_reader(mut reader: impl Read) -> io::Result<Option<Document>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(decode(&bytes))
}

/// Builds a document from the children of a root element.
///
/// The root's own tag is not checked. Whitespace-only text containing a line
/// feed is indentation from an indenting writer and is dropped.
pub fn from_element(root: &Element) -> Document {
    let mut document = Document::new();

    for child in &root.children {
        match child {
            Node::Text(text) if is_layout_whitespace(text) => {}
            Node::Text(text) => document.append(text),
            Node::Element(e) if is_line_break(&e.name) => document.append("\n"),
            Node::Element(e) if is_styled_run(&e.name) => {
                document.append_with(&run_text(e), run_style(e));
            }
            Node::Element(e) => trace!("skipping <{}> element", e.name),
        }
    }

    document
}

/// Text and line breaks directly inside a run element. Nested elements are
/// ignored.
fn run_text(element: &Element) -> String {
    let mut text = String::new();
    for child in &element.children {
        match child {
            Node::Text(t) if is_layout_whitespace(t) => {}
            Node::Text(t) => text.push_str(t),
            Node::Element(e) if is_line_break(&e.name) => text.push('\n'),
            Node::Element(e) => trace!("skipping <{}> inside <{}>", e.name, element.name),
        }
    }
    text
}

/// Whitespace-only text holding a raw line feed was put there by an
/// indenting writer. The encoder never writes one: every `\n` becomes a
/// `line-break` element.
fn is_layout_whitespace(text: &str) -> bool {
    text.contains('\n') && text.chars().all(char::is_whitespace)
}

fn run_style(element: &Element) -> RunStyle {
    let size = match element.attribute(SIZE_ATTR) {
        Some(raw) => parse_size(raw).unwrap_or_else(|| {
            trace!("unparsable size {:?}, using {}", raw, DEFAULT_FONT_HEIGHT);
            DEFAULT_FONT_HEIGHT
        }),
        None => DEFAULT_FONT_HEIGHT,
    };
    let family = element.attribute(FAMILY_ATTR).unwrap_or_default();
    let flags = StyleFlags::from_markup(element.attribute(STYLE_ATTR).unwrap_or_default());
    let color = element.attribute(COLOUR_ATTR).and_then(|raw| match Color::parse_hex(raw) {
        Ok(color) => Some(color),
        Err(err) => {
            trace!("ignoring colour: {}", err);
            None
        }
    });

    let font = (!family.is_empty()).then(|| FontDescriptor::new(family, size, flags));
    RunStyle::from_parts(font, color)
}

fn parse_size(raw: &str) -> Option<f32> {
    raw.trim().parse::<f32>().ok().filter(|size| size.is_finite())
}
