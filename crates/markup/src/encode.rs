//! Document to markup.

use std::io::{self, Write};

use log::trace;
use styled::{Document, Run};

use crate::format::{
    COLOUR_ATTR, FAMILY_ATTR, LINE_BREAK_TAG, ROOT_TAG, SIZE_ATTR, STYLE_ATTR, STYLED_RUN_TAG,
    format_size,
};
use crate::tree::Element;
use crate::writer::write_document;

/// Encodes a document as markup bytes.
///
/// Text before, between and after runs goes directly under the root; each
/// run becomes a `styled-run` element.
///
/// After a run the encoder resumes one character past the run's end, so a
/// character that directly follows a run is dropped unless the next run
/// starts on it.
///
/// # Examples
///
/// ```
/// use markup::encode;
/// use styled::Document;
///
/// let bytes = encode(&Document::plain("a\nb"));
/// assert_eq!(
///     String::from_utf8(bytes).unwrap(),
///     "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<JUCE>a<line-break/>b</JUCE>\n"
/// );
/// ```
pub fn encode(document: &Document) -> Vec<u8> {
    write_document(&to_element(document)).into_bytes()
}

/// Encodes a document and writes all of it to `writer`.
pub fn encode_to_writer(document: &Document, mut writer: impl Write) -> io::Result<()> {
    writer.write_all(&encode(document))?;
    writer.flush()
}

/// Builds the markup tree for a document.
pub fn to_element(document: &Document) -> Element {
    let mut root = Element::new(ROOT_TAG);
    let len = document.char_len();
    let mut cursor = 0;

    for run in document.runs() {
        if cursor < run.range.start {
            add_text(&mut root, document.slice(cursor..run.range.start));
            cursor = run.range.start;
        }

        let node = root.create_child(STYLED_RUN_TAG);
        set_run_attributes(node, run);
        add_text(node, document.slice(run.range.clone()));

        cursor = run.range.end + 1;
    }

    if cursor < len {
        add_text(&mut root, document.slice(cursor..len));
    }

    trace!(
        "encoded {} runs over {} characters",
        document.runs().len(),
        len
    );
    root
}

fn set_run_attributes(node: &mut Element, run: &Run) {
    node.set_attribute(SIZE_ATTR, format_size(run.font.height));
    node.set_attribute(FAMILY_ATTR, run.font.family.as_str());

    let style = run.font.flags.to_markup();
    if !style.is_empty() {
        node.set_attribute(STYLE_ATTR, style);
    }

    if let Some(color) = run.color {
        node.set_attribute(COLOUR_ATTR, color.to_hex());
    }
}

/// Adds text to `parent`, turning each line feed into a `line-break` element.
fn add_text(parent: &mut Element, text: &str) {
    let mut lines = text.split('\n');
    if let Some(first) = lines.next() {
        parent.push_text(first);
    }
    for line in lines {
        parent.create_child(LINE_BREAK_TAG);
        parent.push_text(line);
    }
}
