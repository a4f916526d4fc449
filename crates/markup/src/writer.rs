//! Element tree to markup text.
//!
//! Output is compact: no indentation or line breaks are inserted between
//! nodes, so every text node reads back exactly as written.

use std::fmt::Write;

use crate::format::XML_DECLARATION;
use crate::tree::{Element, Node};

/// Writes the declaration, the root element and a trailing newline.
///
/// # Examples
///
/// ```
/// use markup::Element;
/// use markup::writer::write_document;
///
/// let mut root = Element::new("JUCE");
/// root.push_text("a < b");
/// assert_eq!(
///     write_document(&root),
///     "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<JUCE>a &lt; b</JUCE>\n"
/// );
/// ```
pub fn write_document(root: &Element) -> String {
    let mut out = String::with_capacity(64);
    out.push_str(XML_DECLARATION);
    out.push('\n');
    write_element(&mut out, root);
    out.push('\n');
    out
}

/// Appends one element and its subtree to `out`.
pub fn write_element(out: &mut String, element: &Element) {
    // Explicit stack so deep trees cannot overflow the call stack.
    enum Step<'a> {
        Open(&'a Element),
        Close(&'a Element),
        Text(&'a str),
    }

    let mut steps = vec![Step::Open(element)];

    while let Some(step) = steps.pop() {
        match step {
            Step::Open(e) => {
                out.push('<');
                out.push_str(&e.name);
                for (name, value) in &e.attributes {
                    let _ = write!(out, " {}=\"", name);
                    escape_attribute(out, value);
                    out.push('"');
                }
                if e.children.is_empty() {
                    out.push_str("/>");
                    continue;
                }
                out.push('>');
                steps.push(Step::Close(e));
                for child in e.children.iter().rev() {
                    steps.push(match child {
                        Node::Element(c) => Step::Open(c),
                        Node::Text(t) => Step::Text(t),
                    });
                }
            }
            Step::Close(e) => {
                out.push_str("</");
                out.push_str(&e.name);
                out.push('>');
            }
            Step::Text(t) => escape_text(out, t),
        }
    }
}

/// Escapes `&`, `<` and `>`.
///
/// Carriage returns become `&#13;`, since XML readers turn a raw one into a
/// line feed.
pub fn escape_text(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(c),
        }
    }
}

/// Escapes text for a double-quoted attribute value.
///
/// Line feeds, carriage returns and tabs become character references so
/// they survive any reader that normalises attribute whitespace.
pub fn escape_attribute(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#9;"),
            _ => out.push(c),
        }
    }
}
