//! Attributed text to styled document.

use log::{debug, warn};
use styled::{Color, Document, FontDescriptor, RunStyle, StyleFlags};

use crate::attributes::{AttributeSet, AttributedText};

/// Turns rich text bytes into attributed text.
pub trait RichTextDecoder {
    type Output: AttributedText;

    /// Decodes `bytes`, or returns `None` if they are not in this decoder's
    /// format.
    fn decode(&self, bytes: &[u8]) -> Option<Self::Output>;
}

/// Decodes rich text bytes and converts the result into a [`Document`].
///
/// Returns `None` for empty input or when `decoder` rejects the bytes.
///
/// # Examples
///
/// ```
/// use richtext::{RtfDecoder, import_rich_text};
///
/// let doc = import_rich_text(&RtfDecoder::new(), br"{\rtf1 Hello\par world}").unwrap();
/// assert_eq!(doc.text(), "Hello\nworld");
/// assert!(doc.is_plain());
///
/// assert!(import_rich_text(&RtfDecoder::new(), b"").is_none());
/// ```
pub fn import_rich_text<D>(decoder: &D, bytes: &[u8]) -> Option<Document>
where
    D: RichTextDecoder + ?Sized,
{
    if bytes.is_empty() {
        debug!("no rich text to import");
        return None;
    }

    let attributed = decoder.decode(bytes)?;
    Some(to_document(&attributed))
}

/// Builds a document with one run per maximal attribute span.
///
/// Spans with neither a font nor a foreground colour become plain text.
pub fn to_document<T>(source: &T) -> Document
where
    T: AttributedText + ?Sized,
{
    let text = source.text();
    let len = source.char_len();
    let mut document = Document::new();
    let mut pos = 0;
    let mut byte = 0;

    while pos < len {
        let (style, end) = match source.attributes_at(pos) {
            Some((attributes, range)) if range.end > pos => {
                (run_style(attributes), range.end.min(len))
            }
            Some((_, range)) => {
                warn!(
                    "attribute range {:?} does not advance past {}; importing the rest as plain text",
                    range, pos
                );
                (RunStyle::Plain, len)
            }
            None => (RunStyle::Plain, len),
        };

        let end_byte = text[byte..]
            .char_indices()
            .nth(end - pos)
            .map_or(text.len(), |(i, _)| byte + i);
        document.append_with(&text[byte..end_byte], style);

        pos = end;
        byte = end_byte;
    }

    document
}

/// Maps native attributes onto a run style.
///
/// Underlining only counts when a font is present.
pub fn run_style(attributes: &AttributeSet) -> RunStyle {
    let font = attributes.font.as_ref().map(|native| {
        let mut flags = StyleFlags::empty();
        flags.set(StyleFlags::BOLD, native.bold);
        flags.set(StyleFlags::ITALIC, native.italic);
        flags.set(StyleFlags::UNDERLINED, attributes.underline);
        FontDescriptor::new(native.family.clone(), native.point_size, flags)
    });
    let color = attributes
        .foreground
        .map(|[red, green, blue]| Color::from_float_rgb(red, green, blue));

    RunStyle::from_parts(font, color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::NativeFont;
    use std::ops::Range;

    /// Attributed text whose lookups are scripted.
    struct Scripted {
        text: String,
        answers: Vec<(AttributeSet, Range<usize>)>,
    }

    impl AttributedText for Scripted {
        fn text(&self) -> &str {
            &self.text
        }

        fn char_len(&self) -> usize {
            self.text.chars().count()
        }

        fn attributes_at(&self, pos: usize) -> Option<(&AttributeSet, Range<usize>)> {
            self.answers
                .iter()
                .find(|(_, r)| r.start <= pos && pos < r.end.max(r.start + 1))
                .map(|(a, r)| (a, r.clone()))
        }
    }

    fn font(family: &str, bold: bool, italic: bool) -> NativeFont {
        NativeFont {
            family: family.into(),
            point_size: 13.0,
            bold,
            italic,
        }
    }

    #[test]
    fn run_style_combinations() {
        assert_eq!(run_style(&AttributeSet::default()), RunStyle::Plain);

        let underline_only = AttributeSet {
            underline: true,
            ..AttributeSet::default()
        };
        assert_eq!(run_style(&underline_only), RunStyle::Plain);

        let both = AttributeSet {
            font: Some(font("Times", true, true)),
            underline: true,
            foreground: Some([0.0, 0.5, 1.0]),
        };
        assert_eq!(
            run_style(&both),
            RunStyle::FontAndColor(
                FontDescriptor::new("Times", 13.0, StyleFlags::all()),
                Color::rgb(0, 128, 255)
            )
        );
    }

    #[test]
    fn slices_by_characters() {
        let source = Scripted {
            text: "ünï cödé".into(),
            answers: vec![
                (AttributeSet::default(), 0..4),
                (
                    AttributeSet {
                        foreground: Some([1.0, 0.0, 0.0]),
                        ..AttributeSet::default()
                    },
                    4..8,
                ),
            ],
        };
        let doc = to_document(&source);
        assert_eq!(doc.text(), "ünï cödé");
        assert_eq!(doc.runs().len(), 1);
        assert_eq!(doc.slice(doc.runs()[0].range.clone()), "cödé");
    }

    #[test]
    fn range_that_does_not_advance_ends_as_plain() {
        let source = Scripted {
            text: "abcdef".into(),
            answers: vec![
                (
                    AttributeSet {
                        font: Some(font("Times", false, false)),
                        ..AttributeSet::default()
                    },
                    0..2,
                ),
                (AttributeSet::default(), 2..2),
            ],
        };
        let doc = to_document(&source);
        assert_eq!(doc.text(), "abcdef");
        assert_eq!(doc.runs().len(), 1);
        assert_eq!(doc.runs()[0].range, 0..2);
    }

    #[test]
    fn range_past_the_end_is_clamped() {
        let source = Scripted {
            text: "abc".into(),
            answers: vec![(
                AttributeSet {
                    foreground: Some([0.0, 0.0, 0.0]),
                    ..AttributeSet::default()
                },
                0..10,
            )],
        };
        let doc = to_document(&source);
        assert_eq!(doc.runs()[0].range, 0..3);
    }
}
