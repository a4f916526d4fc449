//! Attributed text: a string whose character ranges carry attribute sets.

use std::ops::Range;

/// A font as a rich text source describes it.
#[derive(Clone, Debug, PartialEq)]
pub struct NativeFont {
    pub family: String,
    /// Size in points.
    pub point_size: f32,
    pub bold: bool,
    pub italic: bool,
}

/// The attributes in effect over a stretch of attributed text.
///
/// The default set has no font, no underline and no foreground colour.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeSet {
    pub font: Option<NativeFont>,
    pub underline: bool,
    /// Red, green and blue components in `0.0..=1.0`.
    pub foreground: Option<[f32; 3]>,
}

impl AttributeSet {
    /// True when no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.font.is_none() && !self.underline && self.foreground.is_none()
    }
}

/// Read access to text with run-length encoded attributes.
///
/// Positions and ranges count characters.
pub trait AttributedText {
    /// The plain text.
    fn text(&self) -> &str;

    /// Length of [`text`](Self::text) in characters.
    fn char_len(&self) -> usize;

    /// The attributes in effect at `pos` together with the longest range
    /// around `pos` that shares exactly those attributes.
    ///
    /// `None` means there are no attributes from `pos` to the end of the text.
    fn attributes_at(&self, pos: usize) -> Option<(&AttributeSet, Range<usize>)>;
}

#[derive(Clone, Debug, PartialEq)]
struct Span {
    range: Range<usize>,
    attributes: AttributeSet,
}

/// An in-memory [`AttributedText`].
///
/// Text is appended piece by piece; a piece whose attributes equal those of
/// the piece before it extends the previous span, so every span is already
/// the longest effective range.
///
/// # Examples
///
/// ```
/// use richtext::{AttributeSet, AttributedString, AttributedText};
///
/// let red = AttributeSet {
///     foreground: Some([1.0, 0.0, 0.0]),
///     ..AttributeSet::default()
/// };
///
/// let mut s = AttributedString::new();
/// s.push("plain ", &AttributeSet::default());
/// s.push("re", &red);
/// s.push("d", &red);
///
/// let (attributes, range) = s.attributes_at(7).unwrap();
/// assert_eq!(attributes, &red);
/// assert_eq!(range, 6..9);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributedString {
    text: String,
    char_len: usize,
    spans: Vec<Span>,
}

impl AttributedString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `text` carrying `attributes`. Empty text is ignored.
    pub fn push(&mut self, text: &str, attributes: &AttributeSet) {
        let count = text.chars().count();
        if count == 0 {
            return;
        }

        let start = self.char_len;
        self.text.push_str(text);
        self.char_len += count;

        match self.spans.last_mut() {
            Some(last) if last.attributes == *attributes => last.range.end = self.char_len,
            _ => self.spans.push(Span {
                range: start..self.char_len,
                attributes: attributes.clone(),
            }),
        }
    }

    /// Spans in text order.
    pub fn spans(&self) -> impl Iterator<Item = (&AttributeSet, Range<usize>)> {
        self.spans.iter().map(|s| (&s.attributes, s.range.clone()))
    }

    pub fn is_empty(&self) -> bool {
        self.char_len == 0
    }
}

impl AttributedText for AttributedString {
    fn text(&self) -> &str {
        &self.text
    }

    fn char_len(&self) -> usize {
        self.char_len
    }

    fn attributes_at(&self, pos: usize) -> Option<(&AttributeSet, Range<usize>)> {
        let index = self.spans.partition_point(|s| s.range.end <= pos);
        self.spans
            .get(index)
            .map(|s| (&s.attributes, s.range.clone()))
    }
}
