//! The styled text document.

use std::ops::Range;

use crate::color::Color;
use crate::error::StyledTextError;
use crate::font::FontDescriptor;
use crate::run::{Run, RunStyle};

/// Text plus the runs that style it.
///
/// Documents are built by appending spans. A span appended with a font and/or
/// a colour records one [`Run`] covering exactly that span; plain spans record
/// nothing. Runs are never merged or shrunk afterwards.
///
/// # Examples
///
/// ```
/// use styled::{Color, Document};
///
/// let mut doc = Document::new();
/// doc.append("plain ");
/// doc.append_with_color("red", Color::rgb(255, 0, 0));
///
/// assert_eq!(doc.text(), "plain red");
/// assert_eq!(doc.runs()[0].range, 6..9);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    text: String,
    runs: Vec<Run>,
    /// Length of `text` in characters.
    char_len: usize,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from plain text (no runs).
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        let char_len = text.chars().count();
        Self {
            text,
            runs: Vec::new(),
            char_len,
        }
    }

    /// Create a document from text and an explicit run list.
    ///
    /// Runs must be non-empty, inside the text, and sorted without overlap.
    pub fn from_parts(text: impl Into<String>, runs: Vec<Run>) -> Result<Self, StyledTextError> {
        let doc = Self::plain(text);

        let mut previous_end = 0;
        for (index, run) in runs.iter().enumerate() {
            let Range { start, end } = run.range;
            if start >= end {
                return Err(StyledTextError::EmptyRun { index, start, end });
            }
            if end > doc.char_len {
                return Err(StyledTextError::OutOfBounds {
                    index,
                    start,
                    end,
                    len: doc.char_len,
                });
            }
            if start < previous_end {
                return Err(StyledTextError::Overlapping {
                    index,
                    start,
                    previous_end,
                });
            }
            previous_end = end;
        }

        Ok(Self { runs, ..doc })
    }

    /// Append text with the default style.
    pub fn append(&mut self, text: &str) {
        self.append_with(text, RunStyle::Plain);
    }

    /// Append text in `font`, with no colour.
    pub fn append_with_font(&mut self, text: &str, font: FontDescriptor) {
        self.append_with(text, RunStyle::Font(font));
    }

    /// Append text in `color`, with the default font.
    pub fn append_with_color(&mut self, text: &str, color: Color) {
        self.append_with(text, RunStyle::Color(color));
    }

    /// Append text in `font` and `color`.
    pub fn append_styled(&mut self, text: &str, font: FontDescriptor, color: Color) {
        self.append_with(text, RunStyle::FontAndColor(font, color));
    }

    /// Append text with the given style.
    ///
    /// Empty text never records a run.
    pub fn append_with(&mut self, text: &str, style: RunStyle) {
        let count = text.chars().count();
        if count == 0 {
            return;
        }

        let start = self.char_len;
        self.text.push_str(text);
        self.char_len += count;

        if let Some(run) = style.into_run(start..self.char_len) {
            self.runs.push(run);
        }
    }

    /// Get the text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get all runs, in start order.
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Take the text and runs apart.
    pub fn into_parts(self) -> (String, Vec<Run>) {
        (self.text, self.runs)
    }

    /// Length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// Returns true if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns true if there are no runs (plain text only).
    pub fn is_plain(&self) -> bool {
        self.runs.is_empty()
    }

    /// The run covering a character offset, if any.
    pub fn run_at(&self, offset: usize) -> Option<&Run> {
        self.runs.iter().find(|run| run.contains(offset))
    }

    /// The text covering a character range.
    ///
    /// Offsets past the end are clamped to the end of the text.
    pub fn slice(&self, range: Range<usize>) -> &str {
        let start = byte_offset(&self.text, 0, range.start);
        let end = byte_offset(&self.text, start, range.end.saturating_sub(range.start));
        &self.text[start..end.max(start)]
    }

    /// Iterate over styled and unstyled stretches of text.
    ///
    /// Yields `(text, Some(run))` for every run and `(text, None)` for the
    /// uncovered text between them, in document order.
    pub fn segments(&self) -> Segments<'_> {
        Segments::new(self)
    }
}

/// Byte index `chars` characters after byte index `from`.
fn byte_offset(text: &str, from: usize, chars: usize) -> usize {
    text[from..]
        .char_indices()
        .nth(chars)
        .map(|(i, _)| from + i)
        .unwrap_or(text.len())
}

/// Iterator over the segments of a [`Document`].
pub struct Segments<'a> {
    doc: &'a Document,
    next_run: usize,
    char_pos: usize,
    byte_pos: usize,
}

impl<'a> Segments<'a> {
    fn new(doc: &'a Document) -> Self {
        Self {
            doc,
            next_run: 0,
            char_pos: 0,
            byte_pos: 0,
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = (&'a str, Option<&'a Run>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.char_pos >= self.doc.char_len {
            return None;
        }

        let (end, run) = match self.doc.runs.get(self.next_run) {
            Some(run) if run.range.start > self.char_pos => (run.range.start, None),
            Some(run) => {
                self.next_run += 1;
                (run.range.end, Some(run))
            }
            None => (self.doc.char_len, None),
        };

        let byte_end = byte_offset(&self.doc.text, self.byte_pos, end - self.char_pos);
        let text = &self.doc.text[self.byte_pos..byte_end];
        self.char_pos = end;
        self.byte_pos = byte_end;

        Some((text, run))
    }
}
