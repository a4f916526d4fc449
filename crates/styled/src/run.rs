//! Formatting runs.

use std::ops::Range;

use crate::color::Color;
use crate::font::FontDescriptor;

/// A styled character range within a [`Document`](crate::Document).
#[derive(Clone, Debug, PartialEq)]
pub struct Run {
    /// Character offsets, end exclusive.
    pub range: Range<usize>,
    pub font: FontDescriptor,
    /// `None` when no colour was specified for the run.
    pub color: Option<Color>,
}

impl Run {
    pub fn new(range: Range<usize>, font: FontDescriptor, color: Option<Color>) -> Self {
        Self { range, font, color }
    }

    /// Number of characters the run covers.
    pub fn len(&self) -> usize {
        self.range.len()
    }

    /// Returns true if this run covers a zero-length range.
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Check if this run contains a given character offset.
    pub fn contains(&self, offset: usize) -> bool {
        self.range.contains(&offset)
    }

    /// Check if this run overlaps with another run.
    pub fn overlaps(&self, other: &Run) -> bool {
        self.range.start < other.range.end && other.range.start < self.range.end
    }
}

/// How a span of appended text is styled.
///
/// The four combinations of an optional font and an optional colour.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RunStyle {
    /// No run is recorded.
    #[default]
    Plain,
    /// A run with this font and no colour.
    Font(FontDescriptor),
    /// A run with the default font and this colour.
    Color(Color),
    /// A run with both.
    FontAndColor(FontDescriptor, Color),
}

impl RunStyle {
    /// Pick the style for whichever of `font` and `color` are present.
    pub fn from_parts(font: Option<FontDescriptor>, color: Option<Color>) -> Self {
        match (font, color) {
            (Some(font), Some(color)) => RunStyle::FontAndColor(font, color),
            (Some(font), None) => RunStyle::Font(font),
            (None, Some(color)) => RunStyle::Color(color),
            (None, None) => RunStyle::Plain,
        }
    }

    pub fn is_plain(&self) -> bool {
        matches!(self, RunStyle::Plain)
    }

    /// Font and colour for a run covering `range`, or `None` for plain text.
    pub(crate) fn into_run(self, range: Range<usize>) -> Option<Run> {
        match self {
            RunStyle::Plain => None,
            RunStyle::Font(font) => Some(Run::new(range, font, None)),
            RunStyle::Color(color) => Some(Run::new(range, FontDescriptor::default(), Some(color))),
            RunStyle::FontAndColor(font, color) => Some(Run::new(range, font, Some(color))),
        }
    }
}
