//! Error types for styled text documents.

use thiserror::Error;

/// Errors raised when a document is assembled from explicit parts.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StyledTextError {
    /// A run covers no characters (`start >= end`).
    #[error("run {index} is empty: {start}..{end}")]
    EmptyRun {
        index: usize,
        start: usize,
        end: usize,
    },

    /// A run reaches past the end of the text.
    #[error("run {index} ({start}..{end}) is out of bounds for {len} characters")]
    OutOfBounds {
        index: usize,
        start: usize,
        end: usize,
        len: usize,
    },

    /// A run starts before the previous run ends.
    #[error("run {index} starts at {start}, before the previous run ends at {previous_end}")]
    Overlapping {
        index: usize,
        start: usize,
        previous_end: usize,
    },
}

/// Errors that can occur when parsing a colour.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ColorParseError {
    /// The value is not `#` followed by exactly six hex digits.
    #[error("invalid hex colour: {0}")]
    InvalidHex(String),
}
