//! Error types for markup parsing and decoding.

use thiserror::Error;

/// Errors that can occur while parsing markup text into a tree.
///
/// # Examples
///
/// ```rust
/// use markup::parser::parse_document;
///
/// // Unterminated start tag
/// assert!(parse_document("<JUCE>text").is_err());
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarkupError {
    /// Invalid markup syntax was encountered.
    ///
    /// The string contains details about what was unexpected and where.
    #[error("markup syntax error: {0}")]
    InvalidSyntax(String),

    /// An end tag does not close the element that is open.
    #[error("mismatched end tag: expected </{expected}>, found </{found}>")]
    MismatchedTag { expected: String, found: String },

    /// An element carries the same attribute twice.
    #[error("duplicate attribute `{attribute}` on <{element}>")]
    DuplicateAttribute { element: String, attribute: String },

    /// An `&name;` reference that is neither predefined nor numeric.
    #[error("unknown entity: &{0};")]
    UnknownEntity(String),

    /// Content follows the root element.
    #[error("unexpected content after the root element: {0}")]
    TrailingContent(String),
}

/// Why a byte stream could not be decoded into a document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// The bytes are not UTF-8 text.
    #[error("markup is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// The text is not a well-formed tree.
    #[error(transparent)]
    Markup(#[from] MarkupError),

    /// The root element has the wrong tag.
    #[error("unexpected root element <{0}>")]
    UnexpectedRoot(String),
}
