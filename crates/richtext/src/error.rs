//! Error types for rich text decoding.

use thiserror::Error;

/// Reasons an RTF stream cannot be decoded.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RtfError {
    /// The stream does not open with `{\rtf`.
    #[error("missing {{\\rtf header")]
    MissingHeader,

    /// A `}` with no open group.
    #[error("unbalanced group close at byte {0}")]
    UnbalancedGroup(usize),

    /// Input ended inside a group.
    #[error("input ended with {0} unclosed groups")]
    UnterminatedGroup(usize),

    /// `\'` not followed by two hex digits.
    #[error("invalid hex escape at byte {0}")]
    InvalidHex(usize),

    /// A control word parameter that does not fit in 32 bits.
    #[error("invalid control word parameter at byte {0}")]
    InvalidParameter(usize),

    /// A backslash at the very end of the input.
    #[error("unexpected end of input at byte {0}")]
    UnexpectedEnd(usize),
}
