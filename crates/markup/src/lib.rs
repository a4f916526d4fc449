//! # Markup codec for styled text documents
//!
//! Converts a [`styled::Document`] to a small XML-like markup format and back.
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <JUCE>plain<line-break/><styled-run size="12.0" family="Arial" style="bold" colour="#1a9641">styled</styled-run></JUCE>
//! ```
//!
//! - Plain text sits directly under the root.
//! - Every line feed is written as an empty `line-break` element.
//! - Each run becomes a `styled-run` element carrying `size`, `family`,
//!   `style` (omitted when no flags are set) and `colour` (omitted when the run
//!   has no colour).
//!
//! ## Quick Start
//!
//! ```rust
//! use markup::{decode, encode};
//! use styled::{Color, Document, FontDescriptor, StyleFlags};
//!
//! let mut doc = Document::new();
//! doc.append("Hello ");
//! doc.append_styled(
//!     "world",
//!     FontDescriptor::new("Arial", 14.0, StyleFlags::BOLD),
//!     Color::rgb(26, 150, 65),
//! );
//!
//! let bytes = encode(&doc);
//! let back = decode(&bytes).expect("well-formed markup");
//! assert_eq!(back, doc);
//! ```
//!
//! ## Malformed input
//!
//! [`decode`] returns `None` for anything that is not a well-formed tree with a
//! `JUCE` root. Use [`try_decode`] to find out why. Individual attributes that
//! are missing or unparsable fall back to defaults and never fail a decode.
//!
//! ## Modules
//!
//! - [`format`]: tag and attribute names shared by both directions
//! - [`tree`]: the element tree
//! - [`parser`]: markup text to tree
//! - [`writer`]: tree to markup text
//! - [`encode`](mod@encode) / [`decode`](mod@decode): document conversion

pub mod decode;
pub mod encode;
pub mod error;
pub mod format;
pub mod parser;
pub mod tree;
pub mod writer;

pub use decode::{decode, decode_from_reader, try_decode};
pub use encode::{encode, encode_to_writer};
pub use error::{DecodeError, MarkupError};
pub use tree::{Element, Node};
