//! # Rich text import
//!
//! Builds [`styled::Document`]s from rich text. A [`RichTextDecoder`] turns
//! bytes into [`AttributedText`], text whose character ranges carry an
//! [`AttributeSet`]; [`import_rich_text`] then walks the maximal attribute
//! spans and records one run for each span that has a font or a foreground
//! colour.
//!
//! [`RtfDecoder`] is a decoder for RTF that works on every platform.
//!
//! ```rust
//! use richtext::{RtfDecoder, import_rich_text};
//! use styled::Color;
//!
//! let rtf = br"{\rtf1{\colortbl;\red255\green0\blue0;}plain \cf1 red}";
//! let doc = import_rich_text(&RtfDecoder::new(), rtf).unwrap();
//!
//! assert_eq!(doc.text(), "plain red");
//! assert_eq!(doc.runs()[0].range, 6..9);
//! assert_eq!(doc.runs()[0].color, Some(Color::rgb(255, 0, 0)));
//! ```

pub mod attributes;
pub mod error;
pub mod import;
pub mod rtf;

pub use attributes::{AttributeSet, AttributedString, AttributedText, NativeFont};
pub use error::RtfError;
pub use import::{RichTextDecoder, import_rich_text, to_document};
pub use rtf::RtfDecoder;
