//! Styled text documents.
//!
//! A [`Document`] is a string plus an ordered list of [`Run`]s. Each run covers
//! a character range of the text and carries a [`FontDescriptor`] and an
//! optional [`Color`]. Text that no run covers is drawn with the host's default
//! style.
//!
//! # Offsets
//!
//! Run ranges count characters (Unicode scalar values), not bytes, so they stay
//! valid no matter how the text is stored by the host.
//!
//! # Usage
//!
//! ```
//! use styled::{Color, Document, FontDescriptor, StyleFlags};
//!
//! let mut doc = Document::new();
//! doc.append("Hello, ");
//! doc.append_styled(
//!     "world",
//!     FontDescriptor::new("Arial", 14.0, StyleFlags::BOLD),
//!     Color::rgb(26, 150, 65),
//! );
//!
//! assert_eq!(doc.text(), "Hello, world");
//! assert_eq!(doc.runs().len(), 1);
//! assert_eq!(doc.runs()[0].range, 7..12);
//! ```

pub mod color;
pub mod document;
pub mod error;
pub mod font;
pub mod run;

// Re-export main types at crate root
pub use color::Color;
pub use document::{Document, Segments};
pub use error::{ColorParseError, StyledTextError};
pub use font::{DEFAULT_FONT_HEIGHT, FontDescriptor, StyleFlags};
pub use run::{Run, RunStyle};
