//! Styled text documents, a markup format to store them in, and rich text
//! import.
//!
//! This crate ties the workspace together:
//!
//! - [`styled`]: the document model
//! - [`markup`]: encoding documents to markup and decoding them back
//! - [`richtext`]: importing RTF and other attributed text
//!
//! and adds file helpers plus the logger used by the `styled-markup` binary.
//!
//! ```no_run
//! use styled_markup::{Document, load_markup_file, save_markup_file};
//!
//! # fn main() -> styled_markup::Result<()> {
//! let doc = Document::plain("hello");
//! save_markup_file(&doc, "hello.xml")?;
//! assert_eq!(load_markup_file("hello.xml")?, Some(doc));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod log_init;

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use log::debug;

pub use error::{Error, Result};
pub use log_init::init_logger;
pub use markup::{self, DecodeError, decode, encode, try_decode};
pub use richtext::{self, RtfDecoder, import_rich_text};
pub use styled::{self, Color, Document, FontDescriptor, Run, RunStyle, StyleFlags};

/// Reads and decodes a markup file.
///
/// Returns `Ok(None)` when the file exists but is not valid markup.
pub fn load_markup_file(path: impl AsRef<Path>) -> Result<Option<Document>> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    debug!("read {} bytes from {}", bytes.len(), path.display());
    Ok(decode(&bytes))
}

/// Encodes `document` into the file at `path`, replacing its contents.
pub fn save_markup_file(document: &Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    markup::encode_to_writer(document, BufWriter::new(file))?;
    debug!("saved {} runs to {}", document.runs().len(), path.display());
    Ok(())
}

/// Reads an RTF file and imports it.
///
/// Returns `Ok(None)` when the file is empty or not valid RTF.
pub fn import_rtf_file(path: impl AsRef<Path>) -> Result<Option<Document>> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    debug!("read {} bytes from {}", bytes.len(), path.display());
    Ok(import_rich_text(&RtfDecoder::new(), &bytes))
}
