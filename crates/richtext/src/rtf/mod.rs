//! A portable RTF decoder.
//!
//! Understands the subset of RTF that carries character formatting: the font
//! and colour tables, `\f`, `\fs`, `\b`, `\i`, `\ul`, `\cf`, `\plain`,
//! paragraph and line breaks, tabs, typographic symbols, `\u` with its
//! fallback characters and `\'hh` escapes in the document's code page.
//! Pictures, headers, document info and other ignorable destinations are
//! skipped.

pub mod lexer;
pub mod reader;

use encoding_rs::Encoding;
use log::debug;

use crate::attributes::AttributedString;
use crate::error::RtfError;
use crate::import::RichTextDecoder;
use reader::Reader;

/// Decodes RTF into an [`AttributedString`].
#[derive(Clone, Copy, Debug)]
pub struct RtfDecoder {
    encoding: &'static Encoding,
}

impl RtfDecoder {
    /// A decoder that assumes Windows-1252 until the document says otherwise.
    pub fn new() -> Self {
        Self {
            encoding: encoding_rs::WINDOWS_1252,
        }
    }

    /// Use `encoding` for 8-bit text in documents that do not name a code page.
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Like [`RichTextDecoder::decode`], but says why decoding failed.
    pub fn parse(&self, bytes: &[u8]) -> Result<AttributedString, RtfError> {
        Reader::new(bytes, self.encoding).read()
    }
}

impl Default for RtfDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl RichTextDecoder for RtfDecoder {
    type Output = AttributedString;

    fn decode(&self, bytes: &[u8]) -> Option<AttributedString> {
        match self.parse(bytes) {
            Ok(text) => Some(text),
            Err(err) => {
                debug!("cannot decode rtf: {}", err);
                None
            }
        }
    }
}
