//! RTF token stream to attributed text.
//!
//! Character formatting lives in a per-group state that is saved on `{` and
//! restored on `}`. The font and colour tables are collected as they are met
//! and resolved whenever text is emitted.

use std::collections::HashMap;

use encoding_rs::Encoding;
use log::trace;

use crate::attributes::{AttributeSet, AttributedString, NativeFont};
use crate::error::RtfError;
use crate::rtf::lexer::{Lexer, Token};

/// `\fs` is in half points; 24 is the RTF default of 12pt.
const DEFAULT_HALF_POINTS: i32 = 24;

/// Destinations whose content never reaches the document text.
const SKIPPED_DESTINATIONS: &[&str] = &[
    "author",
    "bkmkend",
    "bkmkstart",
    "colorschememapping",
    "comment",
    "datastore",
    "filetbl",
    "fldinst",
    "footer",
    "footerf",
    "footerl",
    "footerr",
    "footnote",
    "generator",
    "header",
    "headerf",
    "headerl",
    "headerr",
    "info",
    "latentstyles",
    "listoverridetable",
    "listtable",
    "nonshppict",
    "object",
    "operator",
    "pict",
    "revtbl",
    "rsidtbl",
    "stylesheet",
    "themedata",
    "title",
    "xmlnstbl",
];

#[derive(Clone, Copy, Debug, PartialEq)]
enum Destination {
    Text,
    FontTable,
    ColorTable,
    Skip,
}

/// Formatting saved and restored with each group.
#[derive(Clone, Debug)]
struct GroupState {
    destination: Destination,
    /// `None` falls back to the `\deff` font.
    font: Option<i32>,
    half_points: i32,
    bold: bool,
    italic: bool,
    underline: bool,
    color: usize,
    /// Fallback characters that follow each `\u`.
    unicode_skip: usize,
}

impl Default for GroupState {
    fn default() -> Self {
        Self {
            destination: Destination::Text,
            font: None,
            half_points: DEFAULT_HALF_POINTS,
            bold: false,
            italic: false,
            underline: false,
            color: 0,
            unicode_skip: 1,
        }
    }
}

impl GroupState {
    fn reset_character_format(&mut self) {
        *self = Self {
            destination: self.destination,
            unicode_skip: self.unicode_skip,
            ..Self::default()
        };
    }
}

/// Channel values of the colour table entry being read.
#[derive(Default)]
struct PendingColor {
    red: Option<i32>,
    green: Option<i32>,
    blue: Option<i32>,
}

impl PendingColor {
    /// An entry with no components is the automatic colour.
    fn take(&mut self) -> Option<[f32; 3]> {
        let entry = std::mem::take(self);
        if entry.red.is_none() && entry.green.is_none() && entry.blue.is_none() {
            return None;
        }
        let channel = |c: Option<i32>| c.unwrap_or(0).clamp(0, 255) as f32 / 255.0;
        Some([channel(entry.red), channel(entry.green), channel(entry.blue)])
    }
}

/// Reads one RTF document.
pub struct Reader<'a> {
    lexer: Lexer<'a>,
    encoding: &'static Encoding,
    state: GroupState,
    stack: Vec<GroupState>,
    fonts: HashMap<i32, String>,
    default_font: Option<i32>,
    font_number: Option<i32>,
    font_name: String,
    colors: Vec<Option<[f32; 3]>>,
    pending_color: PendingColor,
    /// Consecutive `\'hh` bytes, decoded together so multi-byte code pages work.
    pending_bytes: Vec<u8>,
    /// Fallback characters still to drop after a `\u`.
    skip: usize,
    high_surrogate: Option<u32>,
    output: AttributedString,
}

impl<'a> Reader<'a> {
    /// `encoding` is used for `\'hh` escapes and 8-bit text until the
    /// document names its own code page.
    pub fn new(input: &'a [u8], encoding: &'static Encoding) -> Self {
        Self {
            lexer: Lexer::new(input.trim_ascii_start()),
            encoding,
            state: GroupState::default(),
            stack: Vec::new(),
            fonts: HashMap::new(),
            default_font: None,
            font_number: None,
            font_name: String::new(),
            colors: Vec::new(),
            pending_color: PendingColor::default(),
            pending_bytes: Vec::new(),
            skip: 0,
            high_surrogate: None,
            output: AttributedString::new(),
        }
    }

    /// Reads up to the close of the outermost group.
    ///
    /// Anything after that group is ignored.
    pub fn read(mut self) -> Result<AttributedString, RtfError> {
        self.read_header()?;

        while let Some(token) = self.lexer.next() {
            let token = token?;
            if !matches!(token, Token::Hex(_)) {
                self.flush_bytes();
            }

            match token {
                Token::GroupStart => {
                    self.skip = 0;
                    self.stack.push(self.state.clone());
                }
                Token::GroupEnd => {
                    self.skip = 0;
                    if self.state.destination == Destination::FontTable {
                        self.commit_font();
                    }
                    match self.stack.pop() {
                        Some(outer) => self.state = outer,
                        None => {
                            trace!("document group closed at byte {}", self.lexer.position());
                            return Ok(self.output);
                        }
                    }
                }
                Token::ControlWord { name, param } => {
                    if self.skip > 0 {
                        self.skip -= 1;
                    } else {
                        self.control_word(name, param);
                    }
                }
                Token::ControlSymbol(symbol) => {
                    if self.skip > 0 {
                        self.skip -= 1;
                    } else {
                        self.control_symbol(symbol);
                    }
                }
                Token::Hex(byte) => {
                    if self.skip > 0 {
                        self.skip -= 1;
                    } else {
                        self.pending_bytes.push(byte);
                    }
                }
                Token::Binary(data) => {
                    if self.skip > 0 {
                        self.skip -= 1;
                    } else {
                        trace!("skipping {} bytes of binary data", data.len());
                    }
                }
                Token::Text(bytes) => {
                    let dropped = self.skip.min(bytes.len());
                    self.skip -= dropped;
                    self.text_bytes(&bytes[dropped..]);
                }
            }
        }

        Err(RtfError::UnterminatedGroup(self.stack.len() + 1))
    }

    /// `{\rtf` must open the stream.
    fn read_header(&mut self) -> Result<(), RtfError> {
        match (self.lexer.next(), self.lexer.next()) {
            (Some(Ok(Token::GroupStart)), Some(Ok(Token::ControlWord { name: "rtf", .. }))) => {
                Ok(())
            }
            _ => Err(RtfError::MissingHeader),
        }
    }

    fn control_word(&mut self, name: &str, param: Option<i32>) {
        if self.state.destination == Destination::Skip {
            return;
        }

        if SKIPPED_DESTINATIONS.contains(&name) {
            self.state.destination = Destination::Skip;
            return;
        }

        let on = param != Some(0);
        match name {
            "ansi" => self.encoding = encoding_rs::WINDOWS_1252,
            "mac" => self.encoding = encoding_rs::MACINTOSH,
            "ansicpg" => {
                if let Some(encoding) = param.and_then(code_page) {
                    self.encoding = encoding;
                } else {
                    trace!("unsupported code page {:?}", param);
                }
            }
            "deff" => self.default_font = param,
            "fonttbl" => self.state.destination = Destination::FontTable,
            "colortbl" => self.state.destination = Destination::ColorTable,
            "f" if self.state.destination == Destination::FontTable => {
                self.commit_font();
                self.font_number = param;
            }
            "f" => self.state.font = param,
            "fs" => self.state.half_points = param.unwrap_or(DEFAULT_HALF_POINTS),
            "red" => self.pending_color.red = param,
            "green" => self.pending_color.green = param,
            "blue" => self.pending_color.blue = param,
            "b" => self.state.bold = on,
            "i" => self.state.italic = on,
            "ul" | "uld" | "uldb" | "uldash" | "ulth" | "ulw" | "ulwave" => {
                self.state.underline = on
            }
            "ulnone" => self.state.underline = false,
            "cf" => self.state.color = param.map_or(0, |p| usize::try_from(p).unwrap_or(0)),
            "plain" => self.state.reset_character_format(),
            "uc" => {
                self.state.unicode_skip = param.map_or(1, |p| usize::try_from(p).unwrap_or(0))
            }
            "u" => {
                if let Some(code) = param {
                    self.unicode(code);
                }
                self.skip = self.state.unicode_skip;
            }
            "par" | "line" | "sect" | "page" => self.emit("\n"),
            "tab" => self.emit("\t"),
            "emdash" => self.emit("\u{2014}"),
            "endash" => self.emit("\u{2013}"),
            "emspace" => self.emit("\u{2003}"),
            "enspace" => self.emit("\u{2002}"),
            "bullet" => self.emit("\u{2022}"),
            "lquote" => self.emit("\u{2018}"),
            "rquote" => self.emit("\u{2019}"),
            "ldblquote" => self.emit("\u{201c}"),
            "rdblquote" => self.emit("\u{201d}"),
            _ => trace!("ignoring \\{}{}", name, param.map(|p| p.to_string()).unwrap_or_default()),
        }
    }

    fn control_symbol(&mut self, symbol: u8) {
        match symbol {
            b'*' => self.state.destination = Destination::Skip,
            b'\\' => self.emit("\\"),
            b'{' => self.emit("{"),
            b'}' => self.emit("}"),
            b'~' => self.emit("\u{a0}"),
            b'_' => self.emit("\u{2011}"),
            b'\t' => self.emit("\t"),
            _ => trace!("ignoring control symbol {:?}", symbol as char),
        }
    }

    /// `\uN`: N is a signed 16-bit value; pairs of surrogates are joined.
    fn unicode(&mut self, code: i32) {
        let unit = if code < 0 { code + 0x10000 } else { code };
        let Ok(unit) = u32::try_from(unit) else {
            return;
        };

        let c = match (self.high_surrogate.take(), unit) {
            (_, 0xD800..=0xDBFF) => {
                self.high_surrogate = Some(unit);
                return;
            }
            (Some(high), 0xDC00..=0xDFFF) => {
                char::from_u32(0x10000 + ((high - 0xD800) << 10) + (unit - 0xDC00))
            }
            (_, unit) => char::from_u32(unit),
        };

        let c = c.unwrap_or(char::REPLACEMENT_CHARACTER);
        let mut buf = [0; 4];
        self.emit(c.encode_utf8(&mut buf));
    }

    fn text_bytes(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        let (text, _) = self.encoding.decode_without_bom_handling(bytes);
        self.emit(&text);
    }

    fn flush_bytes(&mut self) {
        if self.pending_bytes.is_empty() {
            return;
        }
        let bytes = std::mem::take(&mut self.pending_bytes);
        self.text_bytes(&bytes);
    }

    /// Sends decoded text to the current destination.
    fn emit(&mut self, text: &str) {
        match self.state.destination {
            Destination::Text => {
                let attributes = self.attributes();
                self.output.push(text, &attributes);
            }
            Destination::FontTable => {
                for c in text.chars() {
                    if c == ';' {
                        self.commit_font();
                    } else {
                        self.font_name.push(c);
                    }
                }
            }
            Destination::ColorTable => {
                for _ in text.matches(';') {
                    let entry = self.pending_color.take();
                    self.colors.push(entry);
                }
            }
            Destination::Skip => {}
        }
    }

    fn commit_font(&mut self) {
        let name = std::mem::take(&mut self.font_name);
        let name = name.trim();
        if let (Some(number), false) = (self.font_number, name.is_empty()) {
            self.fonts.insert(number, name.to_string());
        }
    }

    /// Attributes for text emitted in the current state.
    fn attributes(&self) -> AttributeSet {
        let font = self
            .state
            .font
            .or(self.default_font)
            .and_then(|number| self.fonts.get(&number))
            .map(|family| NativeFont {
                family: family.clone(),
                point_size: self.state.half_points as f32 / 2.0,
                bold: self.state.bold,
                italic: self.state.italic,
            });

        AttributeSet {
            font,
            underline: self.state.underline,
            foreground: self.colors.get(self.state.color).copied().flatten(),
        }
    }
}

/// Encoding for an `\ansicpg` code page number.
fn code_page(number: i32) -> Option<&'static Encoding> {
    let label = match number {
        932 => "shift_jis".to_string(),
        936 => "gbk".to_string(),
        949 => "euc-kr".to_string(),
        950 => "big5".to_string(),
        10000 => "macintosh".to_string(),
        65001 => "utf-8".to_string(),
        n => format!("windows-{}", n),
    };
    Encoding::for_label(label.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributedText;

    fn read(input: &[u8]) -> Result<AttributedString, RtfError> {
        Reader::new(input, encoding_rs::WINDOWS_1252).read()
    }

    fn text(input: &[u8]) -> String {
        read(input).unwrap().text().to_string()
    }

    #[test]
    fn plain_text_and_breaks() {
        assert_eq!(text(br"{\rtf1 one\par two\line three\tab four}"), "one\ntwo\nthree\tfour");
    }

    #[test]
    fn escapes() {
        assert_eq!(text(br"{\rtf1 \{a\}\\b\~c}"), "{a}\\b\u{a0}c");
    }

    #[test]
    fn hex_uses_code_page() {
        assert_eq!(text(br"{\rtf1\ansi caf\'e9 \'93q\'94}"), "café \u{201c}q\u{201d}");
        assert_eq!(text(br"{\rtf1\ansi\ansicpg1251 \'c0}"), "\u{410}");
    }

    #[test]
    fn hex_bytes_decode_together() {
        assert_eq!(text(br"{\rtf1\ansi\ansicpg932 \'82\'a0}"), "\u{3042}");
    }

    #[test]
    fn unicode_skips_fallback() {
        assert_eq!(text(br"{\rtf1 a\u8212?b}"), "a\u{2014}b");
        assert_eq!(text(br"{\rtf1\uc2 a\u8212\'97\'97b}"), "a\u{2014}b");
        assert_eq!(text(br"{\rtf1\uc0 \u-3913 x}"), "\u{f0b7}x");
        assert_eq!(text(br"{\rtf1 \u-10179?\u-8704?}"), "\u{1f600}");
    }

    #[test]
    fn ignorable_destinations_are_skipped() {
        let input = br"{\rtf1{\info{\title T}}{\*\generator Tool;}{\stylesheet{\s0 Normal;}}body{\*\unknown x}}";
        assert_eq!(text(input), "body");
    }

    #[test]
    fn binary_picture_data_is_skipped() {
        assert_eq!(text(b"{\\rtf1 a{\\pict\\bin3 }}{}b}"), "ab");
        assert_eq!(text(b"{\\rtf1\\uc1 a\\u8212\\bin2 xyb}"), "a\u{2014}b");
    }

    #[test]
    fn field_result_is_kept() {
        let input = br#"{\rtf1{\field{\*\fldinst HYPERLINK "x"}{\fldrslt link}}}"#;
        assert_eq!(text(input), "link");
    }

    #[test]
    fn groups_restore_formatting() {
        let input = br"{\rtf1{\fonttbl\f0\fswiss Helvetica;}\f0\fs20 a{\b b}c}";
        let s = read(input).unwrap();
        let spans: Vec<_> = s
            .spans()
            .map(|(a, r)| (a.font.as_ref().map(|f| f.bold), r))
            .collect();
        assert_eq!(spans, vec![(Some(false), 0..1), (Some(true), 1..2), (Some(false), 2..3)]);
    }

    #[test]
    fn font_table_with_entry_groups() {
        let input = br"{\rtf1\deff1{\fonttbl{\f0\froman Times New Roman;}{\f1\fnil\fcharset0 Menlo{\*\panose 0};}}x}";
        let s = read(input).unwrap();
        let font = s.attributes_at(0).unwrap().0.font.clone().unwrap();
        assert_eq!(font.family, "Menlo");
        assert_eq!(font.point_size, 12.0);
    }

    #[test]
    fn color_table_and_automatic_colour() {
        let input = br"{\rtf1{\colortbl;\red255\green0\blue0;\red0\green0\blue255;}\cf1 r\cf2 b\cf0 a\cf9 z}";
        let s = read(input).unwrap();
        let colors: Vec<_> = s.spans().map(|(a, _)| a.foreground).collect();
        assert_eq!(
            colors,
            vec![Some([1.0, 0.0, 0.0]), Some([0.0, 0.0, 1.0]), None]
        );
    }

    #[test]
    fn plain_resets_character_format() {
        let input = br"{\rtf1\deff0{\fonttbl\f0 Arial;}\f0\b\i\ul\fs30 x\plain y}";
        let s = read(input).unwrap();
        let y = s.attributes_at(1).unwrap().0;
        let font = y.font.as_ref().unwrap();
        assert!(!font.bold && !font.italic && !y.underline);
        assert_eq!(font.point_size, 12.0);
    }

    #[test]
    fn underline_toggles() {
        let input = br"{\rtf1 \ul a\ulnone b\ul c\ul0 d}";
        let s = read(input).unwrap();
        let underlined: Vec<_> = s.spans().map(|(a, r)| (a.underline, r)).collect();
        assert_eq!(
            underlined,
            vec![(true, 0..1), (false, 1..2), (true, 2..3), (false, 3..4)]
        );
    }

    #[test]
    fn content_after_document_is_ignored() {
        assert_eq!(text(b"{\\rtf1 a}\r\n\0"), "a");
    }

    #[test]
    fn malformed_input() {
        assert_eq!(read(b"hello").unwrap_err(), RtfError::MissingHeader);
        assert_eq!(read(br"{\rtf1 a").unwrap_err(), RtfError::UnterminatedGroup(1));
        assert_eq!(read(br"{\rtf1 {a}").unwrap_err(), RtfError::UnterminatedGroup(1));
        assert_eq!(read(br"{\rtf1 \'g0}").unwrap_err(), RtfError::InvalidHex(7));
        assert_eq!(read(br"{\pict1}").unwrap_err(), RtfError::MissingHeader);
    }
}
