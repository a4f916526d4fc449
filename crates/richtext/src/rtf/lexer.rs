//! Lexer for RTF.
//!
//! Splits a byte stream into groups, control words, control symbols, hex
//! escapes, `\bin` data and runs of literal text. Carriage returns and line
//! feeds outside control sequences carry no meaning in RTF and are dropped
//! here.

use crate::error::RtfError;

/// Longest control word name RTF allows.
const MAX_WORD_LEN: usize = 32;

/// A token produced by the lexer.
#[derive(Clone, Debug, PartialEq)]
pub enum Token<'a> {
    /// `{`
    GroupStart,
    /// `}`
    GroupEnd,
    /// `\name` or `\nameN`, e.g. `\b0` or `\fs24`.
    ControlWord { name: &'a str, param: Option<i32> },
    /// A backslash followed by one non-letter, e.g. `\{` or `\~`.
    ControlSymbol(u8),
    /// `\'hh`
    Hex(u8),
    /// Literal bytes, not yet decoded.
    Text(&'a [u8]),
    /// The raw bytes announced by `\binN`, never lexed as RTF.
    Binary(&'a [u8]),
}

/// Lexer for RTF bytes.
///
/// # Examples
///
/// ```
/// use richtext::rtf::lexer::{Lexer, Token};
///
/// let tokens: Vec<_> = Lexer::new(br"{\b bold}").collect::<Result<_, _>>().unwrap();
/// assert_eq!(
///     tokens,
///     vec![
///         Token::GroupStart,
///         Token::ControlWord { name: "b", param: None },
///         Token::Text(b"bold"),
///         Token::GroupEnd,
///     ]
/// );
/// ```
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Byte offset of the next token.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn skip_line_endings(&mut self) {
        while matches!(self.peek(), Some(b'\r' | b'\n')) {
            self.pos += 1;
        }
    }

    fn consume_text(&mut self) -> &'a [u8] {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if matches!(b, b'\\' | b'{' | b'}' | b'\r' | b'\n') {
                break;
            }
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    /// Consumes while `pred` holds, up to `limit` bytes.
    fn consume_while(&mut self, limit: usize, pred: impl Fn(u8) -> bool) -> &'a [u8] {
        let start = self.pos;
        while self.pos - start < limit && self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    fn consume_control(&mut self) -> Result<Token<'a>, RtfError> {
        let start = self.pos;
        self.pos += 1; // consume '\'

        match self.peek() {
            None => Err(RtfError::UnexpectedEnd(start)),
            Some(b) if b.is_ascii_alphabetic() => self.consume_word(start),
            Some(b'\'') => {
                self.pos += 1;
                let digits = self.consume_while(2, |b| b.is_ascii_hexdigit());
                if digits.len() != 2 {
                    return Err(RtfError::InvalidHex(start));
                }
                let value = std::str::from_utf8(digits)
                    .ok()
                    .and_then(|s| u8::from_str_radix(s, 16).ok())
                    .ok_or(RtfError::InvalidHex(start))?;
                Ok(Token::Hex(value))
            }
            // A backslash before a line ending is a paragraph break.
            Some(b'\r' | b'\n') => {
                self.skip_line_endings();
                Ok(Token::ControlWord {
                    name: "par",
                    param: None,
                })
            }
            Some(b) => {
                self.pos += 1;
                Ok(Token::ControlSymbol(b))
            }
        }
    }

    fn consume_word(&mut self, start: usize) -> Result<Token<'a>, RtfError> {
        let name = self.consume_while(MAX_WORD_LEN, |b| b.is_ascii_alphabetic());
        let name = std::str::from_utf8(name).map_err(|_| RtfError::InvalidParameter(start))?;

        let negative = self.peek() == Some(b'-')
            && self
                .input
                .get(self.pos + 1)
                .is_some_and(|b| b.is_ascii_digit());
        if negative {
            self.pos += 1;
        }
        let digits = self.consume_while(10, |b| b.is_ascii_digit());

        let param = if digits.is_empty() {
            None
        } else {
            let value = std::str::from_utf8(digits)
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .map(|v| if negative { -v } else { v })
                .and_then(|v| i32::try_from(v).ok())
                .ok_or(RtfError::InvalidParameter(start))?;
            Some(value)
        };

        // A single space delimits the word and is not text.
        if self.peek() == Some(b' ') {
            self.pos += 1;
        }

        if let ("bin", Some(len)) = (name, param) {
            return self.consume_binary(start, len);
        }

        Ok(Token::ControlWord { name, param })
    }

    fn consume_binary(&mut self, start: usize, len: i32) -> Result<Token<'a>, RtfError> {
        let len = usize::try_from(len).map_err(|_| RtfError::InvalidParameter(start))?;
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.input.len())
            .ok_or(RtfError::UnexpectedEnd(start))?;
        let data = &self.input[self.pos..end];
        self.pos = end;
        Ok(Token::Binary(data))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, RtfError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_line_endings();

        match self.peek()? {
            b'{' => {
                self.pos += 1;
                Some(Ok(Token::GroupStart))
            }
            b'}' => {
                self.pos += 1;
                Some(Ok(Token::GroupEnd))
            }
            b'\\' => Some(self.consume_control()),
            _ => Some(Ok(Token::Text(self.consume_text()))),
        }
    }
}
