//! Markup text to element tree.
//!
//! Tokens are recognised with `nom` combinators; a stack then assembles them
//! into a tree, which is where tag mismatches and stray content are caught.
//!
//! Supported syntax:
//! - start, end and empty-element tags with single- or double-quoted attributes
//! - text with the predefined entities and numeric character references
//! - CDATA sections
//! - comments, processing instructions and a DOCTYPE, all ignored
//!
//! Text is kept verbatim, including whitespace-only text inside the root.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_till, take_till1, take_until, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{map, value},
    multi::many0,
    sequence::{delimited, preceded, separated_pair, terminated, tuple},
};

use crate::error::MarkupError;
use crate::tree::Element;

/// A lexical piece of markup.
#[derive(Clone, Debug, PartialEq)]
pub enum Token<'a> {
    /// `<name a="1">` or `<name a="1"/>`, attribute values still escaped.
    Start {
        name: &'a str,
        attributes: Vec<(&'a str, &'a str)>,
        self_closing: bool,
    },
    /// `</name>`
    End(&'a str),
    /// Character data, still escaped.
    Text(&'a str),
    /// Contents of `<![CDATA[...]]>`.
    CData(&'a str),
    /// Comment, processing instruction or DOCTYPE.
    Ignored,
}

/// Parses a complete markup document and returns its root element.
///
/// # Examples
///
/// ```
/// use markup::parser::parse_document;
///
/// let root = parse_document(r#"<JUCE><font size="12.0">hi</font></JUCE>"#).unwrap();
/// assert_eq!(root.name, "JUCE");
/// assert_eq!(root.child_elements().next().unwrap().text(), "hi");
/// ```
pub fn parse_document(source: &str) -> Result<Element, MarkupError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut rest = source;

    while !rest.is_empty() {
        let offset = source.len() - rest.len();
        let (remaining, token) = parse_token(rest).map_err(|_| {
            MarkupError::InvalidSyntax(format!("at byte {}: {}", offset, snippet(rest)))
        })?;

        match token {
            Token::Start {
                name,
                attributes,
                self_closing,
            } => {
                if stack.is_empty() && root.is_some() {
                    return Err(MarkupError::TrailingContent(snippet(rest)));
                }
                let element = build_element(name, &attributes)?;
                if self_closing {
                    attach(&mut stack, &mut root, element);
                } else {
                    stack.push(element);
                }
            }
            Token::End(name) => {
                let element = stack.pop().ok_or_else(|| {
                    MarkupError::InvalidSyntax(format!(
                        "at byte {}: end tag </{}> without a start tag",
                        offset, name
                    ))
                })?;
                if element.name != name {
                    return Err(MarkupError::MismatchedTag {
                        expected: element.name,
                        found: name.to_string(),
                    });
                }
                attach(&mut stack, &mut root, element);
            }
            Token::Text(raw) => match stack.last_mut() {
                Some(parent) => parent.push_text(unescape(raw)?),
                None => outside_root(raw, &root)?,
            },
            Token::CData(text) => match stack.last_mut() {
                Some(parent) => parent.push_text(text),
                None => outside_root(rest, &root)?,
            },
            Token::Ignored => {}
        }

        rest = remaining;
    }

    if let Some(open) = stack.last() {
        return Err(MarkupError::InvalidSyntax(format!(
            "unterminated element <{}>",
            open.name
        )));
    }

    root.ok_or_else(|| MarkupError::InvalidSyntax("no root element".to_string()))
}

/// Finishes an element: into its parent if one is open, else as the root.
fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.push_child(element),
        None => *root = Some(element),
    }
}

/// Only whitespace may appear before or after the root element.
fn outside_root(text: &str, root: &Option<Element>) -> Result<(), MarkupError> {
    if text.trim().is_empty() {
        Ok(())
    } else if root.is_some() {
        Err(MarkupError::TrailingContent(snippet(text)))
    } else {
        Err(MarkupError::InvalidSyntax(format!(
            "text before the root element: {}",
            snippet(text)
        )))
    }
}

fn build_element(name: &str, attributes: &[(&str, &str)]) -> Result<Element, MarkupError> {
    let mut element = Element::new(name);
    for (attr, raw) in attributes {
        if element.attribute(attr).is_some() {
            return Err(MarkupError::DuplicateAttribute {
                element: name.to_string(),
                attribute: attr.to_string(),
            });
        }
        element.attributes.push((attr.to_string(), unescape(raw)?));
    }
    Ok(element)
}

/// First few characters of `input`, for error messages.
fn snippet(input: &str) -> String {
    input.chars().take(24).collect()
}

// ============================================================================
// Tokens
// ============================================================================

/// Parses the next token.
pub fn parse_token(input: &str) -> IResult<&str, Token<'_>> {
    alt((
        value(Token::Ignored, parse_comment),
        map(parse_cdata, Token::CData),
        value(Token::Ignored, parse_doctype),
        value(Token::Ignored, parse_instruction),
        map(parse_end_tag, Token::End),
        parse_start_tag,
        map(take_till1(|c: char| c == '<'), Token::Text),
    ))(input)
}

/// Element and attribute names.
pub fn parse_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))(input)
}

/// `name="value"` or `name='value'`.
fn parse_attribute(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(
        parse_name,
        tuple((multispace0, char('='), multispace0)),
        alt((
            delimited(char('"'), take_till(|c: char| c == '"'), char('"')),
            delimited(char('\''), take_till(|c: char| c == '\''), char('\'')),
        )),
    )(input)
}

fn parse_start_tag(input: &str) -> IResult<&str, Token<'_>> {
    let (input, _) = char('<')(input)?;
    let (input, name) = parse_name(input)?;
    let (input, attributes) = many0(preceded(multispace1, parse_attribute))(input)?;
    let (input, _) = multispace0(input)?;
    let (input, self_closing) = alt((value(true, tag("/>")), value(false, char('>'))))(input)?;

    Ok((
        input,
        Token::Start {
            name,
            attributes,
            self_closing,
        },
    ))
}

fn parse_end_tag(input: &str) -> IResult<&str, &str> {
    delimited(tag("</"), parse_name, preceded(multispace0, char('>')))(input)
}

fn parse_comment(input: &str) -> IResult<&str, &str> {
    delimited(tag("<!--"), take_until("-->"), tag("-->"))(input)
}

fn parse_cdata(input: &str) -> IResult<&str, &str> {
    delimited(tag("<![CDATA["), take_until("]]>"), tag("]]>"))(input)
}

fn parse_instruction(input: &str) -> IResult<&str, &str> {
    delimited(tag("<?"), take_until("?>"), tag("?>"))(input)
}

fn parse_doctype(input: &str) -> IResult<&str, &str> {
    terminated(preceded(tag("<!DOCTYPE"), take_till(|c: char| c == '>')), char('>'))(input)
}

// ============================================================================
// Entities
// ============================================================================

/// Resolves entity and character references in text or an attribute value.
pub fn unescape(raw: &str) -> Result<String, MarkupError> {
    if !raw.contains('&') {
        return Ok(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let semi = after.find(';').ok_or_else(|| {
            MarkupError::InvalidSyntax(format!("unterminated entity: &{}", snippet(after)))
        })?;
        out.push(resolve_entity(&after[..semi])?);
        rest = &after[semi + 1..];
    }
    out.push_str(rest);

    Ok(out)
}

fn resolve_entity(name: &str) -> Result<char, MarkupError> {
    let numeric = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        Some(u32::from_str_radix(hex, 16))
    } else {
        name.strip_prefix('#').map(|dec| dec.parse::<u32>())
    };

    match numeric {
        Some(code) => code
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| MarkupError::InvalidSyntax(format!("invalid character reference: &{};", name))),
        None => match name {
            "lt" => Ok('<'),
            "gt" => Ok('>'),
            "amp" => Ok('&'),
            "quot" => Ok('"'),
            "apos" => Ok('\''),
            _ => Err(MarkupError::UnknownEntity(name.to_string())),
        },
    }
}
