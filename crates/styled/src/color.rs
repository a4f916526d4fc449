//! 8-bit RGBA colours.
//!
//! Colours travel through the markup format as `#rrggbb`; alpha is never
//! written and every parsed colour is opaque.

use std::fmt;

use crate::error::ColorParseError;

/// An 8-bit RGBA colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    /// Create an opaque colour.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(red, green, blue, 0xff)
    }

    /// Create a colour with an explicit alpha channel.
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Create an opaque colour from floating point components in `0.0..=1.0`.
    ///
    /// Components are scaled to 0–255, rounded, and clamped.
    pub fn from_float_rgb(red: f32, green: f32, blue: f32) -> Self {
        Self::rgb(
            Self::float_channel(red),
            Self::float_channel(green),
            Self::float_channel(blue),
        )
    }

    fn float_channel(value: f32) -> u8 {
        if value.is_nan() {
            return 0;
        }
        (value * 255.0).round().clamp(0.0, 255.0) as u8
    }

    /// The red, green and blue channels.
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    /// Returns true if the alpha channel is fully opaque.
    pub fn is_opaque(&self) -> bool {
        self.alpha == 0xff
    }

    /// Format as `#rrggbb` with lowercase digits. Alpha is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use styled::Color;
    ///
    /// assert_eq!(Color::rgb(26, 150, 65).to_hex(), "#1a9641");
    /// ```
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    /// Parse `#` followed by exactly six hex digits (either case).
    ///
    /// The result is always opaque.
    ///
    /// # Examples
    ///
    /// ```
    /// use styled::Color;
    ///
    /// assert_eq!(Color::parse_hex("#1A9641").unwrap(), Color::rgb(26, 150, 65));
    /// assert!(Color::parse_hex("#1a964").is_err());
    /// ```
    pub fn parse_hex(input: &str) -> Result<Self, ColorParseError> {
        let invalid = || ColorParseError::InvalidHex(input.to_string());

        let digits = input.strip_prefix('#').ok_or_else(invalid)?.as_bytes();
        if digits.len() != 6 {
            return Err(invalid());
        }

        let red = Self::parse_hex_pair(digits[0], digits[1]).ok_or_else(invalid)?;
        let green = Self::parse_hex_pair(digits[2], digits[3]).ok_or_else(invalid)?;
        let blue = Self::parse_hex_pair(digits[4], digits[5]).ok_or_else(invalid)?;

        Ok(Self::rgb(red, green, blue))
    }

    fn parse_hex_digit(c: u8) -> Option<u8> {
        match c {
            b'0'..=b'9' => Some(c - b'0'),
            b'a'..=b'f' => Some(c - b'a' + 10),
            b'A'..=b'F' => Some(c - b'A' + 10),
            _ => None,
        }
    }

    fn parse_hex_pair(c1: u8, c2: u8) -> Option<u8> {
        let high = Self::parse_hex_digit(c1)?;
        let low = Self::parse_hex_digit(c2)?;
        Some(high * 16 + low)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_zero_padded() {
        assert_eq!(Color::rgb(0, 10, 255).to_hex(), "#000aff");
    }

    #[test]
    fn hex_drops_alpha() {
        assert_eq!(Color::rgba(1, 2, 3, 0).to_hex(), "#010203");
    }

    #[test]
    fn parse_mixed_case() {
        assert_eq!(Color::parse_hex("#aBcDeF").unwrap(), Color::rgb(171, 205, 239));
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(Color::parse_hex("").is_err());
        assert!(Color::parse_hex("1a9641").is_err());
        assert!(Color::parse_hex("#1a96411").is_err());
        assert!(Color::parse_hex("#gg0000").is_err());
        assert!(Color::parse_hex("#ééé").is_err());
    }

    #[test]
    fn float_components_round_and_clamp() {
        assert_eq!(Color::from_float_rgb(1.0, 0.5, 0.0), Color::rgb(255, 128, 0));
        assert_eq!(Color::from_float_rgb(2.0, -1.0, f32::NAN), Color::rgb(255, 0, 0));
    }
}
