//! Font descriptors.
//!
//! A [`FontDescriptor`] names a family, a point height and a set of
//! [`StyleFlags`].

use bitflags::bitflags;

/// Point height used when none is known.
pub const DEFAULT_FONT_HEIGHT: f32 = 12.0;

bitflags! {
    /// Font style modifiers.
    ///
    /// # Example
    ///
    /// ```
    /// use styled::StyleFlags;
    ///
    /// let flags = StyleFlags::BOLD | StyleFlags::UNDERLINED;
    /// assert_eq!(flags.to_markup(), "bold,underlined");
    /// assert_eq!(StyleFlags::from_markup("underlined,bold"), flags);
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        const BOLD       = 0b0000_0001;
        const ITALIC     = 0b0000_0010;
        const UNDERLINED = 0b0000_0100;
    }
}

impl StyleFlags {
    /// Markup token for each flag, in the order they are written.
    const TOKENS: [(StyleFlags, &'static str); 3] = [
        (StyleFlags::BOLD, "bold"),
        (StyleFlags::ITALIC, "italic"),
        (StyleFlags::UNDERLINED, "underlined"),
    ];

    /// Comma-joined tokens for the flags that are set, or an empty string.
    pub fn to_markup(&self) -> String {
        Self::TOKENS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, token)| *token)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Parse a comma-separated token list.
    ///
    /// Surrounding whitespace is trimmed and unknown tokens are ignored, so
    /// this never fails.
    pub fn from_markup(input: &str) -> Self {
        input
            .split(',')
            .map(str::trim)
            .filter_map(|word| {
                Self::TOKENS
                    .iter()
                    .find(|(_, token)| *token == word)
                    .map(|(flag, _)| *flag)
            })
            .fold(StyleFlags::empty(), |acc, flag| acc | flag)
    }
}

/// Font family, point height and style flags.
#[derive(Clone, Debug, PartialEq)]
pub struct FontDescriptor {
    /// Family (typeface) name. Empty means "the host's default family".
    pub family: String,
    /// Height in points.
    pub height: f32,
    /// Bold / italic / underlined.
    pub flags: StyleFlags,
}

impl FontDescriptor {
    pub fn new(family: impl Into<String>, height: f32, flags: StyleFlags) -> Self {
        Self {
            family: family.into(),
            height,
            flags,
        }
    }

    pub fn is_bold(&self) -> bool {
        self.flags.contains(StyleFlags::BOLD)
    }

    pub fn is_italic(&self) -> bool {
        self.flags.contains(StyleFlags::ITALIC)
    }

    pub fn is_underlined(&self) -> bool {
        self.flags.contains(StyleFlags::UNDERLINED)
    }

    /// Returns a copy with a different height.
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Returns a copy with extra style flags set.
    pub fn with_flags(mut self, flags: StyleFlags) -> Self {
        self.flags |= flags;
        self
    }
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: String::new(),
            height: DEFAULT_FONT_HEIGHT,
            flags: StyleFlags::empty(),
        }
    }
}
