//! Tag and attribute names of the markup format.
//!
//! Encoder and decoder both read these; nothing else spells them out.

/// Root element.
pub const ROOT_TAG: &str = "JUCE";

/// Element wrapping the text of one run.
pub const STYLED_RUN_TAG: &str = "styled-run";

/// Empty element standing for one line feed.
pub const LINE_BREAK_TAG: &str = "line-break";

/// Older name for [`STYLED_RUN_TAG`], accepted when decoding.
pub const LEGACY_STYLED_RUN_TAG: &str = "font";

/// Older name for [`LINE_BREAK_TAG`], accepted when decoding.
pub const LEGACY_LINE_BREAK_TAG: &str = "br";

pub const SIZE_ATTR: &str = "size";
pub const FAMILY_ATTR: &str = "family";
pub const STYLE_ATTR: &str = "style";
pub const COLOUR_ATTR: &str = "colour";

/// Declaration written ahead of the root element.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

pub fn is_styled_run(tag: &str) -> bool {
    tag == STYLED_RUN_TAG || tag == LEGACY_STYLED_RUN_TAG
}

pub fn is_line_break(tag: &str) -> bool {
    tag == LINE_BREAK_TAG || tag == LEGACY_LINE_BREAK_TAG
}

/// Format a point height so it always carries a fractional part.
///
/// `12.0` stays `12.0`, `13.25` stays `13.25`.
pub fn format_size(height: f32) -> String {
    if height.is_finite() && height.fract() == 0.0 {
        format!("{:.1}", height)
    } else {
        format!("{}", height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_keeps_one_decimal_for_whole_numbers() {
        assert_eq!(format_size(12.0), "12.0");
        assert_eq!(format_size(0.0), "0.0");
        assert_eq!(format_size(-3.0), "-3.0");
    }

    #[test]
    fn size_keeps_shortest_fraction() {
        assert_eq!(format_size(13.5), "13.5");
        assert_eq!(format_size(10.25), "10.25");
    }

    #[test]
    fn size_reads_back_exactly() {
        for height in [0.1f32, 7.3, 12.0, 96.75, 1e20] {
            assert_eq!(format_size(height).parse::<f32>().unwrap(), height);
        }
    }

    #[test]
    fn tag_aliases() {
        assert!(is_styled_run("styled-run"));
        assert!(is_styled_run("font"));
        assert!(!is_styled_run("Font"));
        assert!(is_line_break("line-break"));
        assert!(is_line_break("br"));
    }
}
