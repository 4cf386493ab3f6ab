//! Color text validation and normalization for the color picker.

use std::str::FromStr;

use csscolorparser::Color as CssColor;
use palette::Srgb;

/// Colors of the automatic color cycle, also offered by the color dialog.
pub const COLOR_CYCLE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Result of checking free-typed color text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorInput {
    /// Exact `#rrggbb` hex, kept as typed.
    Strict(String),
    /// Parsed as a CSS color; carries the canonical hex form.
    Loose(String),
    Invalid,
}

impl ColorInput {
    /// The value to store, if any.
    pub fn into_value(self) -> Option<String> {
        match self {
            Self::Strict(s) | Self::Loose(s) => Some(s),
            Self::Invalid => None,
        }
    }
}

/// Classify typed text as strict hex, a normalizable color, or garbage.
pub fn classify(text: &str) -> ColorInput {
    let trimmed = text.trim();
    if is_strict_hex(trimmed) {
        return ColorInput::Strict(trimmed.to_string());
    }
    match canonical_hex(trimmed) {
        Some(hex) => ColorInput::Loose(hex),
        None => ColorInput::Invalid,
    }
}

/// `#` followed by exactly six hex digits.
pub fn is_strict_hex(text: &str) -> bool {
    text.len() == 7
        && text.starts_with('#')
        && Srgb::<u8>::from_str(&text[1..]).is_ok()
}

/// Normalize any CSS color to lowercase `#rrggbb` (or `#rrggbbaa` when
/// translucent).
pub fn canonical_hex(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    let css: CssColor = text.parse().ok()?;
    let [r, g, b, a] = css.to_rgba8();
    Some(if a == u8::MAX {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    })
}

/// Parse any accepted color text to sRGB for display.
pub fn parse_rgb(text: &str) -> Option<Srgb<u8>> {
    let css: CssColor = text.trim().parse().ok()?;
    let [r, g, b, _a] = css.to_rgba8();
    Some(Srgb::new(r, g, b))
}

/// Format an sRGB color as canonical hex.
pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_hex_is_kept_verbatim() {
        assert_eq!(classify("#FF0000"), ColorInput::Strict("#FF0000".into()));
        assert_eq!(classify("#1f77b4"), ColorInput::Strict("#1f77b4".into()));
    }

    #[test]
    fn color_like_text_is_normalized() {
        assert_eq!(classify("red"), ColorInput::Loose("#ff0000".into()));
        assert_eq!(classify("#f00"), ColorInput::Loose("#ff0000".into()));
        assert_eq!(
            classify("rgb(0, 128, 255)"),
            ColorInput::Loose("#0080ff".into())
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(classify(""), ColorInput::Invalid);
        assert_eq!(classify("#12"), ColorInput::Invalid);
        assert_eq!(classify("not a color"), ColorInput::Invalid);
    }

    #[test]
    fn cycle_colors_are_strict() {
        assert!(COLOR_CYCLE.iter().all(|c| is_strict_hex(c)));
    }
}
