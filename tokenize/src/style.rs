//! Chip colors and sizing.

use std::str::FromStr;

use palette::{LinSrgb, Srgb};

/// Default chip background (`#F2C811`).
pub const DEFAULT_BACK_COLOR: Rgb = Rgb::new(0xF2, 0xC8, 0x11);

/// Dark text used on light backgrounds.
const DARK_TEXT: Rgb = Rgb::new(0x33, 0x33, 0x33);
/// Light text used on dark backgrounds.
const LIGHT_TEXT: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);

/// Relative luminance where black and white text have equal contrast.
const LUMINANCE_CROSSOVER: f32 = 0.179;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`, `rrggbb`, `#rgb` or `rgb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let srgb = Srgb::<u8>::from_str(hex.trim()).ok()?;
        let (r, g, b) = srgb.into_components();
        Some(Self::new(r, g, b))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// WCAG relative luminance in `0.0..=1.0`.
    pub fn relative_luminance(&self) -> f32 {
        let srgb: Srgb<f32> = Srgb::new(self.r, self.g, self.b).into_format();
        let linear: LinSrgb<f32> = srgb.into_linear();
        0.2126 * linear.red + 0.7152 * linear.green + 0.0722 * linear.blue
    }

    /// Text color that stays readable on top of this color.
    pub fn contrasting_text(&self) -> Rgb {
        if self.relative_luminance() > LUMINANCE_CROSSOVER {
            DARK_TEXT
        } else {
            LIGHT_TEXT
        }
    }
}

/// Convert a font size in points to pixels (96 dpi).
pub fn pt_to_px(points: f32) -> f32 {
    points * 96.0 / 72.0
}

/// Visual settings applied to chips and dropdown entries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenStyle {
    /// Font size in pixels.
    pub font_size: f32,
    /// Chip and hovered-entry background.
    pub back_color: Rgb,
    /// Chip and hovered-entry text.
    pub fore_color: Rgb,
    /// Whether the token container draws a border.
    pub border: bool,
}

impl TokenStyle {
    /// Style with an explicit background and automatic text color.
    pub fn with_back_color(back_color: Rgb) -> Self {
        Self {
            back_color,
            fore_color: back_color.contrasting_text(),
            ..Default::default()
        }
    }
}

impl Default for TokenStyle {
    fn default() -> Self {
        Self {
            font_size: pt_to_px(10.0),
            back_color: DEFAULT_BACK_COLOR,
            fore_color: DEFAULT_BACK_COLOR.contrasting_text(),
            border: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgb::from_hex("#F2C811"), Some(DEFAULT_BACK_COLOR));
        assert_eq!(Rgb::from_hex("fff"), Some(Rgb::new(255, 255, 255)));
        assert_eq!(Rgb::from_hex("not a color"), None);
    }

    #[test]
    fn test_contrasting_text() {
        assert_eq!(Rgb::new(0, 0, 0).contrasting_text(), LIGHT_TEXT);
        assert_eq!(Rgb::new(255, 255, 255).contrasting_text(), DARK_TEXT);
        assert_eq!(DEFAULT_BACK_COLOR.contrasting_text(), DARK_TEXT);
    }

    #[test]
    fn test_pt_to_px() {
        assert!((pt_to_px(12.0) - 16.0).abs() < f32::EPSILON);
    }
}
