//! CSS colour parsing and relative luminance.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::ValidationError;

/// Matches `rgb(r, g, b)` and `rgba(r, g, b, a)` as reported by computed styles.
static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*(\d*\.?\d+)\s*)?\)$",
    )
    .unwrap()
});

/// Backgrounds darker than this get light icons.
pub const LIGHT_ICON_THRESHOLD: f64 = 0.5;

/// An sRGB colour with an optional alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f32>,
}

impl Color {
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        alpha: Some(0.0),
    };

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            alpha: None,
        }
    }

    /// A colour with zero alpha paints nothing.
    pub fn is_transparent(&self) -> bool {
        self.alpha.is_some_and(|alpha| alpha <= 0.0)
    }

    /// Relative luminance of the RGB channels. Alpha is not blended in.
    pub fn luminance(&self) -> f64 {
        relative_luminance(self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.alpha {
            Some(alpha) => write!(f, "rgba({}, {}, {}, {alpha})", self.r, self.g, self.b),
            None => write!(f, "rgb({}, {}, {})", self.r, self.g, self.b),
        }
    }
}

impl FromStr for Color {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("transparent") {
            return Ok(Self::TRANSPARENT);
        }

        let invalid = || ValidationError::InvalidColor {
            value: s.to_string(),
        };
        let caps = RGB_RE.captures(trimmed).ok_or_else(invalid)?;
        let channel = |i: usize| caps[i].parse::<u8>().map_err(|_| invalid());

        let alpha = caps
            .get(4)
            .map(|m| m.as_str().parse::<f32>().map_err(|_| invalid()))
            .transpose()?;

        Ok(Self {
            r: channel(1)?,
            g: channel(2)?,
            b: channel(3)?,
            alpha,
        })
    }
}

/// sRGB transfer function: maps a channel in `[0, 1]` to linear light.
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.039_28 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance in `[0, 1]` of an 8-bit RGB triple.
#[must_use]
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    let [r, g, b] = [r, g, b].map(|c| srgb_to_linear(f64::from(c) / 255.0));
    0.0722_f64.mul_add(b, 0.2126_f64.mul_add(r, 0.7152 * g))
}

/// Whether a background of this luminance needs light icons on top.
#[must_use]
pub fn prefers_light_icons(luminance: f64) -> bool {
    luminance < LIGHT_ICON_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_and_rgba() {
        assert_eq!("rgb(12, 34, 56)".parse::<Color>().unwrap(), Color::rgb(12, 34, 56));
        assert_eq!(
            "rgba(255,255,255,0.8)".parse::<Color>().unwrap(),
            Color {
                r: 255,
                g: 255,
                b: 255,
                alpha: Some(0.8)
            }
        );
        assert_eq!(
            "  rgba( 1 , 2 , 3 , .5 ) ".parse::<Color>().unwrap().alpha,
            Some(0.5)
        );
    }

    #[test]
    fn rejects_other_notations() {
        for input in ["#ffffff", "white", "rgb(256, 0, 0)", "rgb(1, 2)", "hsl(0, 0%, 0%)", ""] {
            assert!(input.parse::<Color>().is_err(), "{input} should not parse");
        }
    }

    #[test]
    fn transparent_detection() {
        assert!("transparent".parse::<Color>().unwrap().is_transparent());
        assert!("rgba(0, 0, 0, 0)".parse::<Color>().unwrap().is_transparent());
        assert!(!"rgba(0, 0, 0, 0.01)".parse::<Color>().unwrap().is_transparent());
        assert!(!Color::rgb(0, 0, 0).is_transparent());
    }

    #[test]
    fn luminance_of_reference_colours() {
        let white = Color::rgb(255, 255, 255).luminance();
        assert!((white - 1.0).abs() < 1e-9);
        assert!(!prefers_light_icons(white));

        let black = Color::rgb(0, 0, 0).luminance();
        assert!(black.abs() < f64::EPSILON);
        assert!(prefers_light_icons(black));

        let grey = Color::rgb(128, 128, 128).luminance();
        assert!((grey - 0.216).abs() < 1e-3, "got {grey}");
        assert!(prefers_light_icons(grey));
    }

    #[test]
    fn alpha_does_not_change_luminance() {
        let opaque: Color = "rgb(200, 40, 90)".parse().unwrap();
        let faded: Color = "rgba(200, 40, 90, 0.1)".parse().unwrap();
        assert!((opaque.luminance() - faded.luminance()).abs() < f64::EPSILON);
    }

    #[test]
    fn transfer_function_has_linear_toe() {
        assert!((srgb_to_linear(0.039_28) - 0.039_28 / 12.92).abs() < f64::EPSILON);
        assert!(srgb_to_linear(0.5) < 0.5);
    }

    #[test]
    fn display_matches_computed_style_format() {
        assert_eq!(Color::rgb(1, 2, 3).to_string(), "rgb(1, 2, 3)");
        assert_eq!(
            "rgba(1,2,3,0.5)".parse::<Color>().unwrap().to_string(),
            "rgba(1, 2, 3, 0.5)"
        );
    }
}
