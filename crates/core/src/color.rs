//! Accent color types for lines and particles.
//!
//! The field paints in a single accent color at varying alpha. [`Rgb8`] is the
//! opaque base color (serialized as `"#rrggbb"`), and [`Rgba`] is what actually
//! reaches a surface: the base color plus an alpha in [0, 1].

use crate::error::FieldError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The orange accent used by the portfolio page, rgb(255, 107, 0).
pub const ACCENT: Rgb8 = Rgb8 {
    r: 255,
    g: 107,
    b: 0,
};

/// An 8-bit sRGB color.
///
/// Serializes as a hex string `"#rrggbb"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// An 8-bit sRGB color with a floating point alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgb8 {
    /// Parses a hex color string like "#ff6b00" or "FF6B00".
    ///
    /// Returns `FieldError::InvalidColor` if the input is not a valid 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Rgb8, FieldError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(FieldError::InvalidColor(format!(
                "expected 6 hex digits, got '{hex}'"
            )));
        }
        let component = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| FieldError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Rgb8 {
            r: component(0..2, "red")?,
            g: component(2..4, "green")?,
            b: component(4..6, "blue")?,
        })
    }

    /// Formats the color as `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Attaches an alpha, clamped to [0, 1].
    pub fn with_alpha(self, a: f64) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a: a.clamp(0.0, 1.0),
        }
    }
}

impl Rgba {
    /// CSS color string in the form the 2D canvas API accepts,
    /// e.g. `rgba(255, 107, 0, 0.15)`.
    pub fn to_css(self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl Serialize for Rgb8 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb8 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb8::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
