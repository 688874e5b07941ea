//! RGB thread colors and hex notation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The string is not a 6-digit hex color.
    #[error("invalid hex color: {0:?}")]
    InvalidColorFormat(String),
}

/// A 24-bit RGB color.
///
/// This is also the wire shape of a thread color in structured payloads,
/// so it serializes as `{"r":..,"g":..,"b":..}` and rejects unknown fields.
///
/// # Example
///
/// ```
/// use emb_pack::Color;
///
/// let c = Color::from_hex("#ABCDEF")?;
/// assert_eq!(c, Color::new(171, 205, 239));
/// assert_eq!(c.to_hex(), "#abcdef");
/// # Ok::<(), emb_pack::ColorError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Creates a color from its components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a 6-digit hex color, case-insensitive, with an optional
    /// single leading `#`.
    ///
    /// Anything else fails; a malformed color is never truncated or
    /// replaced with a default.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidColorFormat(hex.to_owned()));
        }
        // All-hexdigit input, the group parses cannot fail.
        let group = |range| u8::from_str_radix(&digits[range], 16).unwrap_or(0);
        Ok(Self {
            r: group(0..2),
            g: group(2..4),
            b: group(4..6),
        })
    }

    /// Formats the color as lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Low-cost perceptual distance between two colors ("red-mean"
    /// approximation). Zero for identical colors; not a metric, only
    /// ordered comparisons against a candidate set are meaningful.
    pub fn distance_red_mean(&self, other: &Color) -> u32 {
        let red_mean = (self.r as i32 + other.r as i32) / 2;
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        ((((512 + red_mean) * dr * dr) >> 8) + 4 * dg * dg + (((767 - red_mean) * db * db) >> 8))
            as u32
    }
}
