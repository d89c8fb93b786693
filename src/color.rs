//! Color primitives
//!
//! RGB triples as they come out of the decoded image, the HSL view used for
//! profile scoring, `#RRGGBB` hex strings for the wire format, and the luma
//! value used to pick readable text colors.

use palette::{Hsl, IntoColor, Srgb};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// RGB color representation
///
/// Ordering is lexicographic over (r, g, b).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// HSL view of this color. Hue is in degrees `[0, 360)`.
    pub fn hsl(&self) -> HslColor {
        let srgb: Srgb<f32> = Srgb::new(self.r, self.g, self.b).into_format();
        let hsl: Hsl = srgb.into_color();

        HslColor {
            hue: hsl.hue.into_positive_degrees(),
            saturation: hsl.saturation,
            lightness: hsl.lightness,
        }
    }

    /// Perceptual luma normalized to `[0, 1]`
    #[inline]
    pub fn luma(&self) -> f32 {
        (0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32) / 255.0
    }

    /// Uppercase `#RRGGBB`
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid hex color: {0:?} (expected #RRGGBB)")]
pub struct ParseHexError(String);

impl FromStr for Rgb {
    type Err = ParseHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| ParseHexError(s.to_string()))?;

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| ParseHexError(s.to_string()))
        };

        Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl From<image::Rgb<u8>> for Rgb {
    fn from(pixel: image::Rgb<u8>) -> Self {
        let [r, g, b] = pixel.0;
        Rgb::new(r, g, b)
    }
}

/// Hue/saturation/lightness, always derived from an [`Rgb`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslColor {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl fmt::Display for HslColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.1}, {:.3}, {:.3}]",
            self.hue, self.saturation, self.lightness
        )
    }
}
