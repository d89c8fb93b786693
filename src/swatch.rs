//! Swatch records returned to callers

use crate::color::Rgb;
use crate::contrast;
use crate::profile::SwatchName;
use crate::quantize::QuantizedColor;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// A representative color with its population and readable text colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Swatch {
    pub rgb: Rgb,
    pub population: u32,
    pub title_text_color: Rgb,
    pub body_text_color: Rgb,
}

impl Swatch {
    /// Build a swatch, resolving text colors from the background alone
    pub fn new(rgb: Rgb, population: u32) -> Self {
        Self {
            rgb,
            population,
            title_text_color: contrast::title_text_color(rgb),
            body_text_color: contrast::body_text_color(rgb),
        }
    }
}

impl From<QuantizedColor> for Swatch {
    fn from(color: QuantizedColor) -> Self {
        Swatch::new(color.rgb, color.population)
    }
}

/// Diagnostic description; not a stable format
impl fmt::Display for Swatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Swatch [RGB: {}] [HSL: {}] [Population: {}] [Title Text: {}] [Body Text: {}]",
            self.rgb,
            self.rgb.hsl(),
            self.population,
            self.title_text_color,
            self.body_text_color
        )
    }
}

/// Best swatch per profile; a profile without a match holds `None`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NamedSwatches {
    slots: [Option<Swatch>; 6],
}

impl NamedSwatches {
    pub fn new(slots: [Option<Swatch>; 6]) -> Self {
        Self { slots }
    }

    pub fn get(&self, name: SwatchName) -> Option<&Swatch> {
        self.slots[name.index()].as_ref()
    }

    /// All six profiles in response order, matched or not
    pub fn iter(&self) -> impl Iterator<Item = (SwatchName, Option<&Swatch>)> + '_ {
        SwatchName::ALL
            .iter()
            .map(move |name| (*name, self.slots[name.index()].as_ref()))
    }

    /// Number of profiles that found a swatch
    pub fn matched(&self) -> usize {
        self.slots.iter().flatten().count()
    }
}

/// Wire form of a swatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwatchRecord {
    /// Swatch color as `#RRGGBB`
    #[schema(value_type = String, example = "#228B22")]
    pub color: Rgb,
    /// Number of source pixels represented by this swatch
    pub population: u32,
    /// Title text color as `#RRGGBB`
    #[schema(value_type = String, example = "#FFFFFF")]
    pub title_text_color: Rgb,
    /// Body text color as `#RRGGBB`
    #[schema(value_type = String, example = "#FFFFFF")]
    pub body_text_color: Rgb,
    /// Free-form diagnostic description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swatch_info: Option<String>,
}

impl From<&Swatch> for SwatchRecord {
    fn from(swatch: &Swatch) -> Self {
        Self {
            color: swatch.rgb,
            population: swatch.population,
            title_text_color: swatch.title_text_color,
            body_text_color: swatch.body_text_color,
            swatch_info: Some(swatch.to_string()),
        }
    }
}

/// Wire form of the named swatches: always six keys, `null` when unmatched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NamedSwatchesRecord {
    #[serde(rename = "Vibrant")]
    pub vibrant: Option<SwatchRecord>,
    #[serde(rename = "Vibrant Dark")]
    pub vibrant_dark: Option<SwatchRecord>,
    #[serde(rename = "Vibrant Light")]
    pub vibrant_light: Option<SwatchRecord>,
    #[serde(rename = "Muted")]
    pub muted: Option<SwatchRecord>,
    #[serde(rename = "Muted Dark")]
    pub muted_dark: Option<SwatchRecord>,
    #[serde(rename = "Muted Light")]
    pub muted_light: Option<SwatchRecord>,
}

impl From<&NamedSwatches> for NamedSwatchesRecord {
    fn from(named: &NamedSwatches) -> Self {
        let record = |name| named.get(name).map(SwatchRecord::from);
        Self {
            vibrant: record(SwatchName::Vibrant),
            vibrant_dark: record(SwatchName::VibrantDark),
            vibrant_light: record(SwatchName::VibrantLight),
            muted: record(SwatchName::Muted),
            muted_dark: record(SwatchName::MutedDark),
            muted_light: record(SwatchName::MutedLight),
        }
    }
}
