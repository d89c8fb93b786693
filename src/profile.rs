//! Named swatch profiles and scoring
//!
//! Six fixed target profiles (Vibrant, Muted and their Dark/Light variants).
//! A quantized color is a candidate for a profile when its saturation and
//! lightness both fall inside the profile's inclusive ranges. Candidates are
//! ranked by a weighted score of closeness to the profile's targets and
//! relative population.
//!
//! The threshold table below is part of the public contract: changing a value
//! changes which swatch callers get back.

use crate::color::HslColor;
use crate::quantize::QuantizedColor;
use std::fmt;

pub const SATURATION_WEIGHT: f32 = 0.24;
pub const LIGHTNESS_WEIGHT: f32 = 0.52;
pub const POPULATION_WEIGHT: f32 = 0.24;

/// Names of the six swatch profiles, in response order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwatchName {
    Vibrant,
    VibrantDark,
    VibrantLight,
    Muted,
    MutedDark,
    MutedLight,
}

impl SwatchName {
    pub const ALL: [SwatchName; 6] = [
        SwatchName::Vibrant,
        SwatchName::VibrantDark,
        SwatchName::VibrantLight,
        SwatchName::Muted,
        SwatchName::MutedDark,
        SwatchName::MutedLight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SwatchName::Vibrant => "Vibrant",
            SwatchName::VibrantDark => "Vibrant Dark",
            SwatchName::VibrantLight => "Vibrant Light",
            SwatchName::Muted => "Muted",
            SwatchName::MutedDark => "Muted Dark",
            SwatchName::MutedLight => "Muted Light",
        }
    }

    /// Position in [`SwatchName::ALL`] and [`PROFILES`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn profile(&self) -> &'static SwatchProfile {
        &PROFILES[self.index()]
    }
}

impl fmt::Display for SwatchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target constraints for one named swatch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwatchProfile {
    pub name: SwatchName,
    pub min_saturation: f32,
    pub target_saturation: f32,
    pub max_saturation: f32,
    pub min_lightness: f32,
    pub target_lightness: f32,
    pub max_lightness: f32,
}

const VIBRANT_SATURATION: (f32, f32, f32) = (0.35, 1.0, 1.0);
const MUTED_SATURATION: (f32, f32, f32) = (0.0, 0.3, 0.35);

const NORMAL_LIGHTNESS: (f32, f32, f32) = (0.25, 0.5, 0.75);
const DARK_LIGHTNESS: (f32, f32, f32) = (0.0, 0.15, 0.25);
const LIGHT_LIGHTNESS: (f32, f32, f32) = (0.75, 0.85, 1.0);

const fn profile(
    name: SwatchName,
    saturation: (f32, f32, f32),
    lightness: (f32, f32, f32),
) -> SwatchProfile {
    SwatchProfile {
        name,
        min_saturation: saturation.0,
        target_saturation: saturation.1,
        max_saturation: saturation.2,
        min_lightness: lightness.0,
        target_lightness: lightness.1,
        max_lightness: lightness.2,
    }
}

/// The six profiles, indexed by [`SwatchName::index`]
pub const PROFILES: [SwatchProfile; 6] = [
    profile(SwatchName::Vibrant, VIBRANT_SATURATION, NORMAL_LIGHTNESS),
    profile(SwatchName::VibrantDark, VIBRANT_SATURATION, DARK_LIGHTNESS),
    profile(SwatchName::VibrantLight, VIBRANT_SATURATION, LIGHT_LIGHTNESS),
    profile(SwatchName::Muted, MUTED_SATURATION, NORMAL_LIGHTNESS),
    profile(SwatchName::MutedDark, MUTED_SATURATION, DARK_LIGHTNESS),
    profile(SwatchName::MutedLight, MUTED_SATURATION, LIGHT_LIGHTNESS),
];

impl SwatchProfile {
    /// Whether a color with this HSL is a candidate for the profile (inclusive bounds)
    pub fn accepts(&self, hsl: &HslColor) -> bool {
        (self.min_saturation..=self.max_saturation).contains(&hsl.saturation)
            && (self.min_lightness..=self.max_lightness).contains(&hsl.lightness)
    }

    /// Weighted score of a candidate; `max_population` is the largest
    /// population among this profile's candidates
    pub fn score(&self, hsl: &HslColor, population: u32, max_population: u32) -> f32 {
        let saturation_closeness = 1.0 - (hsl.saturation - self.target_saturation).abs();
        let lightness_closeness = 1.0 - (hsl.lightness - self.target_lightness).abs();
        let population_fraction = if max_population > 0 {
            population as f32 / max_population as f32
        } else {
            0.0
        };

        SATURATION_WEIGHT * saturation_closeness
            + LIGHTNESS_WEIGHT * lightness_closeness
            + POPULATION_WEIGHT * population_fraction
    }

    /// Best candidate for this profile, or `None` when nothing qualifies
    ///
    /// Highest score wins; ties go to the higher population, then the lower RGB.
    pub fn best_match(&self, colors: &[QuantizedColor]) -> Option<QuantizedColor> {
        let candidates: Vec<(QuantizedColor, HslColor)> = colors
            .iter()
            .map(|c| (*c, c.rgb.hsl()))
            .filter(|(_, hsl)| self.accepts(hsl))
            .collect();

        let max_population = candidates.iter().map(|(c, _)| c.population).max()?;

        candidates
            .into_iter()
            .map(|(c, hsl)| (c, self.score(&hsl, c.population, max_population)))
            .max_by(|(a, score_a), (b, score_b)| {
                score_a
                    .total_cmp(score_b)
                    .then(a.population.cmp(&b.population))
                    .then(b.rgb.cmp(&a.rgb))
            })
            .map(|(c, _)| c)
    }
}

/// Best match for every profile, in [`SwatchName::ALL`] order
///
/// Profiles are scored independently; one color may win several of them.
pub fn score_profiles(colors: &[QuantizedColor]) -> [Option<QuantizedColor>; 6] {
    std::array::from_fn(|i| PROFILES[i].best_match(colors))
}
