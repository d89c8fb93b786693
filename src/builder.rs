//! Palette orchestration
//!
//! Quantize once, then either score the six named profiles or keep every
//! quantized color, and resolve text colors for whatever was selected.

use crate::buffer::PixelBuffer;
use crate::profile;
use crate::quantize::{MedianCut, DEFAULT_MAX_COLORS};
use crate::swatch::{NamedSwatches, Swatch};

/// Builds swatches from pixel buffers; holds no per-call state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteBuilder {
    quantizer: MedianCut,
}

impl PaletteBuilder {
    pub fn new(max_colors: usize) -> Self {
        Self {
            quantizer: MedianCut::new(max_colors),
        }
    }

    pub fn max_colors(&self) -> usize {
        self.quantizer.max_colors()
    }

    /// Best swatch for each of the six profiles
    pub fn named_swatches(&self, pixels: &PixelBuffer) -> NamedSwatches {
        let colors = self.quantizer.quantize(pixels.pixels());
        let best = profile::score_profiles(&colors);
        let named = NamedSwatches::new(best.map(|c| c.map(Swatch::from)));

        tracing::debug!(
            "Matched {}/6 profiles from {} quantized colors",
            named.matched(),
            colors.len()
        );

        named
    }

    /// Every quantized color as a swatch, by descending population
    pub fn all_swatches(&self, pixels: &PixelBuffer) -> Vec<Swatch> {
        self.quantizer
            .quantize(pixels.pixels())
            .into_iter()
            .map(Swatch::from)
            .collect()
    }
}

impl Default for PaletteBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_COLORS)
    }
}
