//! Median-cut color quantization
//!
//! Reduces a pixel population to at most `max_colors` representative colors.
//! The color cube is partitioned into boxes by repeatedly splitting the most
//! populous box along its longest channel at the population-weighted median.
//! Each final box collapses to its count-weighted average color.
//!
//! Fully deterministic: the histogram is ordered by RGB and every tie is
//! broken by a fixed rule, so the same pixels always give the same colors.

use crate::color::Rgb;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Default maximum number of colors produced by the quantizer
pub const DEFAULT_MAX_COLORS: usize = 16;

/// A representative color and the number of source pixels mapped to it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuantizedColor {
    pub rgb: Rgb,
    pub population: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    #[inline]
    fn of(self, rgb: Rgb) -> u8 {
        match self {
            Channel::Red => rgb.r,
            Channel::Green => rgb.g,
            Channel::Blue => rgb.b,
        }
    }
}

/// A box of distinct colors with their pixel counts
struct ColorBox {
    colors: Vec<(Rgb, u32)>,
    population: u64,
}

impl ColorBox {
    fn new(colors: Vec<(Rgb, u32)>) -> Self {
        let population = colors.iter().map(|&(_, count)| count as u64).sum();
        Self { colors, population }
    }

    fn can_split(&self) -> bool {
        self.colors.len() >= 2
    }

    /// Channel with the widest value range; ties prefer red, then green, then blue
    fn longest_channel(&self) -> Channel {
        let range = |channel: Channel| {
            let (min, max) = self
                .colors
                .iter()
                .map(|&(rgb, _)| channel.of(rgb))
                .fold((u8::MAX, u8::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
            max.saturating_sub(min)
        };

        let mut best = Channel::Red;
        let mut best_range = range(Channel::Red);
        for channel in [Channel::Green, Channel::Blue] {
            let r = range(channel);
            if r > best_range {
                best = channel;
                best_range = r;
            }
        }
        best
    }

    /// Split at the population-weighted median of the longest channel.
    /// Both halves are non-empty; caller checks `can_split` first.
    fn split(mut self) -> (ColorBox, ColorBox) {
        let channel = self.longest_channel();
        self.colors
            .sort_unstable_by_key(|&(rgb, _)| (channel.of(rgb), rgb));

        let mut cumulative = 0u64;
        let mut cut = self.colors.len() - 1;
        for (i, &(_, count)) in self.colors.iter().enumerate() {
            cumulative += count as u64;
            if cumulative * 2 >= self.population {
                cut = i + 1;
                break;
            }
        }
        let cut = cut.clamp(1, self.colors.len() - 1);

        let upper = self.colors.split_off(cut);
        (ColorBox::new(self.colors), ColorBox::new(upper))
    }

    fn average(&self) -> QuantizedColor {
        let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
        for &(rgb, count) in &self.colors {
            let count = count as u64;
            r += rgb.r as u64 * count;
            g += rgb.g as u64 * count;
            b += rgb.b as u64 * count;
        }

        let pop = self.population.max(1);
        let mean = |sum: u64| ((sum + pop / 2) / pop).min(255) as u8;

        QuantizedColor {
            rgb: Rgb::new(mean(r), mean(g), mean(b)),
            population: self.population.min(u32::MAX as u64) as u32,
        }
    }
}

/// Median-cut quantizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MedianCut {
    max_colors: usize,
}

impl MedianCut {
    /// Create a quantizer producing at most `max_colors` colors (at least 1)
    pub fn new(max_colors: usize) -> Self {
        Self {
            max_colors: max_colors.max(1),
        }
    }

    pub fn max_colors(&self) -> usize {
        self.max_colors
    }

    /// Quantize pixels into colors sorted by descending population
    ///
    /// Ties in population are ordered by ascending RGB. An empty input gives
    /// an empty result; fewer distinct colors than `max_colors` come back
    /// unchanged with their exact counts.
    pub fn quantize(&self, pixels: &[Rgb]) -> Vec<QuantizedColor> {
        let mut histogram: BTreeMap<Rgb, u32> = BTreeMap::new();
        for &pixel in pixels {
            let count = histogram.entry(pixel).or_insert(0);
            *count = count.saturating_add(1);
        }

        if histogram.is_empty() {
            return Vec::new();
        }

        let mut boxes = vec![ColorBox::new(histogram.into_iter().collect())];

        while boxes.len() < self.max_colors {
            // Most populous splittable box; the earliest one on ties
            let next = boxes
                .iter()
                .enumerate()
                .filter(|(_, b)| b.can_split())
                .min_by_key(|&(i, b)| (Reverse(b.population), i))
                .map(|(i, _)| i);

            let Some(index) = next else {
                break;
            };

            let (low, high) = boxes.remove(index).split();
            boxes.push(low);
            boxes.push(high);
        }

        let mut colors: Vec<QuantizedColor> = boxes.iter().map(ColorBox::average).collect();
        colors.sort_by_key(|c| (Reverse(c.population), c.rgb));

        tracing::debug!(
            "Quantized {} pixels into {} colors (max {})",
            pixels.len(),
            colors.len(),
            self.max_colors
        );

        colors
    }
}

impl Default for MedianCut {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_COLORS)
    }
}
